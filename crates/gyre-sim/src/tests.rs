//! Tests for the simulation engine, scene gating, scoring and waves.

use std::cell::Cell;
use std::rc::Rc;

use gyre_core::components::*;
use gyre_core::config::SimConfig;
use gyre_core::constants::*;
use gyre_core::enums::*;
use gyre_core::events::*;
use gyre_core::input::FrameInput;

use crate::ecs::{EntityBundle, Query, Signature};
use crate::engine::{SimError, Simulation};

fn playing(config: SimConfig) -> Simulation {
    let mut sim = Simulation::new(config).unwrap();
    sim.start_new_game();
    sim
}

/// Drive the scene machine from the intro to Playing the way a player would.
fn navigate_to_playing(sim: &mut Simulation) {
    sim.frame(&FrameInput::idle(), INTRO_DURATION);
    assert_eq!(sim.scene_state(), SceneState::TitleScreen);
    sim.frame(&FrameInput::with_event(InputEvent::Confirm), DT);
    assert_eq!(sim.scene_state(), SceneState::Menu);
    sim.frame(&FrameInput::with_event(InputEvent::Confirm), DT);
    assert_eq!(sim.scene_state(), SceneState::Playing);
}

fn place_enemy_on_player(sim: &mut Simulation) -> crate::ecs::EntityId {
    let player = sim.player().unwrap();
    let pos = sim.world().read::<Position>(player).unwrap();
    sim.world_mut().create(
        EntityBundle::new()
            .position(Position::new(pos.x + 4.0, pos.y + 4.0))
            .movement(Movement::new(glam::Vec2::ZERO, 1.0))
            .size(Size::new(ENEMY_WIDTH, ENEMY_HEIGHT))
            .health(Health::new(1, 0.0))
            .tag(Tag::Enemy),
    )
}

// ---- Construction ----

#[test]
fn test_invalid_config_is_rejected() {
    let err = Simulation::new(SimConfig {
        orbit_radius: 400.0,
        ..Default::default()
    })
    .err()
    .unwrap();
    let SimError::Config(inner) = &err;
    assert_eq!(inner.field(), "orbit_radius");
    assert!(err.to_string().contains("orbit_radius"));
}

#[test]
fn test_new_simulation_waits_in_intro() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    assert_eq!(sim.scene_state(), SceneState::StudioIntro);
    sim.frame(&FrameInput::idle(), DT);
    assert_eq!(sim.tick_count(), 0, "no gameplay outside Playing");
    assert_eq!(sim.world().entity_count(), 0);
}

// ---- Scene gating ----

#[test]
fn test_menu_start_spawns_player_and_stars() {
    let config = SimConfig::default();
    let mut sim = Simulation::new(config.clone()).unwrap();
    navigate_to_playing(&mut sim);

    let player = sim.player().expect("player spawned");
    assert!(sim.world().has_tag(player, Tag::Player));
    assert_eq!(sim.world().tag_count(Tag::Star), config.star_count as usize);
    assert_eq!(sim.tick_count(), 1, "the entering frame already ticks");
}

#[test]
fn test_pause_freezes_gameplay() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    navigate_to_playing(&mut sim);

    let pause = FrameInput {
        pause: true,
        ..FrameInput::idle()
    };
    sim.frame(&pause, DT);
    assert_eq!(sim.scene_state(), SceneState::Paused);
    assert!(sim.game_state().is_paused());
    let ticks = sim.tick_count();
    let snapshot = sim.snapshot();

    for _ in 0..120 {
        sim.frame(&FrameInput::idle(), DT);
    }
    assert_eq!(sim.tick_count(), ticks);
    assert_eq!(sim.snapshot().entities, snapshot.entities);

    sim.frame(&pause, DT);
    assert_eq!(sim.scene_state(), SceneState::Playing);
    assert!(!sim.game_state().is_paused());
    assert_eq!(sim.tick_count(), ticks + 1, "resume keeps the run going");
}

#[test]
fn test_game_over_moves_scene() {
    let config = SimConfig {
        player_lives: 1,
        ..Default::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    navigate_to_playing(&mut sim);

    place_enemy_on_player(&mut sim);
    sim.frame(&FrameInput::idle(), DT);
    assert!(sim.game_state().is_game_over());
    assert_eq!(sim.scene_state(), SceneState::GameOver);

    // Back to the menu and into a fresh run.
    sim.frame(&FrameInput::idle(), END_SCREEN_MIN_DELAY);
    sim.frame(&FrameInput::with_event(InputEvent::Confirm), DT);
    assert_eq!(sim.scene_state(), SceneState::Menu);
    sim.frame(&FrameInput::with_event(InputEvent::Confirm), DT);
    assert_eq!(sim.scene_state(), SceneState::Playing);
    assert!(!sim.game_state().is_game_over());
    assert_eq!(sim.snapshot().lives, 1);
}

// ---- Tick pipeline ----

#[test]
fn test_player_turns_and_fires() {
    let config = SimConfig::default();
    let mut sim = playing(config.clone());
    let player = sim.player().unwrap();

    let input = FrameInput {
        angle_delta: 1.0,
        fire: true,
        ..FrameInput::idle()
    };
    sim.tick(&input, DT);

    let orbital = sim.world().read::<Orbital>(player).unwrap();
    assert_eq!(orbital.orbital_angle(), 180.0 + config.angle_step);
    assert_eq!(sim.world().tag_count(Tag::Projectile), 1);
    assert_eq!(sim.bus().pending::<WeaponFired>().len(), 1);

    // Cooldown: holding fire does not spawn every tick.
    sim.tick(&FrameInput::firing(), DT);
    assert_eq!(sim.world().tag_count(Tag::Projectile), 1);
}

#[test]
fn test_shooting_an_enemy_scores() {
    let mut sim = playing(SimConfig::default());
    let enemy = sim.world_mut().create(
        EntityBundle::new()
            .position(Position::new(400.0, 400.0))
            .movement(Movement::new(glam::Vec2::ZERO, 1.0))
            .size(Size::new(32.0, 32.0))
            .health(Health::new(1, 0.0))
            .tag(Tag::Enemy),
    );

    // The player sits at the orbit bottom facing up, so the shot flies
    // straight into the enemy above it.
    sim.tick(&FrameInput::firing(), DT);
    for _ in 0..30 {
        sim.tick(&FrameInput::idle(), DT);
        if !sim.world().is_alive(enemy) {
            break;
        }
    }

    assert!(!sim.world().is_alive(enemy));
    assert_eq!(sim.game_state().score().score(), u64::from(ENEMY_POINTS));
    assert_eq!(sim.bus().pending::<EnemyDestroyed>().len(), 1);
    assert_eq!(sim.bus().pending::<ScoreChanged>().len(), 1);
}

#[test]
fn test_contact_damage_then_invincibility_expires() {
    let config = SimConfig::default();
    let mut sim = playing(config.clone());
    let player = sim.player().unwrap();

    place_enemy_on_player(&mut sim);
    sim.tick(&FrameInput::idle(), DT);

    let health = sim.world().read::<Health>(player).unwrap();
    assert_eq!(health.current(), config.player_lives - 1);
    assert!(health.is_invincible());

    // A second rammer during the window is absorbed.
    place_enemy_on_player(&mut sim);
    sim.tick(&FrameInput::idle(), DT);
    assert_eq!(
        sim.world().read::<Health>(player).unwrap().current(),
        config.player_lives - 1
    );

    let ticks = (config.invincibility_duration / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        sim.tick(&FrameInput::idle(), DT);
    }
    assert!(!sim.world().read::<Health>(player).unwrap().is_invincible());
}

#[test]
fn test_bonus_life_heals_player() {
    let mut sim = playing(SimConfig::default());
    let player = sim.player().unwrap();
    place_enemy_on_player(&mut sim);
    sim.tick(&FrameInput::idle(), DT);
    let hurt = sim.world().read::<Health>(player).unwrap().current();

    // A boss worth enough to cross the bonus threshold on its own.
    for _ in 0..(BONUS_LIFE_SCORE / u64::from(BOSS_POINTS)) {
        let boss = sim.world_mut().create(
            EntityBundle::new()
                .position(Position::new(10.0, 10.0))
                .size(Size::new(BOSS_WIDTH, BOSS_HEIGHT))
                .health(Health::new(1, 0.0))
                .tag(Tag::Enemy)
                .tag(Tag::Boss),
        );
        sim.world_mut().create(
            EntityBundle::new()
                .position(Position::new(20.0, 20.0))
                .size(Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
                .tag(Tag::Projectile),
        );
        sim.tick(&FrameInput::idle(), DT);
        assert!(!sim.world().is_alive(boss));
    }

    assert!(sim.game_state().score().score() >= BONUS_LIFE_SCORE);
    assert_eq!(sim.world().read::<Health>(player).unwrap().current(), hurt + 1);
    assert_eq!(sim.bus().pending::<LifeAdded>().len(), 1);
}

/// Shoot down enough bosses to cross the first bonus-life threshold.
fn score_bonus_life(sim: &mut Simulation) {
    for _ in 0..(BONUS_LIFE_SCORE / u64::from(BOSS_POINTS)) {
        sim.world_mut().create(
            EntityBundle::new()
                .position(Position::new(10.0, 10.0))
                .size(Size::new(BOSS_WIDTH, BOSS_HEIGHT))
                .health(Health::new(1, 0.0))
                .tag(Tag::Enemy)
                .tag(Tag::Boss),
        );
        sim.world_mut().create(
            EntityBundle::new()
                .position(Position::new(20.0, 20.0))
                .size(Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
                .tag(Tag::Projectile),
        );
        sim.tick(&FrameInput::idle(), DT);
    }
}

#[test]
fn test_bonus_life_at_full_health_raises_lives() {
    let config = SimConfig::default();
    let mut sim = playing(config.clone());
    let player = sim.player().unwrap();

    score_bonus_life(&mut sim);

    let health = sim.world().read::<Health>(player).unwrap();
    assert_eq!(health.current(), config.player_lives + 1);
    assert_eq!(health.maximum(), config.player_lives + 1);
    assert_eq!(
        sim.bus().pending::<LifeAdded>(),
        &[LifeAdded {
            lives: config.player_lives + 1
        }]
    );
    assert_eq!(sim.snapshot().lives, config.player_lives + 1);
}

#[test]
fn test_enemies_spawn_on_interval() {
    let config = SimConfig::default();
    let mut sim = playing(config.clone());
    let per_spawn = (config.spawn_interval / DT).round() as usize;
    for _ in 0..(per_spawn * 3 + per_spawn / 2) {
        sim.tick(&FrameInput::idle(), DT);
    }
    assert_eq!(sim.enemies().wave().spawned(), 3);
    assert_eq!(sim.bus().pending::<WaveStarted>().len(), 1);

    // Every live enemy started from the center and is still heading out.
    let center = config.center();
    for id in sim.world().query(Query::tagged(Tag::Enemy, Signature::MOVEMENT)) {
        let size = sim.world().read::<Size>(id).unwrap();
        let pos = sim.world().read::<Position>(id).unwrap().center(size);
        let velocity = sim.world().read::<Movement>(id).unwrap().velocity;
        assert!((pos - center).dot(velocity) > 0.0);
    }
}

#[test]
fn test_victory_after_final_boss() {
    let config = SimConfig {
        enemies_per_wave: 1,
        waves_per_level: 1,
        level_count: 1,
        ..Default::default()
    };
    let mut sim = Simulation::new(config.clone()).unwrap();
    navigate_to_playing(&mut sim);

    // Wait for the boss, then shoot it down.
    let mut boss = None;
    for _ in 0..120 {
        sim.frame(&FrameInput::idle(), DT);
        boss = sim
            .world()
            .query(Query::tagged(Tag::Boss, Signature::empty()))
            .first();
        if boss.is_some() {
            break;
        }
    }
    let boss = boss.expect("boss spawned in the first wave");
    let pos = sim.world().read::<Position>(boss).unwrap();
    sim.world_mut().insert(boss, Health::new(1, 0.0));
    sim.world_mut().create(
        EntityBundle::new()
            .position(Position::new(pos.x + 10.0, pos.y + 10.0))
            .size(Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
            .tag(Tag::Projectile),
    );
    sim.frame(&FrameInput::idle(), DT);
    assert!(!sim.world().is_alive(boss));
    assert_eq!(sim.enemies().wave().kills(), 1);

    sim.frame(&FrameInput::idle(), DT);
    assert!(sim.game_state().is_victory());
    assert_eq!(sim.scene_state(), SceneState::Victory);
}

#[test]
fn test_idle_player_never_wins() {
    let config = SimConfig {
        enemies_per_wave: 1,
        waves_per_level: 1,
        level_count: 1,
        ..Default::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let bosses = Rc::new(Cell::new(0));
    let defeated = Rc::new(Cell::new(0));
    {
        let bosses = Rc::clone(&bosses);
        sim.bus_mut()
            .subscribe::<BossSpawned, _>(move |_, _| bosses.set(bosses.get() + 1));
        let defeated = Rc::clone(&defeated);
        sim.bus_mut()
            .subscribe::<BossDefeated, _>(move |_, _| defeated.set(defeated.get() + 1));
    }
    navigate_to_playing(&mut sim);

    // Long enough for the boss to fly out of range and be sent back.
    for _ in 0..1500 {
        sim.frame(&FrameInput::idle(), DT);
    }
    assert!(!sim.game_state().is_victory());
    assert_ne!(sim.scene_state(), SceneState::Victory);
    assert_eq!(sim.game_state().level(), 1);
    assert_eq!(defeated.get(), 0);
    assert!(bosses.get() >= 2, "escaped boss returns");
}

#[test]
fn test_quit_requests_exit() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    navigate_to_playing(&mut sim);
    let quit = FrameInput {
        quit: true,
        ..FrameInput::idle()
    };
    sim.frame(&quit, DT);
    assert!(sim.exit_requested());
}

// ---- Snapshot ----

#[test]
fn test_snapshot_reports_run_state() {
    let config = SimConfig::default();
    let sim = playing(config.clone());
    let snap = sim.snapshot();
    assert_eq!(snap.lives, config.player_lives);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.entities.len(), config.star_count as usize + 1);

    let json = serde_json::to_string(&snap).unwrap();
    let back: crate::snapshot::SimSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}
