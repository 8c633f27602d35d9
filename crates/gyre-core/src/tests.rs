//! Tests for core components, geometry, configuration and serialization.

use approx::assert_abs_diff_eq;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::*;
use crate::config::SimConfig;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::*;
use crate::geometry::{orbit_angle, orbit_position, Aabb};
use crate::types::EntityId;

fn random_box(rng: &mut ChaCha8Rng) -> Aabb {
    Aabb::new(
        rng.gen_range(-50.0..150.0),
        rng.gen_range(-50.0..150.0),
        rng.gen_range(0.5..60.0),
        rng.gen_range(0.5..60.0),
    )
}

// ---- AABB ----

#[test]
fn aabb_overlap_is_symmetric() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..5_000 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);
        assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a:?} vs {b:?}");
    }
}

#[test]
fn aabb_edge_contact_is_not_overlap() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let right_neighbor = Aabb::new(10.0, 0.0, 10.0, 10.0);
    let below_neighbor = Aabb::new(0.0, 10.0, 10.0, 10.0);
    let corner_neighbor = Aabb::new(10.0, 10.0, 5.0, 5.0);
    assert!(!a.overlaps(&right_neighbor));
    assert!(!a.overlaps(&below_neighbor));
    assert!(!a.overlaps(&corner_neighbor));

    let nudged = Aabb::new(9.99, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&nudged));
}

#[test]
fn aabb_containment_overlaps() {
    let outer = Aabb::new(100.0, 100.0, 32.0, 32.0);
    let inner = Aabb::new(100.0, 100.0, 4.0, 4.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

// ---- Orbit math ----

#[test]
fn orbit_angle_round_trips() {
    let center = Vec2::new(400.0, 300.0);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..2_000 {
        let theta: f32 = rng.gen_range(0.0..360.0);
        let radius: f32 = rng.gen_range(10.0..280.0);
        let back = orbit_angle(center, orbit_position(center, radius, theta));
        // Compare on the circle so 359.9999 and 0.0 count as equal.
        let diff = (back - theta + 540.0).rem_euclid(360.0) - 180.0;
        assert_abs_diff_eq!(diff, 0.0, epsilon = 1e-2);
    }
}

#[test]
fn orbital_angle_stays_normalized() {
    let mut orbital = Orbital::new(Vec2::ZERO, 100.0, 350.0, 0.0);
    orbital.rotate(20.0);
    assert_abs_diff_eq!(orbital.orbital_angle(), 10.0, epsilon = 1e-4);
    orbital.rotate(-30.0);
    assert_abs_diff_eq!(orbital.orbital_angle(), 340.0, epsilon = 1e-4);
    orbital.rotate(-3600.0);
    assert!((0.0..360.0).contains(&orbital.orbital_angle()));
}

#[test]
fn facing_and_orbit_are_independent() {
    let mut orbital = Orbital::new(Vec2::ZERO, 100.0, 180.0, 90.0);
    orbital.rotate(45.0);
    assert_abs_diff_eq!(orbital.facing_angle(), 90.0);
    orbital.turn(-45.0);
    assert_abs_diff_eq!(orbital.orbital_angle(), 225.0);
    assert_abs_diff_eq!(orbital.facing_angle(), 45.0);
}

// ---- Movement ----

#[test]
fn velocity_clamp_preserves_direction() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..2_000 {
        let before = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
        if before.length() < 1e-3 {
            continue;
        }
        let max_speed = rng.gen_range(1.0..400.0);
        let mut movement = Movement {
            velocity: before,
            max_speed,
        };
        movement.clamp_speed();

        assert!(movement.velocity.length() <= max_speed * (1.0 + 1e-5));
        let a = before.normalize();
        let b = movement.velocity.normalize();
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
    }
}

#[test]
fn velocity_under_limit_is_untouched() {
    let mut movement = Movement {
        velocity: Vec2::new(3.0, 4.0),
        max_speed: 10.0,
    };
    assert!(!movement.clamp_speed());
    assert_eq!(movement.velocity, Vec2::new(3.0, 4.0));
}

// ---- Health ----

#[test]
fn health_stays_within_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut health = Health::new(5, 1.0);
    for _ in 0..10_000 {
        let amount = rng.gen_range(0..4);
        if rng.gen_bool(0.5) {
            health.take_damage(amount);
        } else {
            health.heal(amount);
        }
        assert!(health.current() <= health.maximum());
    }
}

#[test]
fn extra_life_raises_the_cap() {
    let mut health = Health::new(3, 0.0);
    assert_eq!(health.add_life(), 4);
    assert_eq!(health.maximum(), 4);

    health.take_damage(2);
    assert_eq!(health.add_life(), 3);
    assert_eq!(health.maximum(), 5);
    assert_eq!(health.heal(10), 5);
}

#[test]
fn health_invincibility_window() {
    let mut health = Health::new(3, 2.0);
    health.arm_invincibility();
    assert!(health.is_invincible());
    assert!(health.invincibility_remaining() > 0.0);

    assert!(!health.tick_invincibility(1.0));
    assert!(health.is_invincible());
    assert!(health.tick_invincibility(1.0));
    assert!(!health.is_invincible());
    assert_eq!(health.invincibility_remaining(), 0.0);
}

#[test]
fn zero_duration_never_arms() {
    let mut health = Health::new(3, 0.0);
    health.arm_invincibility();
    assert!(!health.is_invincible());
}

// ---- Configuration ----

#[test]
fn default_config_is_valid() {
    assert_eq!(SimConfig::default().validate(), Ok(()));
}

#[test]
fn invalid_screen_size_is_rejected() {
    let config = SimConfig {
        screen_width: 0.0,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidScreenSize { .. }));
    assert_eq!(err.field(), "screen_size");
}

#[test]
fn orbit_too_large_for_screen_is_rejected() {
    let config = SimConfig {
        orbit_radius: 290.0,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.field(), "orbit_radius");
    assert!(err.to_string().contains("orbit_radius"));
}

#[test]
fn out_of_range_fields_are_named() {
    let cases: Vec<(SimConfig, &str)> = vec![
        (
            SimConfig {
                star_count: 5_000,
                ..Default::default()
            },
            "star_count",
        ),
        (
            SimConfig {
                enemy_speed: -1.0,
                ..Default::default()
            },
            "enemy_speed",
        ),
        (
            SimConfig {
                angle_step: 120.0,
                ..Default::default()
            },
            "angle_step",
        ),
        (
            SimConfig {
                fire_interval: 0.0,
                ..Default::default()
            },
            "fire_interval",
        ),
        (
            SimConfig {
                player_lives: 0,
                ..Default::default()
            },
            "player_lives",
        ),
        (
            SimConfig {
                enemy_size: Size::new(0.0, 32.0),
                ..Default::default()
            },
            "enemy_size",
        ),
    ];
    for (config, field) in cases {
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), field, "{err}");
        assert!(err.to_string().contains(field));
    }
}

#[test]
fn config_fills_missing_fields_from_defaults() {
    let config: SimConfig = serde_json::from_str(r#"{ "star_count": 12, "seed": 7 }"#).unwrap();
    assert_eq!(config.star_count, 12);
    assert_eq!(config.seed, 7);
    assert_eq!(config.orbit_radius, SimConfig::default().orbit_radius);
}

// ---- Serialization ----

#[test]
fn scene_state_serde() {
    let variants = vec![
        SceneState::StudioIntro,
        SceneState::TitleScreen,
        SceneState::Menu,
        SceneState::Options,
        SceneState::Credits,
        SceneState::Playing,
        SceneState::Paused,
        SceneState::GameOver,
        SceneState::Victory,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: SceneState = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn weapon_type_parse_round_trip() {
    for w in [WeaponType::Single, WeaponType::Twin] {
        assert_eq!(WeaponType::parse(w.as_str()), w);
    }
    assert_eq!(WeaponType::parse("nonsense"), WeaponType::Single);
}

#[test]
fn menu_cursor_wraps() {
    assert_eq!(MenuItem::Start.previous(), MenuItem::Exit);
    assert_eq!(MenuItem::Exit.next(), MenuItem::Start);
    assert_eq!(MenuItem::Start.next(), MenuItem::Options);
}

#[test]
fn event_payloads_serialize() {
    let damaged = PlayerDamaged {
        entity: EntityId::new(3, 1),
        damage: 1,
        remaining: 2,
    };
    let json = serde_json::to_string(&damaged).unwrap();
    assert!(json.contains("\"remaining\":2"));
    let back: PlayerDamaged = serde_json::from_str(&json).unwrap();
    assert_eq!(back, damaged);

    let changed = SceneChanged {
        from: SceneState::TitleScreen,
        to: SceneState::Menu,
    };
    let back: SceneChanged = serde_json::from_str(&serde_json::to_string(&changed).unwrap()).unwrap();
    assert_eq!(back, changed);
}
