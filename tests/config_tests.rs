//! Config tests - JSON loading and validation

use blockfall::core::{ConfigError, Engine, EngineConfig, GameOverPolicy, SpawnPolicy};

#[test]
fn test_empty_json_is_default() {
    let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.total_height(), 25);
}

#[test]
fn test_partial_json_overrides_fields() {
    let json = r#"{
        "width": 6,
        "spawn_x": 2,
        "game_over_policy": "danger_zone",
        "spawn_policy": "bag"
    }"#;
    let cfg: EngineConfig = serde_json::from_str(json).unwrap();

    assert_eq!(cfg.width, 6);
    assert_eq!(cfg.height, 20);
    assert_eq!(cfg.spawn_x, 2);
    assert_eq!(cfg.game_over_policy, GameOverPolicy::DangerZone);
    assert_eq!(cfg.spawn_policy, SpawnPolicy::Bag);
    assert_eq!(cfg.validate(), Ok(()));

    let engine = Engine::new(cfg, 1).unwrap();
    assert_eq!(engine.board().width(), 6);
}

#[test]
fn test_custom_catalog_from_json() {
    let json = r#"{
        "catalog": [
            {"id": 0, "value": 5, "rotation_states": [[[0,0],[1,0],[0,1],[1,1]]]}
        ]
    }"#;
    let cfg: EngineConfig = serde_json::from_str(json).unwrap();
    let mut engine = Engine::new(cfg, 1).unwrap();

    let event = engine.hard_drop().unwrap();
    assert_eq!(event.value, 5);
    assert_eq!(engine.next().unwrap().id(), 0);
}

#[test]
fn test_empty_rotation_states_rejected() {
    let json = r#"{"catalog": [{"id": 4, "value": 1, "rotation_states": []}]}"#;
    let cfg: EngineConfig = serde_json::from_str(json).unwrap();

    let err = Engine::new(cfg, 1).unwrap_err();
    assert_eq!(err, ConfigError::EmptyRotationStates { id: 4 });
    assert_eq!(err.code(), "empty_rotation_states");
    assert_eq!(err.to_string(), "piece has no rotation states (piece 4)");
}

#[test]
fn test_zero_value_rejected_by_parser() {
    let json = r#"{"catalog": [{"id": 0, "value": 0, "rotation_states": [[[0,0],[1,0],[0,1],[1,1]]]}]}"#;
    assert!(serde_json::from_str::<EngineConfig>(json).is_err());
}

#[test]
fn test_invalid_configs_rejected() {
    let cases = [
        (
            EngineConfig {
                height: 0,
                ..EngineConfig::default()
            },
            ConfigError::ZeroHeight,
        ),
        (
            EngineConfig {
                ticks_per_gravity_step: 0,
                ..EngineConfig::default()
            },
            ConfigError::ZeroGravityInterval,
        ),
        (
            EngineConfig {
                spawn_y: 25,
                ..EngineConfig::default()
            },
            ConfigError::SpawnOutsideGrid,
        ),
        (
            EngineConfig {
                spawn_x: -1,
                ..EngineConfig::default()
            },
            ConfigError::SpawnOutsideGrid,
        ),
    ];

    for (cfg, expected) in cases {
        assert_eq!(cfg.validate(), Err(expected));
        assert_eq!(Engine::new(cfg, 1).err(), Some(expected));
    }
}

#[test]
fn test_too_many_rows_rejected_before_building_board() {
    let cfg = EngineConfig {
        height: 40_000,
        buffer: 40_000,
        ..EngineConfig::default()
    };

    assert_eq!(cfg.validate(), Err(ConfigError::GridTooTall));
    let err = Engine::new(cfg, 1).unwrap_err();
    assert_eq!(err.code(), "grid_too_tall");
    assert_eq!(err.to_string(), "height plus buffer exceeds 65535 rows");
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut cfg = EngineConfig::default();
    let dup = cfg.catalog[3].clone();
    cfg.catalog.push(dup);

    assert_eq!(
        cfg.validate(),
        Err(ConfigError::DuplicatePieceId { id: 3 })
    );
}

#[test]
fn test_policy_names_round_trip() {
    for policy in [GameOverPolicy::BlockedSpawn, GameOverPolicy::DangerZone] {
        assert_eq!(GameOverPolicy::from_str(policy.as_str()), Some(policy));
    }
    for policy in [SpawnPolicy::Uniform, SpawnPolicy::Bag] {
        assert_eq!(SpawnPolicy::from_str(policy.as_str()), Some(policy));
    }
    assert_eq!(GameOverPolicy::from_str("sometimes"), None);
}
