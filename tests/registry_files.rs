//! Integration tests for loading settlement parameters from disk.

use hamlet::{
    ClusteredLayoutGenerator, LayoutError, LayoutGenerator, LayoutResult, Settlement,
    SettlementType, SettlementTypeRegistry,
};
use std::io::Write;

#[test]
fn test_registry_from_file_drives_generation() -> LayoutResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "outpost": {{
                "min_size": 2, "max_size": 3, "grid_size": 14,
                "min_spacing": 4, "min_cluster_radius": 1, "max_cluster_radius": 2,
                "organic_density": 0.5, "organic_reach": 12
            }}
        }}"#
    )?;

    let registry = SettlementTypeRegistry::from_file(file.path())?;
    assert_eq!(registry.len(), 1);

    let settlement = Settlement::with_size(SettlementType::Outpost, 10, &registry)?;
    assert_eq!(settlement.size(), 3);
    assert_eq!(settlement.grid_size(), 14);

    let mut rng = hamlet::utils::create_rng(5);
    let layout = ClusteredLayoutGenerator::new().generate(&settlement, &mut rng)?;
    assert_eq!(layout.side(), 14);
    assert!(layout.cluster_ids().len() >= 4);

    // Types missing from the file cannot be constructed
    assert!(matches!(
        Settlement::with_size(SettlementType::City, 5, &registry),
        Err(LayoutError::Configuration(_))
    ));

    Ok(())
}

#[test]
fn test_registry_round_trips_through_file() -> LayoutResult<()> {
    let registry = SettlementTypeRegistry::with_defaults();
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(registry.to_json()?.as_bytes())?;

    let loaded = SettlementTypeRegistry::from_file(file.path())?;
    assert_eq!(loaded, registry);
    Ok(())
}

#[test]
fn test_registry_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SettlementTypeRegistry::from_file(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

#[test]
fn test_registry_from_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let result = SettlementTypeRegistry::from_file(file.path());
    assert!(matches!(result, Err(LayoutError::Serde(_))));
}

#[test]
fn test_registry_rejects_unknown_type_name() {
    let json = r#"{ "castle": { "min_size": 1, "max_size": 2, "grid_size": 10,
        "min_spacing": 3, "min_cluster_radius": 1, "max_cluster_radius": 1 } }"#;
    assert!(matches!(
        SettlementTypeRegistry::from_json(json),
        Err(LayoutError::Serde(_))
    ));
}
