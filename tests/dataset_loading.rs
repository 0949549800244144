use std::fs;

use dockmaster::config::zone_config::ZoneConfig;
use dockmaster::data::dataset_loader::{load_dataset, DatasetError};
use dockmaster::data::suggestions_loader::load_pending;
use dockmaster::models::suggestion::SuggestionAction;
use dockmaster::Coordinate;

#[test]
fn tsv_dataset_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dockmasters.tsv");
    fs::write(
        &path,
        "# zone_id\tx\ty\tmap\tenabled\n9C-N\t2700\t2700\t7\ttrue\nbroken\n+XD1\t3500\t2500\t7\tfalse\n",
    )
    .unwrap();

    let parsed = load_dataset(&path).unwrap();
    assert_eq!(parsed.waypoints.len(), 2);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.waypoints[1].zone_id, "XD1");
    assert!(!parsed.waypoints[1].enabled);
}

#[test]
fn json_dataset_uses_backend_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waypoints.json");
    fs::write(
        &path,
        r#"[{"zone_id": "4B-S", "x": 1200, "y": 900, "map": 7, "enabled": true},
            {"zone_id": "XD2", "x": 3600, "y": 2600}]"#,
    )
    .unwrap();

    let parsed = load_dataset(&path).unwrap();
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.waypoints[0].coordinate, Coordinate::new(1200, 900));
    assert_eq!(parsed.waypoints[1].map, 7);
    assert!(parsed.waypoints[1].enabled);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_dataset(dir.path().join("absent.tsv"));
    assert!(matches!(result, Err(DatasetError::IoError(_))));
}

#[test]
fn pending_suggestions_from_backend_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suggestions.json");
    fs::write(
        &path,
        r#"[
            {"id": "a1", "action": "add", "zone_id": "10C-N", "x": 2800, "y": 2800,
             "reason": "new dock", "status": "pending", "created_at": "2024-05-01T10:15:30.123456"},
            {"id": "a2", "action": "remove", "zone_id": "3B-S", "reason": "gone", "status": "approved",
             "reviewed_by": "admin", "pr_url": "https://example.invalid/pr/4", "pr_number": 4}
        ]"#,
    )
    .unwrap();

    let pending = load_pending(&path).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].action, SuggestionAction::Add);
    assert_eq!(pending[0].coordinate(), Some(Coordinate::new(2800, 2800)));
    assert!(pending[0].created_at.is_some());
}

#[test]
fn zone_config_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");
    fs::write(&path, r#"{"proximity_threshold": 250.0, "search_radii": [500.0]}"#).unwrap();

    let config = ZoneConfig::load(&path).unwrap();
    assert_eq!(config.proximity_threshold, 250.0);
    assert_eq!(config.search_radii, vec![500.0]);
    assert_eq!(config.max_prefix_suggestions, 3);
}
