use std::fs;

use dockmaster::core::batch::suggest_batch;
use dockmaster::core::matcher::find_nearest_waypoint;
use dockmaster::data::candidates_loader::load_candidates;
use dockmaster::data::dataset_loader::{load_dataset, parse_dataset};
use dockmaster::data::dataset_patch::apply_suggestion;
use dockmaster::models::suggestion::{SuggestionAction, SuggestionStatus};
use dockmaster::utils::csv_export::SuggestionExporter;
use dockmaster::{check_placement, suggest, BookArea, Coordinate, PlacementRejection, Suggestion, ZoneConfig};

const DATASET: &str = "\
# zone_id\tx\ty\tmap\tenabled
2B-S\t1000\t800\t7\ttrue
8B-N\t2500\t2600\t7\ttrue
9C-N\t2700\t2700\t7\ttrue
10C-N\t2000\t3500\t7\ttrue
XD1\t3500\t2500\t7\ttrue
XD2\t3600\t2600\t7\ttrue
";

#[test]
fn suggest_review_and_patch_cycle() {
    let config = ZoneConfig::default();
    let waypoints = parse_dataset(DATASET).waypoints;
    let candidate = Coordinate::new(2800, 2900);

    check_placement(&candidate, &waypoints, &[], &config).unwrap();
    let suggestions = suggest(&candidate, &waypoints, &config);
    assert_eq!(suggestions[0].book_area, BookArea::N);
    // 10C-N is taken, so the 9C family probes to 11C-N.
    assert_eq!(suggestions[0].next_suggested, "11C-N");

    let mut proposal = Suggestion::new("s-1", SuggestionAction::Add, suggestions[0].next_suggested.clone(), "new dock")
        .at(candidate.x, candidate.y);

    // A second submission right next to the pending one is blocked.
    let nearby = Coordinate::new(2830, 2930);
    let blocked = check_placement(&nearby, &waypoints, std::slice::from_ref(&proposal), &config);
    assert!(matches!(blocked, Err(PlacementRejection::NearPendingSuggestion { ref zone_id, .. }) if zone_id == "11C-N"));

    let reviewed_at = chrono::NaiveDate::from_ymd_opt(2024, 5, 2)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap();
    proposal.review(SuggestionStatus::Approved, "admin", Some("ok".to_string()), reviewed_at).unwrap();

    let patched = apply_suggestion(DATASET, &proposal).unwrap();
    let updated = parse_dataset(&patched).waypoints;
    assert_eq!(updated.len(), waypoints.len() + 1);
    // Identifiers compare as text, so 11C-N lands ahead of 2B-S.
    assert!(patched.contains("enabled\n11C-N\t2800\t2900\t7\ttrue\n2B-S\t1000\t800\t7\ttrue\n"));

    // Once applied the candidate collides with its own waypoint.
    let rejected = check_placement(&candidate, &updated, &[], &config);
    assert!(matches!(rejected, Err(PlacementRejection::NearExistingWaypoint { .. })));
}

#[test]
fn nearest_match_prefers_same_book_area() {
    let config = ZoneConfig::default();
    let waypoints = parse_dataset(DATASET).waypoints;

    let found = find_nearest_waypoint(&Coordinate::new(3520, 2520), &waypoints, &config).unwrap();
    assert_eq!(found.waypoint.zone_id, "XD1");
    // XD matches ignore the runner-up
    assert_eq!(found.confidence, 0.9);
}

#[test]
fn reference_entries_in_the_dataset_are_ignored() {
    let config = ZoneConfig::default();
    let content = format!("{}XD3\t3500\t6142\t7\ttrue\n", DATASET);
    let waypoints = parse_dataset(&content).waypoints;
    assert_eq!(waypoints.len(), 7);

    // XD3 is only a reference entry, so it is still free
    let suggestions = suggest(&Coordinate::new(4000, 3000), &waypoints, &config);
    assert_eq!(suggestions[0].next_suggested, "XD3");
    assert_eq!(suggestions[0].all_in_book_area.len(), 2);
}

#[test]
fn batch_from_files_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join("dockmasters.tsv");
    let candidates_path = dir.path().join("candidates.csv");
    fs::write(&dataset_path, DATASET).unwrap();
    fs::write(&candidates_path, "x,y\n4000,3000\n2700,2000\n1200,900\n").unwrap();

    let config = ZoneConfig::default();
    let waypoints = load_dataset(&dataset_path).unwrap().waypoints;
    let candidates = load_candidates(&candidates_path).unwrap();

    let outcomes = suggest_batch(&candidates, &waypoints, &[], &config, || {});
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].suggestions[0].next_suggested, "XD3");
    assert!(matches!(outcomes[1].rejection, Some(PlacementRejection::InvalidLocation(_))));
    assert_eq!(outcomes[2].suggestions[0].next_suggested, "3B-S");

    let exporter = SuggestionExporter::new(dir.path().join("out")).unwrap();
    let path = exporter.export_suggestions(&outcomes).unwrap();
    let rows = csv::Reader::from_path(&path).unwrap().records().count();
    assert_eq!(rows, 3);
}
