use serde::Serialize;
use tracing::debug;

use crate::config::const_funcs::sort_by_distance;
use crate::config::constants::{TRANSITION_CONFIDENCE_FACTOR, VERIFICATION_CONFIDENCE_THRESHOLD, XD_MATCH_CONFIDENCE};
use crate::config::zone_config::ZoneConfig;
use crate::core::classifier::{classify, is_transition_point};
use crate::core::zone_id::book_area_of_id;
use crate::data::poi::Coordinate;
use crate::models::book_area::BookArea;
use crate::models::waypoint::{without_reference_points, Waypoint};
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointMatch {
    pub waypoint: Waypoint,
    pub distance: f64,
    pub confidence: f64,
}

/// Closest existing waypoint whose identifier belongs to the candidate's book area.
///
/// XD matches carry a flat confidence. Elsewhere confidence starts at 1.0,
/// shrinks by the ratio of the two nearest distances when there is a
/// runner-up and is discounted again near an area boundary.
/// Reference points are never matched.
pub fn find_nearest_waypoint(candidate: &Coordinate, waypoints: &[Waypoint], config: &ZoneConfig) -> Option<WaypointMatch> {
    let _timing = logging::start_timing("find_nearest_waypoint", OperationCategory::Classification);
    let area = classify(candidate, config);
    let eligible = without_reference_points(waypoints)
        .into_iter()
        .filter(|wp| book_area_of_id(&wp.zone_id) == Some(area));

    let ranked = sort_by_distance(candidate, eligible);
    let (nearest, distance) = *ranked.first()?;

    let confidence = if area == BookArea::XD {
        XD_MATCH_CONFIDENCE
    } else {
        let mut confidence = 1.0;
        if let Some((_, second_distance)) = ranked.get(1) {
            confidence *= if *second_distance > 0.0 {
                1.0 - distance / second_distance
            } else {
                0.0
            };
        }
        if is_transition_point(candidate, config) {
            confidence *= TRANSITION_CONFIDENCE_FACTOR;
        }
        confidence
    };

    debug!(%candidate, zone_id = %nearest.zone_id, distance, confidence, "matched nearest waypoint");
    Some(WaypointMatch {
        waypoint: nearest.clone(),
        distance,
        confidence,
    })
}

pub fn needs_verification(confidence: f64) -> bool {
    confidence < VERIFICATION_CONFIDENCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_match_is_fully_confident() {
        let waypoints = vec![Waypoint::new("3A-E", 3800, 1000), Waypoint::new("1A-W", 400, 300)];
        let found = find_nearest_waypoint(&Coordinate::new(4000, 1000), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "3A-E");
        assert_eq!(found.distance, 200.0);
        assert_eq!(found.confidence, 1.0);
        assert!(!needs_verification(found.confidence));
    }

    #[test]
    fn runner_up_reduces_confidence() {
        let waypoints = vec![Waypoint::new("3A-E", 3800, 1000), Waypoint::new("4A-E", 4400, 1000)];
        let found = find_nearest_waypoint(&Coordinate::new(4000, 1000), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "3A-E");
        assert_eq!(found.confidence, 0.5);
        assert!(needs_verification(found.confidence));
    }

    #[test]
    fn xd_candidates_only_match_xd_with_flat_confidence() {
        let waypoints = vec![Waypoint::new("9C-N", 3500, 2500), Waypoint::new("XD2", 4000, 3000)];
        let found = find_nearest_waypoint(&Coordinate::new(3500, 2500), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "XD2");
        assert_eq!(found.confidence, 0.9);
    }

    #[test]
    fn xd_runner_up_does_not_change_confidence() {
        let waypoints = vec![Waypoint::new("XD1", 3500, 2500), Waypoint::new("XD2", 3600, 2600)];
        let found = find_nearest_waypoint(&Coordinate::new(3520, 2520), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "XD1");
        assert_eq!(found.confidence, 0.9);
        assert!(!needs_verification(found.confidence));
    }

    #[test]
    fn boundary_matches_are_discounted() {
        // y = 2500 is 100 units below the north threshold
        let waypoints = vec![Waypoint::new("1A-W", 1000, 2300), Waypoint::new("2A-W", 1000, 1700)];
        let found = find_nearest_waypoint(&Coordinate::new(1000, 2500), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "1A-W");
        assert!((found.confidence - 0.75 * 0.8).abs() < 1e-12);
        assert!(needs_verification(found.confidence));

        let lone = find_nearest_waypoint(&Coordinate::new(1000, 2500), &waypoints[..1], &ZoneConfig::default()).unwrap();
        assert_eq!(lone.confidence, 0.8);
    }

    #[test]
    fn reference_points_are_never_matched() {
        let waypoints = vec![Waypoint::new("XD1", 3500, 6142), Waypoint::new("XD4", 4500, 3900)];
        let found = find_nearest_waypoint(&Coordinate::new(3500, 3000), &waypoints, &ZoneConfig::default()).unwrap();
        assert_eq!(found.waypoint.zone_id, "XD4");

        let only_reference = vec![Waypoint::new("3A-E", 4000, 6142)];
        assert_eq!(find_nearest_waypoint(&Coordinate::new(4000, 1000), &only_reference, &ZoneConfig::default()), None);
    }

    #[test]
    fn no_waypoint_in_area_means_no_match() {
        let waypoints = vec![Waypoint::new("9C-N", 1000, 3000)];
        assert_eq!(find_nearest_waypoint(&Coordinate::new(1000, 500), &waypoints, &ZoneConfig::default()), None);
    }
}
