use std::fmt;
use tracing::debug;

use crate::config::const_funcs::is_point_inside_any;
use crate::config::zone_config::ZoneConfig;
use crate::data::poi::{Coordinate, POI};
use crate::models::suggestion::Suggestion;
use crate::models::waypoint::{without_reference_points, Waypoint};
use crate::utils::logging::{self, OperationCategory};

/// Why a candidate coordinate cannot receive a new waypoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementRejection {
    InvalidLocation(Coordinate),
    NearExistingWaypoint { zone_id: String, distance: f64 },
    NearPendingSuggestion { zone_id: String, distance: f64 },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::InvalidLocation(coordinate) => {
                write!(f, "Coordinates {} are in an invalid location (water or unusable area)", coordinate)
            }
            PlacementRejection::NearExistingWaypoint { zone_id, distance } => {
                write!(f, "There is already a dockmaster nearby ({}, {:.1} units away)", zone_id, distance)
            }
            PlacementRejection::NearPendingSuggestion { zone_id, distance } => {
                write!(f, "There is already a pending suggestion nearby ({}, {:.1} units away)", zone_id, distance)
            }
        }
    }
}

impl std::error::Error for PlacementRejection {}

/// Inside the map bounds and outside every excluded region.
pub fn is_valid_location(coordinate: &Coordinate, config: &ZoneConfig) -> bool {
    if !config.map_bounds.contains_point(coordinate) {
        return false;
    }
    !is_point_inside_any(coordinate, &config.excluded_areas())
}

/// Caller-side guard run before asking for identifier suggestions.
///
/// Checks, in order: location validity, distance to every existing waypoint,
/// distance to every pending suggestion that carries coordinates. A distance
/// strictly below `proximity_threshold` is a collision.
pub fn check_placement(
    candidate: &Coordinate,
    waypoints: &[Waypoint],
    pending: &[Suggestion],
    config: &ZoneConfig,
) -> Result<(), PlacementRejection> {
    let _timing = logging::start_timing("check_placement", OperationCategory::PlacementCheck);

    if !is_valid_location(candidate, config) {
        debug!(%candidate, "candidate outside usable map area");
        return Err(PlacementRejection::InvalidLocation(*candidate));
    }

    let threshold = config.proximity_threshold;

    if let Some((waypoint, distance)) = without_reference_points(waypoints)
        .into_iter()
        .map(|wp| (wp, candidate.distance_to(wp.get_coordinate())))
        .find(|(_, distance)| *distance < threshold)
    {
        debug!(%candidate, zone_id = waypoint.get_id(), distance, "candidate collides with existing waypoint");
        return Err(PlacementRejection::NearExistingWaypoint {
            zone_id: waypoint.get_id().to_string(),
            distance,
        });
    }

    if let Some((suggestion, distance)) = pending
        .iter()
        .filter(|s| s.is_pending())
        .filter_map(|s| s.coordinate().map(|c| (s, candidate.distance_to(&c))))
        .find(|(_, distance)| *distance < threshold)
    {
        debug!(%candidate, zone_id = %suggestion.zone_id, distance, "candidate collides with pending suggestion");
        return Err(PlacementRejection::NearPendingSuggestion {
            zone_id: suggestion.zone_id.clone(),
            distance,
        });
    }

    Ok(())
}
