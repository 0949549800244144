use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_MAP_ID, REFERENCE_POINT_Y};
use crate::data::poi::{Coordinate, POI};

fn default_enabled() -> bool {
    true
}

fn default_map() -> u32 {
    DEFAULT_MAP_ID
}

/// A named dockmaster waypoint from the canonical dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub zone_id: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default = "default_map")]
    pub map: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Waypoint {
    pub fn new(zone_id: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            zone_id: zone_id.into(),
            coordinate: Coordinate::new(x, y),
            map: DEFAULT_MAP_ID,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Calibration entries parked off the map. They stay in the dataset but
    /// take no part in placement, matching or numbering.
    pub fn is_reference_point(&self) -> bool {
        self.coordinate.y == REFERENCE_POINT_Y
    }

    /// The line this waypoint occupies in the canonical tab-separated dataset.
    pub fn to_dataset_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.zone_id, self.coordinate.x, self.coordinate.y, self.map, self.enabled
        )
    }
}

/// Waypoints that take part in zone work, in dataset order.
pub fn without_reference_points(waypoints: &[Waypoint]) -> Vec<&Waypoint> {
    waypoints.iter().filter(|wp| !wp.is_reference_point()).collect()
}

impl POI for Waypoint {
    fn get_coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    fn get_id(&self) -> &str {
        &self.zone_id
    }
}
