use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::constants::*;
use crate::data::dataset_loader::DatasetError;
use crate::data::poi::{Coordinate, Region};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRegion {
    pub name: String,
    pub region: Region,
}

/// Tunable geometry and search limits for the zone engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub map_bounds: Region,
    pub map_center: Coordinate,
    pub directional_margin: i64,
    pub xd_area: Region,
    pub excluded_regions: Vec<ExcludedRegion>,
    pub search_radii: Vec<f64>,               // widened in order until a neighbour is found
    pub max_prefix_suggestions: usize,
    pub max_nearby_per_prefix: usize,
    pub max_xd_nearby: usize,
    pub proximity_threshold: f64,             // strict: distance < threshold collides
    pub max_probe_iterations: u32,
    pub transition_threshold: i64,            // inclusive distance to an area boundary
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            map_bounds: Region::new(MAP_MIN_X, MAP_MAX_X, MAP_MIN_Y, MAP_MAX_Y),
            map_center: Coordinate::new(MAP_CENTER_X, MAP_CENTER_Y),
            directional_margin: DIRECTIONAL_MARGIN,
            xd_area: Region::new(XD_MIN_X, XD_MAX_X, XD_MIN_Y, XD_MAX_Y),
            excluded_regions: vec![
                ExcludedRegion {
                    name: CENTRAL_LAKE_NAME.to_string(),
                    region: Region::new(
                        CENTRAL_LAKE_MIN_X,
                        CENTRAL_LAKE_MAX_X,
                        CENTRAL_LAKE_MIN_Y,
                        CENTRAL_LAKE_MAX_Y,
                    ),
                },
            ],
            search_radii: SEARCH_RADII.to_vec(),
            max_prefix_suggestions: MAX_PREFIX_SUGGESTIONS,
            max_nearby_per_prefix: MAX_NEARBY_PER_PREFIX,
            max_xd_nearby: MAX_XD_NEARBY,
            proximity_threshold: PROXIMITY_THRESHOLD,
            max_probe_iterations: MAX_PROBE_ITERATIONS,
            transition_threshold: TRANSITION_THRESHOLD,
        }
    }
}

impl ZoneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path.as_ref())?;
        let config: ZoneConfig = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %path.as_ref().display(), "loaded zone configuration");
        Ok(config)
    }

    pub fn excluded_areas(&self) -> Vec<Region> {
        self.excluded_regions.iter().map(|excluded| excluded.region).collect()
    }
}
