// Map Constants
pub const MAP_MIN_X: i64 = 0;
pub const MAP_MAX_X: i64 = 4600;
pub const MAP_MIN_Y: i64 = 0;
pub const MAP_MAX_Y: i64 = 4000;
pub const DEFAULT_MAP_ID: u32 = 7;
pub const REFERENCE_POINT_Y: i64 = 6142;            // off-map calibration entries, never real docks

// Directional Book Areas
pub const MAP_CENTER_X: i64 = 2700;
pub const MAP_CENTER_Y: i64 = 2000;
pub const DIRECTIONAL_MARGIN: i64 = 600;         // y > 2600 is N, x > 3300 is E, y < 1400 is S

// XD Area (flat numbered namespace)
pub const XD_MIN_X: i64 = 3000;
pub const XD_MAX_X: i64 = 5000;
pub const XD_MIN_Y: i64 = 2000;
pub const XD_MAX_Y: i64 = 4000;

// Excluded Regions
pub const CENTRAL_LAKE_NAME: &str = "Central Lake";
pub const CENTRAL_LAKE_MIN_X: i64 = 2200;
pub const CENTRAL_LAKE_MAX_X: i64 = 3200;
pub const CENTRAL_LAKE_MIN_Y: i64 = 1800;
pub const CENTRAL_LAKE_MAX_Y: i64 = 2200;

// Neighbour Search
pub const SEARCH_RADII: [f64; 4] = [1000.0, 2000.0, 3000.0, 4000.0]; // last step is the map extent
pub const MAX_PREFIX_SUGGESTIONS: usize = 3;
pub const MAX_NEARBY_PER_PREFIX: usize = 10;
pub const MAX_XD_NEARBY: usize = 5;

// Collision Avoidance
pub const PROXIMITY_THRESHOLD: f64 = 100.0;
pub const MAX_PROBE_ITERATIONS: u32 = 10_000;

// Matcher Confidence
pub const XD_MATCH_CONFIDENCE: f64 = 0.9;               // flat, no runner-up ratio
pub const VERIFICATION_CONFIDENCE_THRESHOLD: f64 = 0.8;
pub const TRANSITION_THRESHOLD: i64 = 200;          // distance to an area boundary that counts as ambiguous
pub const TRANSITION_CONFIDENCE_FACTOR: f64 = 0.8;
