// Main module declarations for the dockmaster zone suggester

// Zone engine modules
pub mod core {
    pub mod classifier;
    pub mod zone_id;
    pub mod validity;
    pub mod suggester;
    pub mod matcher;
    pub mod batch;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod zone_config;
}

// Model definitions
pub mod models {
    pub mod book_area;
    pub mod waypoint;
    pub mod suggestion;
}

// Data loaders and dataset formats
pub mod data {
    pub mod poi;
    pub mod dataset_loader;
    pub mod suggestions_loader;
    pub mod candidates_loader;
    pub mod dataset_patch;
}

// Reporting
pub mod analysis {
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::config::zone_config::ZoneConfig;
pub use crate::core::classifier::classify;
pub use crate::core::suggester::{suggest, NearbyWaypoint, PrefixSuggestion};
pub use crate::core::validity::{check_placement, is_valid_location, PlacementRejection};
pub use crate::core::zone_id::{book_area_of_id, ZoneId};
pub use crate::data::poi::Coordinate;
pub use crate::models::book_area::BookArea;
pub use crate::models::suggestion::Suggestion;
pub use crate::models::waypoint::Waypoint;
