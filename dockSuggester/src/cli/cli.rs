use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Suggests dockmaster zone identifiers for map coordinates", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "dockmasters.tsv", help = "Waypoint dataset (.tsv or backend .json)")]
    waypoints: String,

    #[arg(short, long, help = "Backend suggestions JSON; pending entries block nearby placements")]
    pending: Option<String>,

    #[arg(short, long, requires = "y", allow_negative_numbers = true)]
    x: Option<i64>,

    #[arg(short, long, requires = "x", allow_negative_numbers = true)]
    y: Option<i64>,

    #[arg(short, long, conflicts_with_all = ["x", "y"], help = "CSV of candidate coordinates with an x,y header")]
    batch: Option<String>,

    #[arg(short, long, help = "JSON file overriding zone geometry and search limits")]
    config: Option<String>,

    #[arg(long, help = "Directory for timestamped suggestions.csv exports")]
    csv_output: Option<String>,

    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, help = "Normalize and validate a zone identifier, then exit")]
    check_id: Option<String>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn waypoints(&self) -> &str {
        &self.waypoints
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn candidate(&self) -> Option<(i64, i64)> {
        self.x.zip(self.y)
    }

    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn csv_output(&self) -> Option<&str> {
        self.csv_output.as_deref()
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn check_id(&self) -> Option<&str> {
        self.check_id.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
