use std::fmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_MAP_ID;
use crate::data::poi::Coordinate;
use crate::models::waypoint::Waypoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for SuggestionAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuggestionAction::Add => write!(f, "add"),
            SuggestionAction::Remove => write!(f, "remove"),
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuggestionStatus::Pending => write!(f, "pending"),
            SuggestionStatus::Approved => write!(f, "approved"),
            SuggestionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    MissingCoordinates,
    NotPending { status: SuggestionStatus },
    InvalidDecision(SuggestionStatus),
}

impl fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionError::MissingCoordinates => write!(f, "X and Y coordinates are required for 'add' action"),
            SuggestionError::NotPending { status } => write!(f, "Suggestion already {}, only pending suggestions can be reviewed", status),
            SuggestionError::InvalidDecision(status) => write!(f, "Review decision must be approved or rejected, got {}", status),
        }
    }
}

impl std::error::Error for SuggestionError {}

fn default_map() -> u32 {
    DEFAULT_MAP_ID
}

fn default_enabled() -> bool {
    true
}

fn default_status() -> SuggestionStatus {
    SuggestionStatus::Pending
}

/// A user-submitted add/remove proposal and its review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub action: SuggestionAction,
    pub zone_id: String,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default = "default_map")]
    pub map: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub reason: String,
    #[serde(default)]
    pub submitter_name: Option<String>,
    #[serde(default)]
    pub submitter_discord: Option<String>,
    #[serde(default = "default_status")]
    pub status: SuggestionStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub pr_url: Option<String>,
    #[serde(default)]
    pub pr_number: Option<u64>,
    #[serde(default)]
    pub pr_error: Option<String>,
    #[serde(default)]
    pub pr_retry_count: u32,
}

impl Suggestion {
    pub fn new(id: impl Into<String>, action: SuggestionAction, zone_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action,
            zone_id: zone_id.into(),
            x: None,
            y: None,
            map: DEFAULT_MAP_ID,
            enabled: true,
            reason: reason.into(),
            submitter_name: None,
            submitter_discord: None,
            status: SuggestionStatus::Pending,
            created_at: None,
            reviewed_at: None,
            reviewed_by: None,
            admin_notes: None,
            pr_url: None,
            pr_number: None,
            pr_error: None,
            pr_retry_count: 0,
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Coordinate::new(x, y)),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SuggestionStatus::Pending
    }

    pub fn validate(&self) -> Result<(), SuggestionError> {
        if self.action == SuggestionAction::Add && self.coordinate().is_none() {
            return Err(SuggestionError::MissingCoordinates);
        }
        Ok(())
    }

    /// Moves a pending suggestion to `approved` or `rejected`.
    pub fn review(
        &mut self,
        decision: SuggestionStatus,
        reviewer: impl Into<String>,
        notes: Option<String>,
        at: NaiveDateTime,
    ) -> Result<(), SuggestionError> {
        if decision == SuggestionStatus::Pending {
            return Err(SuggestionError::InvalidDecision(decision));
        }
        if !self.is_pending() {
            return Err(SuggestionError::NotPending { status: self.status });
        }

        self.status = decision;
        self.reviewed_by = Some(reviewer.into());
        self.reviewed_at = Some(at);
        self.admin_notes = notes;
        Ok(())
    }

    pub fn record_pull_request(&mut self, url: impl Into<String>, number: u64) {
        self.pr_url = Some(url.into());
        self.pr_number = Some(number);
        self.pr_error = None;
    }

    pub fn record_pull_request_failure(&mut self, error: impl Into<String>) {
        self.pr_error = Some(error.into());
        self.pr_retry_count += 1;
    }

    /// The waypoint an `add` suggestion would introduce.
    pub fn to_waypoint(&self) -> Option<Waypoint> {
        if self.action != SuggestionAction::Add {
            return None;
        }
        self.coordinate().map(|coordinate| Waypoint {
            zone_id: self.zone_id.clone(),
            coordinate,
            map: self.map,
            enabled: self.enabled,
        })
    }
}
