use rayon::prelude::*;
use serde::Serialize;

use crate::config::zone_config::ZoneConfig;
use crate::core::classifier::classify;
use crate::core::suggester::{suggest, PrefixSuggestion};
use crate::core::validity::{check_placement, PlacementRejection};
use crate::data::poi::Coordinate;
use crate::models::book_area::BookArea;
use crate::models::suggestion::Suggestion;
use crate::models::waypoint::Waypoint;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub candidate: Coordinate,
    pub book_area: BookArea,
    #[serde(serialize_with = "serialize_rejection")]
    pub rejection: Option<PlacementRejection>,
    pub suggestions: Vec<PrefixSuggestion>,
}

fn serialize_rejection<S>(rejection: &Option<PlacementRejection>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match rejection {
        Some(reason) => serializer.serialize_some(&reason.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Runs the placement guard and, if it passes, the suggester for one candidate.
pub fn evaluate_candidate(
    candidate: &Coordinate,
    waypoints: &[Waypoint],
    pending: &[Suggestion],
    config: &ZoneConfig,
) -> BatchOutcome {
    let book_area = classify(candidate, config);
    match check_placement(candidate, waypoints, pending, config) {
        Ok(()) => BatchOutcome {
            candidate: *candidate,
            book_area,
            rejection: None,
            suggestions: suggest(candidate, waypoints, config),
        },
        Err(rejection) => BatchOutcome {
            candidate: *candidate,
            book_area,
            rejection: Some(rejection),
            suggestions: Vec::new(),
        },
    }
}

/// Evaluates many candidates in parallel against the same read-only inputs.
///
/// Output order matches `candidates`. `on_done` is called once per finished
/// candidate from whichever worker finished it.
pub fn suggest_batch<F>(
    candidates: &[Coordinate],
    waypoints: &[Waypoint],
    pending: &[Suggestion],
    config: &ZoneConfig,
    on_done: F,
) -> Vec<BatchOutcome>
where
    F: Fn() + Sync + Send,
{
    let _timing = logging::start_timing("suggest_batch", OperationCategory::Other);
    candidates
        .par_iter()
        .map(|candidate| {
            let outcome = evaluate_candidate(candidate, waypoints, pending, config);
            on_done();
            outcome
        })
        .collect()
}
