use crate::core::batch::BatchOutcome;
use crate::core::matcher::{needs_verification, WaypointMatch};
use crate::core::suggester::PrefixSuggestion;
use crate::core::validity::PlacementRejection;
use crate::data::poi::Coordinate;
use crate::models::book_area::BookArea;

pub fn print_candidate_header(candidate: &Coordinate, book_area: BookArea) {
    println!("\nCandidate {}", candidate);
    println!("----------------------------------------");
    println!("Book area: {}", book_area);
}

pub fn print_rejection(rejection: &PlacementRejection) {
    println!("Rejected: {}", rejection);
}

pub fn print_suggestions(suggestions: &[PrefixSuggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions: no waypoints of this book area within range");
        return;
    }

    println!("Suggestions:");
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!("  {}. {} (prefix {}, closest {:.1} units)",
            rank + 1, suggestion.next_suggested, suggestion.prefix, suggestion.closest_distance);

        let nearby: Vec<String> = suggestion.nearby.iter()
            .map(|nb| format!("{} @ {:.1}", nb.waypoint.zone_id, nb.distance))
            .collect();
        if !nearby.is_empty() {
            println!("     nearby: {}", nearby.join(", "));
        }
        println!("     {} waypoint(s) share this prefix", suggestion.all_in_book_area.len());
    }
}

pub fn print_nearest_match(nearest: Option<&WaypointMatch>) {
    match nearest {
        Some(found) => {
            println!("Nearest existing: {} at {} ({:.1} units, confidence {:.2}{})",
                found.waypoint.zone_id,
                found.waypoint.coordinate,
                found.distance,
                found.confidence,
                if needs_verification(found.confidence) { ", verify manually" } else { "" });
        }
        None => println!("Nearest existing: none in this book area"),
    }
}

pub fn print_batch_summary(outcomes: &[BatchOutcome]) {
    let rejected = outcomes.iter().filter(|o| o.rejection.is_some()).count();
    let without_suggestions = outcomes.iter()
        .filter(|o| o.rejection.is_none() && o.suggestions.is_empty())
        .count();

    println!("\nBatch Summary");
    println!("----------------------------------------");
    println!("Candidates: {}", outcomes.len());
    println!("Rejected: {}", rejected);
    println!("Without suggestions: {}", without_suggestions);
    println!("With suggestions: {}", outcomes.len() - rejected - without_suggestions);
    println!("----------------------------------------");

    for outcome in outcomes {
        let detail = match (&outcome.rejection, outcome.suggestions.first()) {
            (Some(rejection), _) => format!("rejected: {}", rejection),
            (None, Some(best)) => best.next_suggested.clone(),
            (None, None) => "-".to_string(),
        };
        println!("{} [{}] {}", outcome.candidate, outcome.book_area, detail);
    }
}
