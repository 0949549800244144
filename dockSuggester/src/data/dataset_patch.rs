use crate::models::suggestion::{Suggestion, SuggestionAction, SuggestionError};

fn first_field(line: &str) -> Option<&str> {
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    if line.contains('\t') {
        line.split('\t').next()
    } else {
        line.split_whitespace().next()
    }
}

/// Rewrites the dataset text so it reflects an approved suggestion.
///
/// Additions go in front of the first entry whose identifier sorts after the
/// new one; removals drop every entry with a matching identifier. Comments
/// and blank lines are kept as they were.
pub fn apply_suggestion(content: &str, suggestion: &Suggestion) -> Result<String, SuggestionError> {
    suggestion.validate()?;

    let mut lines: Vec<String> = content.trim().split('\n').map(str::to_string).collect();

    match suggestion.action {
        SuggestionAction::Add => {
            let waypoint = suggestion.to_waypoint().ok_or(SuggestionError::MissingCoordinates)?;
            let insert_at = lines
                .iter()
                .position(|line| first_field(line).is_some_and(|id| id > waypoint.zone_id.as_str()))
                .unwrap_or(lines.len());
            lines.insert(insert_at, waypoint.to_dataset_line());
        }
        SuggestionAction::Remove => {
            lines.retain(|line| first_field(line) != Some(suggestion.zone_id.as_str()));
        }
    }

    Ok(format!("{}\n", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "# dockmasters\n1A-W\t400\t300\t7\ttrue\n3B-S\t1500\t2700\t7\ttrue\nXD1\t3500\t2500\t7\ttrue\n";

    #[test]
    fn add_inserts_in_sorted_position() {
        let suggestion = Suggestion::new("s", SuggestionAction::Add, "2C-N", "new").at(100, 3000);
        let patched = apply_suggestion(DATASET, &suggestion).unwrap();
        assert_eq!(
            patched,
            "# dockmasters\n1A-W\t400\t300\t7\ttrue\n2C-N\t100\t3000\t7\ttrue\n3B-S\t1500\t2700\t7\ttrue\nXD1\t3500\t2500\t7\ttrue\n"
        );
    }

    #[test]
    fn add_after_everything_appends() {
        let suggestion = Suggestion::new("s", SuggestionAction::Add, "XD2", "new").at(3600, 2600);
        let patched = apply_suggestion(DATASET, &suggestion).unwrap();
        assert!(patched.ends_with("XD1\t3500\t2500\t7\ttrue\nXD2\t3600\t2600\t7\ttrue\n"));
    }

    #[test]
    fn remove_drops_matching_entries_only() {
        let suggestion = Suggestion::new("s", SuggestionAction::Remove, "3B-S", "gone");
        let patched = apply_suggestion(DATASET, &suggestion).unwrap();
        assert_eq!(patched, "# dockmasters\n1A-W\t400\t300\t7\ttrue\nXD1\t3500\t2500\t7\ttrue\n");
    }

    #[test]
    fn add_without_coordinates_is_refused() {
        let suggestion = Suggestion::new("s", SuggestionAction::Add, "2C-N", "new");
        assert_eq!(apply_suggestion(DATASET, &suggestion), Err(SuggestionError::MissingCoordinates));
    }
}
