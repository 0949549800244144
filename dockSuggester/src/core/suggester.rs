use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::const_funcs::sort_by_distance;
use crate::config::zone_config::ZoneConfig;
use crate::core::classifier::classify;
use crate::core::zone_id::{book_area_of_id, prefix_of, xd_number, XD_PREFIX};
use crate::data::poi::Coordinate;
use crate::models::book_area::BookArea;
use crate::models::waypoint::{without_reference_points, Waypoint};
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyWaypoint {
    pub waypoint: Waypoint,
    pub distance: f64,
}

/// A proposed identifier for one prefix family near the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixSuggestion {
    pub prefix: String,
    pub next_suggested: String,
    pub book_area: BookArea,
    /// Closest members of the family, nearest first.
    pub nearby: Vec<NearbyWaypoint>,
    pub all_in_book_area: Vec<Waypoint>,
    pub closest_distance: f64,
}

/// Proposes free identifiers for a new waypoint at `candidate`.
///
/// Never fails and never touches its inputs. An empty result means the
/// candidate's book area has no waypoint to take a prefix from. The caller
/// is expected to have rejected invalid or colliding candidates already
/// (see [`crate::core::validity::check_placement`]). Reference points are
/// invisible here: they neither reserve identifiers nor count as neighbours.
pub fn suggest(candidate: &Coordinate, waypoints: &[Waypoint], config: &ZoneConfig) -> Vec<PrefixSuggestion> {
    let _timing = logging::start_timing("suggest", OperationCategory::SuggestionSearch);

    let waypoints = without_reference_points(waypoints);
    let waypoints = waypoints.as_slice();
    let area = classify(candidate, config);
    let suggestions = match area {
        BookArea::XD => vec![suggest_xd(candidate, waypoints, config)],
        _ => suggest_directional(candidate, area, waypoints, config),
    };

    debug!(
        %candidate,
        %area,
        suggested = ?suggestions.iter().map(|s| s.next_suggested.as_str()).collect::<Vec<_>>(),
        "computed zone id suggestions"
    );
    suggestions
}

fn suggest_xd(candidate: &Coordinate, waypoints: &[&Waypoint], config: &ZoneConfig) -> PrefixSuggestion {
    let xd_waypoints: Vec<&Waypoint> = waypoints
        .iter()
        .copied()
        .filter(|wp| wp.zone_id.starts_with(XD_PREFIX))
        .collect();

    let used: HashSet<u32> = xd_waypoints.iter().filter_map(|wp| xd_number(&wp.zone_id)).collect();
    // bounded by used.len() + 1 probes
    let mut next_number: u32 = 1;
    while used.contains(&next_number) {
        next_number += 1;
    }

    let ranked = sort_by_distance(candidate, xd_waypoints.iter().copied());
    let closest_distance = ranked.first().map(|(_, distance)| *distance).unwrap_or(0.0);

    PrefixSuggestion {
        prefix: XD_PREFIX.to_string(),
        next_suggested: format!("{}{}", XD_PREFIX, next_number),
        book_area: BookArea::XD,
        nearby: to_nearby(&ranked, config.max_xd_nearby),
        all_in_book_area: xd_waypoints.into_iter().cloned().collect(),
        closest_distance,
    }
}

fn suggest_directional(
    candidate: &Coordinate,
    area: BookArea,
    waypoints: &[&Waypoint],
    config: &ZoneConfig,
) -> Vec<PrefixSuggestion> {
    let area_waypoints: Vec<&Waypoint> = waypoints
        .iter()
        .copied()
        .filter(|wp| book_area_of_id(&wp.zone_id) == Some(area))
        .collect();

    if area_waypoints.is_empty() {
        debug!(%area, "no existing waypoints in book area");
        return Vec::new();
    }

    let ranked = sort_by_distance(candidate, area_waypoints.iter().copied());

    // Widen the search ring until something turns up.
    let nearby: Vec<(&Waypoint, f64)> = config
        .search_radii
        .iter()
        .map(|radius| {
            ranked
                .iter()
                .filter(|(_, distance)| *distance <= *radius)
                .copied()
                .collect::<Vec<_>>()
        })
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    // First pass: group by prefix. Second pass derives everything else.
    let mut groups: BTreeMap<&str, Vec<(&Waypoint, f64)>> = BTreeMap::new();
    for (waypoint, distance) in nearby {
        if let Some(prefix) = prefix_of(&waypoint.zone_id) {
            groups.entry(prefix).or_default().push((waypoint, distance));
        }
    }

    let existing: HashSet<&str> = waypoints.iter().copied().map(|wp| wp.zone_id.as_str()).collect();

    let mut suggestions: Vec<PrefixSuggestion> = groups
        .into_iter()
        .filter_map(|(prefix, members)| {
            let closest_distance = members
                .iter()
                .map(|(_, distance)| *distance)
                .min_by(|a, b| a.total_cmp(b))?;

            let next_suggested = match next_free_id(prefix, area, &existing, config.max_probe_iterations) {
                Ok(id) => id,
                Err(ProbeError::UnparsablePrefix) => {
                    warn!(prefix, %area, "prefix number does not fit a u64, skipping prefix");
                    return None;
                }
                Err(ProbeError::Exhausted) => {
                    warn!(prefix, %area, "no free identifier within probe limit, skipping prefix");
                    return None;
                }
            };

            let family: Vec<(&Waypoint, f64)> = ranked
                .iter()
                .filter(|(wp, _)| prefix_of(&wp.zone_id) == Some(prefix))
                .copied()
                .collect();

            Some(PrefixSuggestion {
                prefix: prefix.to_string(),
                next_suggested,
                book_area: area,
                nearby: to_nearby(&family, config.max_nearby_per_prefix),
                all_in_book_area: family.iter().map(|(wp, _)| (*wp).clone()).collect(),
                closest_distance,
            })
        })
        .collect();

    // Stable: equal distances stay in prefix order.
    suggestions.sort_by(|a, b| a.closest_distance.total_cmp(&b.closest_distance));
    suggestions.truncate(config.max_prefix_suggestions);
    suggestions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// The prefix has no letter or its number is out of range.
    UnparsablePrefix,
    /// Every identifier within the probe limit is taken.
    Exhausted,
}

/// `<prefix>-<area>` if free, else bump the prefix number until it is.
///
/// Gives up after `max_probes` increments so malformed data cannot spin.
pub fn next_free_id(prefix: &str, area: BookArea, existing: &HashSet<&str>, max_probes: u32) -> Result<String, ProbeError> {
    let direct = format!("{}-{}", prefix, area);
    if !existing.contains(direct.as_str()) {
        return Ok(direct);
    }

    let letter = prefix.chars().last().ok_or(ProbeError::UnparsablePrefix)?;
    let number: u64 = prefix[..prefix.len() - letter.len_utf8()]
        .parse()
        .map_err(|_| ProbeError::UnparsablePrefix)?;

    (1..=u64::from(max_probes))
        .filter_map(|step| number.checked_add(step))
        .map(|candidate| format!("{}{}-{}", candidate, letter, area))
        .find(|id| !existing.contains(id.as_str()))
        .ok_or(ProbeError::Exhausted)
}

fn to_nearby(ranked: &[(&Waypoint, f64)], limit: usize) -> Vec<NearbyWaypoint> {
    ranked
        .iter()
        .take(limit)
        .map(|(waypoint, distance)| NearbyWaypoint {
            waypoint: (*waypoint).clone(),
            distance: *distance,
        })
        .collect()
}
