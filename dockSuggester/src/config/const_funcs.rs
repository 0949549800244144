use crate::data::poi::{Coordinate, Region, POI};

pub fn is_point_inside_any(point: &Coordinate, regions: &[Region]) -> bool {
    regions.iter().any(|region| region.contains_point(point))
}

/// Pairs every point of interest with its distance from `origin`, closest first.
///
/// Sorting is stable, so equally distant points keep their input order.
pub fn sort_by_distance<'a, P: POI + 'a>(origin: &Coordinate, points: impl IntoIterator<Item = &'a P>) -> Vec<(&'a P, f64)> {
    let mut with_distance: Vec<(&P, f64)> = points
        .into_iter()
        .map(|poi| (poi, origin.distance_to(poi.get_coordinate())))
        .collect();
    with_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
    with_distance
}
