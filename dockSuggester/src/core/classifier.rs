use tracing::trace;

use crate::config::zone_config::ZoneConfig;
use crate::data::poi::Coordinate;
use crate::models::book_area::BookArea;

/// Assigns a map coordinate to its book area.
///
/// The XD rectangle wins outright. Otherwise the point is compared with the
/// map centre in a fixed order (north, then east, then south) and anything
/// left over, the centre included, is west. Changing that order moves the
/// boundary corners between areas.
pub fn classify(coordinate: &Coordinate, config: &ZoneConfig) -> BookArea {
    let area = if config.xd_area.contains_point(coordinate) {
        BookArea::XD
    } else {
        let center = &config.map_center;
        let margin = config.directional_margin;

        if coordinate.y > center.y + margin {
            BookArea::N
        } else if coordinate.x > center.x + margin {
            BookArea::E
        } else if coordinate.y < center.y - margin {
            BookArea::S
        } else {
            BookArea::W
        }
    };

    trace!(x = coordinate.x, y = coordinate.y, %area, "classified coordinate");
    area
}

/// Whether `coordinate` sits close enough to an area boundary that its area
/// is ambiguous.
///
/// Boundaries are the edges of the XD rectangle and the north, east and south
/// threshold lines. Within `transition_threshold` of any of them counts.
pub fn is_transition_point(coordinate: &Coordinate, config: &ZoneConfig) -> bool {
    let threshold = config.transition_threshold;
    let limit = threshold.unsigned_abs();
    let center = &config.map_center;
    let margin = config.directional_margin;

    let near_xd_edge = config.xd_area.expanded(threshold).contains_point(coordinate)
        && !config.xd_area.expanded(-threshold).contains_point(coordinate);

    let near_line = coordinate.y.abs_diff(center.y.saturating_add(margin)) <= limit
        || coordinate.x.abs_diff(center.x.saturating_add(margin)) <= limit
        || coordinate.y.abs_diff(center.y.saturating_sub(margin)) <= limit;

    near_xd_edge || near_line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i64, y: i64) -> BookArea {
        classify(&Coordinate::new(x, y), &ZoneConfig::default())
    }

    #[test]
    fn xd_rectangle_takes_priority() {
        assert_eq!(at(4000, 3000), BookArea::XD);
        assert_eq!(at(3000, 2000), BookArea::XD);
        assert_eq!(at(5000, 4000), BookArea::XD);
        assert_eq!(at(2999, 3000), BookArea::N);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(at(1000, 2600), BookArea::W);
        assert_eq!(at(1000, 2601), BookArea::N);
        assert_eq!(at(3300, 1500), BookArea::W);
        assert_eq!(at(3301, 1500), BookArea::E);
        assert_eq!(at(1000, 1400), BookArea::W);
        assert_eq!(at(1000, 1399), BookArea::S);
    }

    #[test]
    fn north_beats_east_beats_south() {
        // north and east both hold, outside the XD rectangle
        assert_eq!(at(5100, 3000), BookArea::N);
        assert_eq!(at(3400, 4001), BookArea::N);
        // east and south both hold
        assert_eq!(at(4000, 500), BookArea::E);
    }

    #[test]
    fn centre_is_west() {
        assert_eq!(at(2700, 2000), BookArea::W);
        assert_eq!(at(0, 2000), BookArea::W);
    }

    #[test]
    fn points_near_a_boundary_are_transitional() {
        let config = ZoneConfig::default();
        let near = |x, y| is_transition_point(&Coordinate::new(x, y), &config);

        // north threshold at y = 2600
        assert!(near(1000, 2500));
        assert!(near(1000, 2800));
        assert!(!near(1000, 2801));
        // east threshold at x = 3300, south at y = 1400
        assert!(near(3450, 1000));
        assert!(near(1000, 1250));
        // XD edges, from both sides
        assert!(near(2850, 3800));
        assert!(near(4900, 3500));
        assert!(!near(4000, 3000));
        assert!(!near(1000, 2000));
        assert!(!near(1000, 500));
    }

    #[test]
    fn margin_and_centre_come_from_config() {
        let config = ZoneConfig {
            map_center: Coordinate::new(1000, 1000),
            directional_margin: 100,
            ..ZoneConfig::default()
        };
        assert_eq!(classify(&Coordinate::new(500, 1101), &config), BookArea::N);
        assert_eq!(classify(&Coordinate::new(1101, 1000), &config), BookArea::E);
        assert_eq!(classify(&Coordinate::new(500, 899), &config), BookArea::S);
    }
}
