use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// One of the five regions used to namespace waypoint identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BookArea {
    N,
    E,
    S,
    W,
    XD,
}

impl BookArea {
    pub const ALL: [BookArea; 5] = [BookArea::N, BookArea::E, BookArea::S, BookArea::W, BookArea::XD];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookArea::N => "N",
            BookArea::E => "E",
            BookArea::S => "S",
            BookArea::W => "W",
            BookArea::XD => "XD",
        }
    }

    /// Maps a directional suffix letter to its area. XD has no suffix form.
    pub fn from_direction(direction: char) -> Option<BookArea> {
        match direction {
            'N' => Some(BookArea::N),
            'E' => Some(BookArea::E),
            'S' => Some(BookArea::S),
            'W' => Some(BookArea::W),
            _ => None,
        }
    }
}

impl FromStr for BookArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(BookArea::N),
            "E" => Ok(BookArea::E),
            "S" => Ok(BookArea::S),
            "W" => Ok(BookArea::W),
            "XD" => Ok(BookArea::XD),
            _ => Err(format!("Unknown book area: {}", s)),
        }
    }
}

impl fmt::Display for BookArea {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for area in BookArea::ALL {
            assert_eq!(area.to_string().parse::<BookArea>(), Ok(area));
        }
        assert!("NE".parse::<BookArea>().is_err());
    }

    #[test]
    fn only_compass_letters_are_directions() {
        assert_eq!(BookArea::from_direction('W'), Some(BookArea::W));
        assert_eq!(BookArea::from_direction('X'), None);
    }
}
