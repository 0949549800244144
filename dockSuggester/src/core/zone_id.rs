use std::fmt;
use std::str::FromStr;

use crate::models::book_area::BookArea;

pub const XD_PREFIX: &str = "XD";

/// A waypoint identifier in one of its two accepted shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// `XD<number>`, number >= 1.
    Xd(u32),
    /// `<number><letter>-<direction>`, e.g. `9C-N`.
    Directional { number: u32, letter: char, direction: BookArea },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneIdError {
    pub input: String,
}

impl fmt::Display for ZoneIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zone ID '{}' must be in format like '1A-S' or 'XD1' (caps and hyphens will be auto-formatted)",
            self.input
        )
    }
}

impl std::error::Error for ZoneIdError {}

/// Syntactic pieces of a directional identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalParts<'a> {
    pub prefix: &'a str,
    pub digits: &'a str,
    pub letter: char,
    pub direction: BookArea,
}

/// Splits `<digits><A-Z>-<NSEW>`; anything else is `None`.
pub fn split_directional(id: &str) -> Option<DirectionalParts<'_>> {
    let (prefix, suffix) = id.split_once('-')?;

    let mut suffix_chars = suffix.chars();
    let direction = BookArea::from_direction(suffix_chars.next()?)?;
    if suffix_chars.next().is_some() {
        return None;
    }

    let letter = prefix.chars().last()?;
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let digits = &prefix[..prefix.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(DirectionalParts { prefix, digits, letter, direction })
}

/// Book area an identifier belongs to, or `None` when it fits neither grammar.
///
/// Anything starting with `XD` counts as XD, matching how the dataset has
/// always been bucketed even for malformed entries like `XD-1`.
pub fn book_area_of_id(id: &str) -> Option<BookArea> {
    if id.starts_with(XD_PREFIX) {
        return Some(BookArea::XD);
    }
    split_directional(id).map(|parts| parts.direction)
}

/// The `<digits><letter>` part before the dash.
pub fn prefix_of(id: &str) -> Option<&str> {
    split_directional(id).map(|parts| parts.prefix)
}

/// The number of a well-formed `XD<n>` identifier with n >= 1.
pub fn xd_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix(XD_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

impl ZoneId {
    pub fn parse(id: &str) -> Option<ZoneId> {
        if let Some(number) = xd_number(id) {
            return Some(ZoneId::Xd(number));
        }
        let parts = split_directional(id)?;
        let number = parts.digits.parse::<u32>().ok()?;
        Some(ZoneId::Directional { number, letter: parts.letter, direction: parts.direction })
    }

    pub fn book_area(&self) -> BookArea {
        match self {
            ZoneId::Xd(_) => BookArea::XD,
            ZoneId::Directional { direction, .. } => *direction,
        }
    }

    pub fn prefix(&self) -> String {
        match self {
            ZoneId::Xd(_) => XD_PREFIX.to_string(),
            ZoneId::Directional { number, letter, .. } => format!("{}{}", number, letter),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Xd(number) => write!(f, "{}{}", XD_PREFIX, number),
            ZoneId::Directional { number, letter, direction } => write!(f, "{}{}-{}", number, letter, direction),
        }
    }
}

impl FromStr for ZoneId {
    type Err = ZoneIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneId::parse(s).ok_or_else(|| ZoneIdError { input: s.to_string() })
    }
}

/// Brings hand-typed identifiers into canonical form.
///
/// `xd-3`, `XD 3` become `XD3`; `1as`, `1A-s` become `1A-S`. Trailing text
/// after a recognised identifier is dropped. Input matching neither shape
/// comes back trimmed and uppercased.
pub fn normalize_zone_id(raw: &str) -> String {
    let cleaned = raw.trim().to_uppercase();

    if let Some(rest) = cleaned.strip_prefix(XD_PREFIX) {
        let rest = rest.strip_prefix('-').unwrap_or(rest).trim_start();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            return format!("{}{}", XD_PREFIX, digits);
        }
    }

    let digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        let rest: Vec<char> = cleaned[digits.len()..].chars().collect();
        if let Some((letter, direction)) = match_letter_and_direction(&rest) {
            return format!("{}{}-{}", digits, letter.map(String::from).unwrap_or_default(), direction);
        }
    }

    cleaned
}

// `[A-Z]?-?[NSEW]`, preferring to consume a letter when both readings fit.
fn match_letter_and_direction(rest: &[char]) -> Option<(Option<char>, char)> {
    let direction_after = |start: usize| -> Option<char> {
        let mut idx = start;
        if rest.get(idx) == Some(&'-') {
            idx += 1;
        }
        rest.get(idx).copied().filter(|c| BookArea::from_direction(*c).is_some())
    };

    if let Some(letter) = rest.first().copied().filter(|c| c.is_ascii_uppercase()) {
        if let Some(direction) = direction_after(1) {
            return Some((Some(letter), direction));
        }
    }
    direction_after(0).map(|direction| (None, direction))
}

/// Normalises and then insists on the strict identifier grammar.
pub fn validate_zone_id(raw: &str) -> Result<String, ZoneIdError> {
    let normalized = normalize_zone_id(raw);
    match ZoneId::parse(&normalized) {
        Some(_) => Ok(normalized),
        None => Err(ZoneIdError { input: raw.to_string() }),
    }
}
