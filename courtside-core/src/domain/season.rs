//! NBA season identifiers (`2024-25`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A season such as `2024-25`: start year plus two-digit end year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season {
    start_year: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeasonParseError {
    #[error("season must look like YYYY-YY, got '{0}'")]
    Malformed(String),

    #[error("season '{0}' does not span consecutive years")]
    NotConsecutive(String),
}

impl Season {
    pub const fn new(start_year: u16) -> Self {
        Self { start_year }
    }

    /// Season the dashboard opens on.
    pub const fn current() -> Self {
        Self::new(2024)
    }

    /// Seasons offered in season pickers, newest first.
    pub fn known() -> [Season; 2] {
        [Self::new(2024), Self::new(2023)]
    }

    pub fn start_year(self) -> u16 {
        self.start_year
    }

    pub fn previous(self) -> Self {
        Self::new(self.start_year - 1)
    }

    pub fn next(self) -> Self {
        Self::new(self.start_year + 1)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || SeasonParseError::Malformed(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(malformed)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(malformed());
        }
        let start_year: u16 = start.parse().map_err(|_| malformed())?;
        let end_suffix: u16 = end.parse().map_err(|_| malformed())?;

        if (start_year + 1) % 100 != end_suffix {
            return Err(SeasonParseError::NotConsecutive(s.to_string()));
        }
        Ok(Self { start_year })
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_digit_suffix() {
        assert_eq!(Season::new(2024).to_string(), "2024-25");
        assert_eq!(Season::new(1999).to_string(), "1999-00");
    }

    #[test]
    fn parses_valid_seasons() {
        assert_eq!("2023-24".parse::<Season>(), Ok(Season::new(2023)));
        assert_eq!(" 1999-00 ".parse::<Season>(), Ok(Season::new(1999)));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            "2024".parse::<Season>(),
            Err(SeasonParseError::Malformed(_))
        ));
        assert!(matches!(
            "2024-2025".parse::<Season>(),
            Err(SeasonParseError::Malformed(_))
        ));
        assert!(matches!(
            "2024-27".parse::<Season>(),
            Err(SeasonParseError::NotConsecutive(_))
        ));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Season::current()).unwrap();
        assert_eq!(json, "\"2024-25\"");
        let back: Season = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Season::current());
    }

    #[test]
    fn known_is_newest_first() {
        let known = Season::known();
        assert_eq!(known[0], Season::current());
        assert_eq!(known[1], Season::current().previous());
    }
}
