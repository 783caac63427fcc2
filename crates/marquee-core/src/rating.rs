//! Rating normalization
//!
//! The backend reports ratings in two shapes: a number on the 0-5 scale
//! (movie averages) or a word token such as `"three"` / `"FOUR"` (individual
//! reviews). Both arrive through [`Rating`], and every consumer goes through
//! [`to_number`] to get the canonical value.

use serde::{Deserialize, Serialize};

/// Word tokens understood by [`to_number`], in scale order
pub const RATING_WORDS: [(&str, f64); 6] = [
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
];

/// A rating as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Word(String),
    #[default]
    Missing,
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Rating::Number(value)
    }
}

impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Rating::Word(value.to_string())
    }
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        value.map(Rating::Number).unwrap_or(Rating::Missing)
    }
}

impl Rating {
    pub fn to_number(&self) -> f64 {
        to_number(self)
    }

    pub fn format(&self) -> String {
        format_rating(self)
    }

    pub fn color_band(&self) -> ColorBand {
        color_band(self)
    }
}

/// Canonical numeric value of a rating.
///
/// Numbers pass through unchanged (non-finite numbers become 0). Words are
/// trimmed and matched case-insensitively against [`RATING_WORDS`]. Anything
/// else is 0.
pub fn to_number(rating: &Rating) -> f64 {
    match rating {
        Rating::Number(n) if n.is_finite() => *n,
        Rating::Number(_) => 0.0,
        Rating::Word(word) => {
            let normalized = word.trim().to_lowercase();
            RATING_WORDS
                .iter()
                .find(|(token, _)| *token == normalized)
                .map(|(_, value)| *value)
                .unwrap_or(0.0)
        }
        Rating::Missing => 0.0,
    }
}

/// Rating rendered with one decimal place, e.g. `"3.0"`
pub fn format_rating(rating: &Rating) -> String {
    format!("{:.1}", to_number(rating))
}

/// Whole stars to light up for a rating
pub fn rounded_stars(rating: &Rating) -> u8 {
    to_number(rating).round().clamp(0.0, 5.0) as u8
}

/// Display bucket of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBand {
    High,
    MediumHigh,
    MediumLow,
    Low,
}

impl ColorBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBand::High => "high",
            ColorBand::MediumHigh => "medium-high",
            ColorBand::MediumLow => "medium-low",
            ColorBand::Low => "low",
        }
    }
}

impl std::fmt::Display for ColorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket boundaries: >=4 high, >=3 medium-high, >=2 medium-low, else low
pub fn color_band(rating: &Rating) -> ColorBand {
    let value = to_number(rating);
    if value >= 4.0 {
        ColorBand::High
    } else if value >= 3.0 {
        ColorBand::MediumHigh
    } else if value >= 2.0 {
        ColorBand::MediumLow
    } else {
        ColorBand::Low
    }
}

// ============================================================================
// Star rating (review submission)
// ============================================================================

/// Rating token sent when submitting a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarRating {
    #[default]
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl StarRating {
    pub const ALL: [StarRating; 6] = [
        StarRating::Zero,
        StarRating::One,
        StarRating::Two,
        StarRating::Three,
        StarRating::Four,
        StarRating::Five,
    ];

    /// Star count, 0-5
    pub fn stars(&self) -> u8 {
        *self as u8
    }

    /// Star count to token; anything above five saturates
    pub fn from_stars(stars: u8) -> Self {
        Self::ALL[usize::from(stars.min(5))]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StarRating::Zero => "ZERO",
            StarRating::One => "ONE",
            StarRating::Two => "TWO",
            StarRating::Three => "THREE",
            StarRating::Four => "FOUR",
            StarRating::Five => "FIVE",
        }
    }
}

impl From<StarRating> for Rating {
    fn from(value: StarRating) -> Self {
        Rating::Word(value.as_str().to_string())
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StarRating {
    type Err = String;

    /// Accepts a digit (`"4"`) or a word token in any case (`"four"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(stars) = trimmed.parse::<u8>() {
            if stars <= 5 {
                return Ok(Self::from_stars(stars));
            }
            return Err(format!("Rating must be between 0 and 5, got {}", stars));
        }
        let normalized = trimmed.to_lowercase();
        RATING_WORDS
            .iter()
            .position(|(token, _)| *token == normalized)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| format!("Unknown rating: {}. Use 0-5 or zero..five", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number_passes_numbers_through() {
        assert_eq!(to_number(&Rating::Number(4.0)), 4.0);
        assert_eq!(to_number(&Rating::Number(3.7)), 3.7);
        assert_eq!(to_number(&Rating::Number(0.0)), 0.0);
    }

    #[test]
    fn test_to_number_words_case_and_whitespace() {
        assert_eq!(to_number(&"three".into()), 3.0);
        assert_eq!(to_number(&"FIVE".into()), 5.0);
        assert_eq!(to_number(&"  Two ".into()), 2.0);
        assert_eq!(to_number(&"zero".into()), 0.0);
    }

    #[test]
    fn test_to_number_unknown_and_missing_are_zero() {
        assert_eq!(to_number(&"bogus".into()), 0.0);
        assert_eq!(to_number(&"".into()), 0.0);
        assert_eq!(to_number(&Rating::Missing), 0.0);
        assert_eq!(to_number(&Rating::Number(f64::NAN)), 0.0);
        assert_eq!(to_number(&Rating::Number(f64::INFINITY)), 0.0);
    }

    #[test]
    fn test_to_number_stays_in_range_for_supported_inputs() {
        for (word, _) in RATING_WORDS {
            let value = to_number(&word.into());
            assert!((0.0..=5.0).contains(&value), "{} -> {}", word, value);
        }
        for tenth in 0..=50 {
            let n = tenth as f64 / 10.0;
            assert!((0.0..=5.0).contains(&to_number(&n.into())));
        }
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(&Rating::Number(4.0)), "4.0");
        assert_eq!(format_rating(&"three".into()), "3.0");
        assert_eq!(format_rating(&"bogus".into()), "0.0");
        assert_eq!(format_rating(&Rating::Missing), "0.0");
        assert_eq!(format_rating(&Rating::Number(3.66)), "3.7");
    }

    #[test]
    fn test_color_band_boundaries() {
        assert_eq!(color_band(&Rating::Number(5.0)), ColorBand::High);
        assert_eq!(color_band(&Rating::Number(4.0)), ColorBand::High);
        assert_eq!(color_band(&Rating::Number(3.99)), ColorBand::MediumHigh);
        assert_eq!(color_band(&Rating::Number(3.0)), ColorBand::MediumHigh);
        assert_eq!(color_band(&Rating::Number(2.0)), ColorBand::MediumLow);
        assert_eq!(color_band(&Rating::Number(1.99)), ColorBand::Low);
        assert_eq!(color_band(&Rating::Missing), ColorBand::Low);
        assert_eq!(color_band(&"four".into()), ColorBand::High);
        assert_eq!(ColorBand::MediumHigh.to_string(), "medium-high");
    }

    #[test]
    fn test_rating_deserializes_from_every_wire_shape() {
        let number: Rating = serde_json::from_str("4.5").unwrap();
        assert_eq!(number, Rating::Number(4.5));

        let integer: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(integer.to_number(), 3.0);

        let word: Rating = serde_json::from_str("\"FOUR\"").unwrap();
        assert_eq!(word.to_number(), 4.0);

        let null: Rating = serde_json::from_str("null").unwrap();
        assert_eq!(null, Rating::Missing);
    }

    #[test]
    fn test_rounded_stars() {
        assert_eq!(rounded_stars(&Rating::Number(3.6)), 4);
        assert_eq!(rounded_stars(&Rating::Number(2.4)), 2);
        assert_eq!(rounded_stars(&Rating::Number(9.0)), 5);
        assert_eq!(rounded_stars(&Rating::Missing), 0);
    }

    #[test]
    fn test_star_rating_parse() {
        assert_eq!("4".parse::<StarRating>().unwrap(), StarRating::Four);
        assert_eq!("three".parse::<StarRating>().unwrap(), StarRating::Three);
        assert_eq!("FIVE".parse::<StarRating>().unwrap(), StarRating::Five);
        assert!("6".parse::<StarRating>().is_err());
        assert!("great".parse::<StarRating>().is_err());
    }

    #[test]
    fn test_star_rating_wire_format() {
        let json = serde_json::to_string(&StarRating::Three).unwrap();
        assert_eq!(json, "\"THREE\"");
        assert_eq!(StarRating::from_stars(9), StarRating::Five);
        assert_eq!(StarRating::Two.stars(), 2);

        let as_rating: Rating = StarRating::Four.into();
        assert_eq!(as_rating.to_number(), 4.0);
    }
}
