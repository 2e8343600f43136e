// src/outreach/classifier.rs

use serde::{Deserialize, Serialize};

/// Product line a lead appears to carry. Selects the wording of outreach messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFocus {
    Mens,
    Womens,
    /// Mixed or unknown range. Also the answer whenever the text is ambiguous.
    Family,
}

impl LineFocus {
    pub fn as_str(self) -> &'static str {
        match self {
            LineFocus::Mens => "mens",
            LineFocus::Womens => "womens",
            LineFocus::Family => "family",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineFocus::Mens => "Men's line",
            LineFocus::Womens => "Women's line",
            LineFocus::Family => "Family / mixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mens" => Some(LineFocus::Mens),
            "womens" => Some(LineFocus::Womens),
            "family" => Some(LineFocus::Family),
            _ => None,
        }
    }
}

const MENS_MARKERS: &[&str] = &[
    "thobe", "thawb", "jubbah", "jubba", "kandura", "dishdasha", "men's", "mens", "male",
    "brothers",
];

const WOMENS_MARKERS: &[&str] = &[
    "abaya",
    "jilbab",
    "hijab",
    "niqab",
    "women's",
    "womens",
    "female",
    "sisters",
    "modest wear",
    "modesty",
];

/// Classify free text (a bio, a company context) by marker membership.
///
/// Markers are plain substrings of the lower-cased text. Exactly one family of
/// markers present picks that line; both or neither falls back to `Family`.
pub fn detect_line_focus(text: Option<&str>) -> LineFocus {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return LineFocus::Family;
    };
    let lower = text.to_lowercase();

    let has_mens = MENS_MARKERS.iter().any(|m| lower.contains(m));
    let has_womens = WOMENS_MARKERS.iter().any(|m| lower.contains(m));

    match (has_mens, has_womens) {
        (true, false) => LineFocus::Mens,
        (false, true) => LineFocus::Womens,
        _ => LineFocus::Family,
    }
}
