//! Extra-room requests parsed from free text.
//!
//! The parser is a keyword scan over a fixed table. Output order is the
//! table's order, not the order in which words appear in the text, and each
//! canonical room name is emitted at most once.
//!
//! ```
//! use homeplan_logic::features::parse_extra_features;
//! use homeplan_logic::rooms::RoomCategory;
//!
//! let extras = parse_extra_features("I want a gym and a pooja room");
//! assert_eq!(extras[0].name, "Pooja Room");
//! assert_eq!(extras[1].category, RoomCategory::Gym);
//! ```

use serde::{Deserialize, Serialize};

use crate::rooms::RoomCategory;

/// A canonical extra room requested by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFeature {
    pub name: String,
    pub category: RoomCategory,
}

/// Keyword table: (phrase, canonical name, category). Scanned top to bottom.
pub const FEATURE_KEYWORDS: &[(&str, &str, RoomCategory)] = &[
    ("study", "Study Room", RoomCategory::Study),
    ("office", "Home Office", RoomCategory::Study),
    ("pooja", "Pooja Room", RoomCategory::Pooja),
    ("puja", "Pooja Room", RoomCategory::Pooja),
    ("prayer", "Prayer Room", RoomCategory::Pooja),
    ("utility", "Utility Room", RoomCategory::Utility),
    ("store", "Store Room", RoomCategory::Utility),
    ("laundry", "Laundry Room", RoomCategory::Utility),
    ("pantry", "Pantry", RoomCategory::Utility),
    ("servant", "Servant Room", RoomCategory::Bedroom),
    ("maid", "Maid Room", RoomCategory::Bedroom),
    ("guest", "Guest Room", RoomCategory::Bedroom),
    ("gym", "Gym", RoomCategory::Gym),
    ("library", "Library", RoomCategory::Study),
    ("home theater", "Home Theater", RoomCategory::Entertainment),
    ("media room", "Media Room", RoomCategory::Entertainment),
    ("play area", "Play Area", RoomCategory::Play),
    ("terrace", "Terrace", RoomCategory::Terrace),
    ("walk-in closet", "Walk-in Closet", RoomCategory::Closet),
];

/// Scan `text` for known keywords. Never fails; unmatched text yields `[]`.
pub fn parse_extra_features(text: &str) -> Vec<ExtraFeature> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();

    let mut found: Vec<ExtraFeature> = Vec::new();
    for &(keyword, name, category) in FEATURE_KEYWORDS {
        if lower.contains(keyword) && !found.iter().any(|f| f.name == name) {
            found.push(ExtraFeature {
                name: name.to_string(),
                category,
            });
        }
    }

    if !found.is_empty() {
        log::debug!(
            "Parsed {} extra feature(s): {}",
            found.len(),
            found
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    found
}
