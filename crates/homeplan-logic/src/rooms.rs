//! Room records — categories, zones, specs and placed rectangles.
//!
//! Every room flowing through the pipeline is a [`RoomSpec`]: a name, a
//! closed [`RoomCategory`], a [`Zone`] and a positive weight. Unknown
//! categories or zones are rejected when the record is built, never later.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::names;
use crate::error::LayoutError;

/// What a room is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Living,
    Dining,
    Kitchen,
    Bedroom,
    Bathroom,
    Balcony,
    Garage,
    Staircase,
    Corridor,
    Study,
    Pooja,
    Utility,
    Gym,
    Entertainment,
    Terrace,
    Closet,
    Play,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 17] = [
        RoomCategory::Living,
        RoomCategory::Dining,
        RoomCategory::Kitchen,
        RoomCategory::Bedroom,
        RoomCategory::Bathroom,
        RoomCategory::Balcony,
        RoomCategory::Garage,
        RoomCategory::Staircase,
        RoomCategory::Corridor,
        RoomCategory::Study,
        RoomCategory::Pooja,
        RoomCategory::Utility,
        RoomCategory::Gym,
        RoomCategory::Entertainment,
        RoomCategory::Terrace,
        RoomCategory::Closet,
        RoomCategory::Play,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomCategory::Living => "living",
            RoomCategory::Dining => "dining",
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::Bedroom => "bedroom",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::Balcony => "balcony",
            RoomCategory::Garage => "garage",
            RoomCategory::Staircase => "staircase",
            RoomCategory::Corridor => "corridor",
            RoomCategory::Study => "study",
            RoomCategory::Pooja => "pooja",
            RoomCategory::Utility => "utility",
            RoomCategory::Gym => "gym",
            RoomCategory::Entertainment => "entertainment",
            RoomCategory::Terrace => "terrace",
            RoomCategory::Closet => "closet",
            RoomCategory::Play => "play",
        }
    }

    /// Human label for legends ("Living", "Entertainment", ...).
    pub fn label(self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn is_corridor(self) -> bool {
        self == RoomCategory::Corridor
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCategory {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RoomCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| LayoutError::UnknownCategory(s.to_string()))
    }
}

/// Band of the floor a room belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Back of house, above the corridor.
    Top,
    /// Entrance side, below the corridor.
    Bottom,
    /// The corridor band itself.
    Mid,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Top => "top",
            Zone::Bottom => "bottom",
            Zone::Mid => "mid",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Zone::Top),
            "bottom" => Ok(Zone::Bottom),
            "mid" => Ok(Zone::Mid),
            _ => Err(LayoutError::UnknownZone(s.to_string())),
        }
    }
}

/// A room waiting to be placed.
///
/// Fields are private so that every instance has passed [`RoomSpec::new`]:
/// non-corridor rooms carry a finite positive weight, the corridor carries
/// weight 0 in the `mid` zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomSpecRecord")]
pub struct RoomSpec {
    name: String,
    category: RoomCategory,
    zone: Zone,
    weight: f64,
}

impl RoomSpec {
    pub fn new(
        name: impl Into<String>,
        category: RoomCategory,
        zone: Zone,
        weight: f64,
    ) -> Result<Self, LayoutError> {
        let name = name.into();
        // The corridor is the only weightless record and lives only in the mid band.
        if category.is_corridor() {
            if zone != Zone::Mid {
                return Err(LayoutError::MisplacedRoom(name));
            }
            if weight != 0.0 {
                return Err(LayoutError::InvalidWeight { name, weight });
            }
        } else {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(LayoutError::InvalidWeight { name, weight });
            }
            if zone == Zone::Mid {
                return Err(LayoutError::MisplacedRoom(name));
            }
        }
        Ok(Self {
            name,
            category,
            zone,
            weight,
        })
    }

    /// Build a spec from loosely-typed strings (e.g. a client payload).
    pub fn parse(name: &str, category: &str, zone: &str, weight: f64) -> Result<Self, LayoutError> {
        Self::new(name, category.parse()?, zone.parse()?, weight)
    }

    /// The passage separating the two zones.
    pub fn corridor() -> Self {
        Self {
            name: names::CORRIDOR.to_string(),
            category: RoomCategory::Corridor,
            zone: Zone::Mid,
            weight: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> RoomCategory {
        self.category
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Wire form of [`RoomSpec`] before validation.
#[derive(Deserialize)]
struct RoomSpecRecord {
    name: String,
    category: String,
    zone: String,
    weight: f64,
}

impl TryFrom<RoomSpecRecord> for RoomSpec {
    type Error = LayoutError;

    fn try_from(raw: RoomSpecRecord) -> Result<Self, Self::Error> {
        RoomSpec::parse(&raw.name, &raw.category, &raw.zone, raw.weight)
    }
}

/// One floor's worth of rooms, in composition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub label: String,
    pub rooms: Vec<RoomSpec>,
    /// Target floor area; informational only.
    pub area: f64,
}

impl FloorSpec {
    pub fn count_category(&self, category: RoomCategory) -> usize {
        self.rooms.iter().filter(|r| r.category() == category).count()
    }
}

/// Axis-aligned rectangle, y-up: y = 0 is the entrance side of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A room with its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    #[serde(flatten)]
    pub spec: RoomSpec,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Sub-row inside the zone: 0 for a single row, 0 (upper) / 1 (lower) when split.
    pub row: u8,
}

impl PlacedRoom {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn category(&self) -> RoomCategory {
        self.spec.category()
    }

    pub fn zone(&self) -> Zone {
        self.spec.zone()
    }
}

/// Placement of a single floor: both zones plus the one corridor between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlacement {
    /// Plot minus the outer walls.
    pub interior: Rect,
    pub top: Vec<PlacedRoom>,
    pub corridor: PlacedRoom,
    pub bottom: Vec<PlacedRoom>,
}

impl FloorPlacement {
    /// Every rectangle including the corridor, in render order.
    pub fn all(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.top
            .iter()
            .chain(std::iter::once(&self.corridor))
            .chain(self.bottom.iter())
    }

    /// Rooms shown to consumers (corridor excluded).
    pub fn rooms(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.top.iter().chain(self.bottom.iter())
    }

    pub fn room_count(&self) -> usize {
        self.top.len() + self.bottom.len()
    }

    pub fn find(&self, name: &str) -> Option<&PlacedRoom> {
        self.rooms().find(|r| r.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for c in RoomCategory::ALL {
            assert_eq!(c.as_str().parse::<RoomCategory>().unwrap(), c);
        }
        assert_eq!("  Kitchen ".parse::<RoomCategory>().unwrap(), RoomCategory::Kitchen);
    }

    #[test]
    fn unknown_category_rejected() {
        let err = "sauna".parse::<RoomCategory>().unwrap_err();
        assert_eq!(err, LayoutError::UnknownCategory("sauna".into()));
    }

    #[test]
    fn unknown_zone_rejected() {
        let err = RoomSpec::parse("Den", "study", "attic", 1.0).unwrap_err();
        assert_eq!(err, LayoutError::UnknownZone("attic".into()));
    }

    #[test]
    fn non_positive_weight_rejected() {
        assert!(RoomSpec::new("Den", RoomCategory::Study, Zone::Top, 0.0).is_err());
        assert!(RoomSpec::new("Den", RoomCategory::Study, Zone::Top, -1.0).is_err());
        assert!(RoomSpec::new("Den", RoomCategory::Study, Zone::Top, f64::NAN).is_err());
    }

    #[test]
    fn rooms_cannot_sit_in_corridor_band() {
        let err = RoomSpec::new("Den", RoomCategory::Study, Zone::Mid, 1.0).unwrap_err();
        assert_eq!(err, LayoutError::MisplacedRoom("Den".into()));
    }

    #[test]
    fn corridor_has_zero_weight() {
        let c = RoomSpec::corridor();
        assert_eq!(c.weight(), 0.0);
        assert_eq!(c.zone(), Zone::Mid);
        assert!(c.category().is_corridor());
        assert!(RoomSpec::new("Hall", RoomCategory::Corridor, Zone::Mid, 1.0).is_err());
    }

    #[test]
    fn corridor_errors_name_the_fault() {
        assert_eq!(
            RoomSpec::new("Hall", RoomCategory::Corridor, Zone::Top, 0.0).unwrap_err(),
            LayoutError::MisplacedRoom("Hall".into())
        );
        assert_eq!(
            RoomSpec::new("Hall", RoomCategory::Corridor, Zone::Mid, 2.0).unwrap_err(),
            LayoutError::InvalidWeight {
                name: "Hall".into(),
                weight: 2.0
            }
        );
        assert_eq!(
            RoomSpec::parse("Hall", "corridor", "bottom", 1.0).unwrap_err(),
            LayoutError::MisplacedRoom("Hall".into())
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: RoomSpec = serde_json::from_str(
            r#"{"name":"Gym","category":"gym","zone":"top","weight":1.3}"#,
        )
        .unwrap();
        assert_eq!(ok.category(), RoomCategory::Gym);

        let bad = serde_json::from_str::<RoomSpec>(
            r#"{"name":"Spa","category":"spa","zone":"top","weight":1.0}"#,
        );
        assert!(bad.is_err());

        let corridor: RoomSpec = serde_json::from_str(
            r#"{"name":"Hall","category":"corridor","zone":"mid","weight":0.0}"#,
        )
        .unwrap();
        assert_eq!(corridor.name(), "Hall");
        assert_eq!(corridor.weight(), 0.0);
    }

    #[test]
    fn category_label_is_capitalised() {
        assert_eq!(RoomCategory::Entertainment.label(), "Entertainment");
        assert_eq!(RoomCategory::Gym.label(), "Gym");
    }

    #[test]
    fn rect_edges() {
        let r = Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        assert_eq!(r.right(), 4.0);
        assert_eq!(r.top(), 6.0);
        assert_eq!(r.area(), 12.0);
    }
}
