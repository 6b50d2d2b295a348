//! Render hand-off — everything a drawing backend needs, as plain data.
//!
//! No pixels are produced here. A [`RenderPlan`] lists the placed rectangles
//! (corridor included) plus the derived symbols: doors, exterior windows,
//! staircase arrows, the main entrance marker and the legend.

use serde::{Deserialize, Serialize};

use crate::constants::layout::WALL_THICKNESS;
use crate::geometry::round_to;
use crate::rooms::{FloorPlacement, PlacedRoom, RoomCategory, Zone};

/// Window and door placement tolerance against the interior edge.
const EDGE_TOLERANCE: f64 = 0.1;
const MAX_DOOR_WIDTH: f64 = 2.8;
const MAX_WINDOW_LENGTH: f64 = 3.0;
const ENTRANCE_WIDTH: f64 = 4.0;

/// Compass side of a rectangle. y-up, so south is the entrance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    West,
}

/// Where a floor sits in the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorContext {
    pub is_ground_floor: bool,
    pub is_top_floor: bool,
}

impl FloorContext {
    /// Context of floor `index` (0 = ground) in a house of `floor_count` storeys.
    /// A single-storey house has a ground floor but no top floor.
    pub fn new(index: usize, floor_count: usize) -> Self {
        Self {
            is_ground_floor: index == 0,
            is_top_floor: floor_count > 1 && index + 1 == floor_count,
        }
    }

    pub fn stair_arrow(self) -> StairArrow {
        if self.is_ground_floor {
            StairArrow::Up
        } else if self.is_top_floor {
            StairArrow::Down
        } else {
            StairArrow::Both
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StairArrow {
    Up,
    Down,
    Both,
}

/// A door opening toward the corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub room: String,
    pub side: Side,
    /// Left end of the opening.
    pub x: f64,
    /// The wall line the door sits on.
    pub y: f64,
    pub width: f64,
}

/// A window on an exterior wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub room: String,
    pub side: Side,
    /// Start along the wall: x for north/south walls, y for east/west walls.
    pub start: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairMarker {
    pub room: String,
    pub arrow: StairArrow,
    /// Number of tread lines, one per foot of depth.
    pub treads: u32,
}

/// Main entrance cut into the south wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: RoomCategory,
    pub label: String,
    pub color: &'static str,
}

/// Everything needed to draw one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub title: String,
    pub subtitle: String,
    pub plot_width: f64,
    pub plot_depth: f64,
    #[serde(flatten)]
    pub context: FloorContext,
    /// Every rectangle, corridor included.
    pub rooms: Vec<PlacedRoom>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub stairs: Vec<StairMarker>,
    pub entrance: Option<Entrance>,
    pub legend: Vec<LegendEntry>,
}

/// Fill colour for a room category.
pub fn room_color(category: RoomCategory) -> &'static str {
    match category {
        RoomCategory::Living => "#2563eb",
        RoomCategory::Kitchen => "#d97706",
        RoomCategory::Dining => "#7c3aed",
        RoomCategory::Bedroom => "#059669",
        RoomCategory::Bathroom => "#0891b2",
        RoomCategory::Balcony => "#6366f1",
        RoomCategory::Garage => "#92400e",
        RoomCategory::Staircase => "#525252",
        RoomCategory::Corridor => "#334155",
        RoomCategory::Study => "#8b5cf6",
        RoomCategory::Pooja => "#eab308",
        RoomCategory::Utility => "#6b7280",
        RoomCategory::Gym => "#ef4444",
        RoomCategory::Entertainment => "#ec4899",
        RoomCategory::Terrace => "#0ea5e9",
        RoomCategory::Closet => "#a855f7",
        RoomCategory::Play => "#22c55e",
    }
}

/// Capitalise the first letter of every word and lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// "3BHK Modern Home – Ground Floor Plan"; more than five bedrooms reads "6 Bed".
pub fn floor_title(bedrooms: usize, style: &str, label: &str) -> String {
    let bhk = if bedrooms <= 5 {
        format!("{}BHK", bedrooms)
    } else {
        format!("{} Bed", bedrooms)
    };
    format!("{} {} Home  –  {}", bhk, title_case(style), label)
}

fn door_for(room: &PlacedRoom) -> Option<Door> {
    let side = match room.zone() {
        Zone::Top => Side::South,
        Zone::Bottom => Side::North,
        Zone::Mid => return None,
    };
    let y = match side {
        Side::South => room.y,
        _ => room.y + room.height,
    };
    Some(Door {
        room: room.name().to_string(),
        side,
        x: round_to(room.x + room.width * 0.35, 2),
        y: round_to(y, 2),
        width: round_to(MAX_DOOR_WIDTH.min(room.width * 0.25), 2),
    })
}

fn has_window(category: RoomCategory) -> bool {
    !matches!(
        category,
        RoomCategory::Bathroom
            | RoomCategory::Corridor
            | RoomCategory::Staircase
            | RoomCategory::Closet
    )
}

fn windows_for(room: &PlacedRoom, placement: &FloorPlacement) -> Vec<Window> {
    if !has_window(room.category()) {
        return Vec::new();
    }
    let inner = placement.interior;
    let length = MAX_WINDOW_LENGTH.min(room.width * 0.28);
    let along_x = round_to(room.x + room.width / 2.0 - length / 2.0, 2);
    let along_y = round_to(room.y + room.height / 2.0 - length / 2.0, 2);
    let length = round_to(length, 2);

    let mut windows = Vec::new();
    let mut push = |side: Side, start: f64| {
        windows.push(Window {
            room: room.name().to_string(),
            side,
            start,
            length,
        })
    };
    if room.y <= inner.y + EDGE_TOLERANCE {
        push(Side::South, along_x);
    }
    if room.y + room.height >= inner.top() - EDGE_TOLERANCE {
        push(Side::North, along_x);
    }
    if room.x <= inner.x + EDGE_TOLERANCE {
        push(Side::West, along_y);
    }
    if room.x + room.width >= inner.right() - EDGE_TOLERANCE {
        push(Side::East, along_y);
    }
    windows
}

/// Derive the render plan for one placed floor.
pub fn plan_floor(
    placement: &FloorPlacement,
    context: FloorContext,
    title: String,
    floor_area: f64,
    plot_width: f64,
    plot_depth: f64,
) -> RenderPlan {
    let doors = placement.rooms().filter_map(door_for).collect();
    let windows = placement
        .rooms()
        .flat_map(|r| windows_for(r, placement))
        .collect();

    let stairs = placement
        .rooms()
        .filter(|r| r.category() == RoomCategory::Staircase)
        .map(|r| StairMarker {
            room: r.name().to_string(),
            arrow: context.stair_arrow(),
            treads: match r.height.floor() as u32 {
                0 => 4,
                n => n,
            },
        })
        .collect();

    let entrance = context.is_ground_floor.then(|| {
        let x = placement
            .rooms()
            .find(|r| r.category() == RoomCategory::Living)
            .map_or(WALL_THICKNESS + 2.0, |living| {
                living.x + living.width * 0.4
            });
        Entrance {
            x: round_to(x, 2),
            width: ENTRANCE_WIDTH,
        }
    });

    let mut legend: Vec<LegendEntry> = Vec::new();
    for r in placement.rooms() {
        let category = r.category();
        if !legend.iter().any(|e| e.category == category) {
            legend.push(LegendEntry {
                category,
                label: category.label(),
                color: room_color(category),
            });
        }
    }

    let subtitle = format!(
        "Floor Area: {} sq.ft  |  {} Rooms  |  Plot: {}' × {}'",
        floor_area.round(),
        placement.room_count(),
        round_to(plot_width, 1),
        round_to(plot_depth, 1),
    );

    RenderPlan {
        title,
        subtitle,
        plot_width,
        plot_depth,
        context,
        rooms: placement.all().cloned().collect(),
        doors,
        windows,
        stairs,
        entrance,
        legend,
    }
}
