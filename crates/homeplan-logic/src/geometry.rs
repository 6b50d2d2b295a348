//! Geometry validation for placed floors.
//!
//! Pure functions that take a [`FloorPlacement`] and return issues found.
//! The pipeline runs [`validate_floor`] on every floor and refuses to hand
//! out a layout with an `Error`-severity issue.

use std::collections::BTreeMap;

use crate::constants::layout::{EPSILON, MAX_ROW_ROOMS};
use crate::rooms::{FloorPlacement, PlacedRoom, Zone};

/// A geometry validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryIssue {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rooms grouped by (zone, sub-row), corridor excluded.
fn rows(placement: &FloorPlacement) -> BTreeMap<(u8, u8), Vec<&PlacedRoom>> {
    let mut rows: BTreeMap<(u8, u8), Vec<&PlacedRoom>> = BTreeMap::new();
    for r in placement.rooms() {
        let zone_key = match r.zone() {
            Zone::Top => 0,
            Zone::Bottom => 1,
            Zone::Mid => 2,
        };
        rows.entry((zone_key, r.row)).or_default().push(r);
    }
    rows
}

// ── Per-room ────────────────────────────────────────────────────────────

/// Check that no rectangle has zero or negative dimensions.
pub fn check_room_dimensions(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    for r in placement.all() {
        if r.width <= 0.0 || r.height <= 0.0 {
            issues.push(GeometryIssue {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "{} has non-positive dimensions: {}×{}",
                    r.name(),
                    r.width,
                    r.height
                ),
            });
        }
    }
    issues
}

/// Check that room aspect ratios are reasonable (< 10:1).
pub fn check_aspect_ratios(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    for r in placement.rooms() {
        if r.width <= 0.0 || r.height <= 0.0 {
            continue;
        }
        let ratio = r.width.max(r.height) / r.width.min(r.height);
        if ratio > 10.0 {
            issues.push(GeometryIssue {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "{} has extreme aspect ratio {:.1}:1 ({}×{})",
                    r.name(),
                    ratio,
                    r.width,
                    r.height
                ),
            });
        }
    }
    issues
}

/// Check every rectangle lies inside the interior.
pub fn check_within_interior(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    let inner = placement.interior;
    for r in placement.all() {
        if r.x < inner.x - EPSILON
            || r.y < inner.y - EPSILON
            || r.x + r.width > inner.right() + EPSILON
            || r.y + r.height > inner.top() + EPSILON
        {
            issues.push(GeometryIssue {
                category: "room_bounds",
                severity: Severity::Error,
                message: format!(
                    "{} extends outside interior: ({:.2},{:.2})→({:.2},{:.2})",
                    r.name(),
                    r.x,
                    r.y,
                    r.x + r.width,
                    r.y + r.height
                ),
            });
        }
    }
    issues
}

// ── Pairwise ────────────────────────────────────────────────────────────

/// AABB overlap test across every rectangle on the floor, corridor included.
/// Touching edges are allowed.
pub fn check_room_overlaps(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    let all: Vec<&PlacedRoom> = placement.all().collect();

    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            let a = all[i];
            let b = all[j];
            let overlap_x = (a.x + a.width - EPSILON) > b.x && (b.x + b.width - EPSILON) > a.x;
            let overlap_y =
                (a.y + a.height - EPSILON) > b.y && (b.y + b.height - EPSILON) > a.y;
            if overlap_x && overlap_y {
                issues.push(GeometryIssue {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!("{} and {} overlap", a.name(), b.name()),
                });
            }
        }
    }
    issues
}

// ── Rows ────────────────────────────────────────────────────────────────

/// Check each row's widths add up to the interior width.
pub fn check_row_widths(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    for ((_, row), rooms) in rows(placement) {
        let sum: f64 = rooms.iter().map(|r| r.width).sum();
        if (sum - placement.interior.width).abs() > EPSILON {
            issues.push(GeometryIssue {
                category: "row_width",
                severity: Severity::Error,
                message: format!(
                    "{} zone row {} spans {:.2}, interior is {:.2}",
                    rooms[0].zone(),
                    row,
                    sum,
                    placement.interior.width
                ),
            });
        }
    }
    issues
}

/// Check row occupancy.
///
/// A zone has at most two rows. A single-row zone holding more than the row
/// limit is an error. A split zone can only exceed the limit when it holds
/// more than two full rows' worth of rooms, which is reported as a warning.
pub fn check_row_capacity(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();
    let rows = rows(placement);
    let mut rows_per_zone: BTreeMap<u8, usize> = BTreeMap::new();
    for (zone_key, _) in rows.keys() {
        *rows_per_zone.entry(*zone_key).or_default() += 1;
    }
    for ((zone_key, row), rooms) in &rows {
        if rooms.len() > MAX_ROW_ROOMS {
            let split = rows_per_zone[zone_key] > 1;
            issues.push(GeometryIssue {
                category: "row_capacity",
                severity: if split {
                    Severity::Warning
                } else {
                    Severity::Error
                },
                message: format!(
                    "{} zone row {} holds {} rooms (max {})",
                    rooms[0].zone(),
                    row,
                    rooms.len(),
                    MAX_ROW_ROOMS
                ),
            });
        }
    }
    for (zone_key, count) in rows_per_zone {
        if count > 2 {
            issues.push(GeometryIssue {
                category: "row_capacity",
                severity: Severity::Error,
                message: format!("zone #{} split into {} rows", zone_key, count),
            });
        }
    }
    issues
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all geometry checks and return combined results.
pub fn validate_floor(placement: &FloorPlacement) -> Vec<GeometryIssue> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(placement));
    all.extend(check_aspect_ratios(placement));
    all.extend(check_within_interior(placement));
    all.extend(check_room_overlaps(placement));
    all.extend(check_row_widths(placement));
    all.extend(check_row_capacity(placement));
    all
}
