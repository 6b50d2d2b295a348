//! Space allocation — turns a floor's room list into rectangles.
//!
//! The interior (plot minus walls) is cut into three horizontal bands:
//!
//! ```text
//!  +--------------------------------+  <- interior top
//!  |  top zone (52%)  back of house |
//!  +--------------------------------+
//!  |  corridor                      |
//!  +--------------------------------+
//!  |  bottom zone (48%)  entrance   |
//!  +--------------------------------+  <- y = wall
//! ```
//!
//! Each zone is filled by weight-proportional rows. A zone with more than
//! [`MAX_ROW_ROOMS`] rooms is split into an upper and a lower half-height
//! sub-row; the upper one takes the first `ceil(n/2)` rooms.
//!
//! Rounding to 0.01 is applied to row *edges* rather than to widths, so
//! neighbours share an edge exactly and a row's widths always add up to the
//! zone width.

use crate::constants::layout::{
    BOTTOM_ZONE_SHARE, CORRIDOR_FRACTION, MAX_ROW_ROOMS, MIN_CORRIDOR_HEIGHT, TOP_ZONE_SHARE,
    WALL_THICKNESS,
};
use crate::error::LayoutError;
use crate::geometry::round_to;
use crate::rooms::{FloorPlacement, PlacedRoom, Rect, RoomSpec, Zone};

fn r2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Place `rooms` on a plot of `plot_width` × `plot_depth`.
///
/// Rooms keep their zone; their order inside a zone is their left-to-right
/// order. Any corridor record in `rooms` is ignored, the allocator always
/// inserts exactly one of its own.
pub fn position_rooms(
    rooms: &[RoomSpec],
    plot_width: f64,
    plot_depth: f64,
) -> Result<FloorPlacement, LayoutError> {
    let interior_w = plot_width - 2.0 * WALL_THICKNESS;
    let interior_h = plot_depth - 2.0 * WALL_THICKNESS;
    let corridor_h = MIN_CORRIDOR_HEIGHT.max(interior_h * CORRIDOR_FRACTION);

    // Written so that NaN fails too.
    if !(interior_w > 0.0 && interior_h > corridor_h) {
        return Err(LayoutError::PlotTooSmall {
            width: plot_width,
            depth: plot_depth,
        });
    }

    let zone_h = interior_h - corridor_h;
    let bottom_h = zone_h * BOTTOM_ZONE_SHARE;
    let top_h = zone_h * TOP_ZONE_SHARE;

    // Band edges, bottom to top.
    let left = r2(WALL_THICKNESS);
    let right = r2(WALL_THICKNESS + interior_w);
    let floor_edge = r2(WALL_THICKNESS);
    let corridor_edge = r2(WALL_THICKNESS + bottom_h);
    let top_edge = r2(WALL_THICKNESS + bottom_h + corridor_h);
    let ceiling_edge = r2(WALL_THICKNESS + interior_h);

    let (top_rooms, bottom_rooms): (Vec<&RoomSpec>, Vec<&RoomSpec>) = {
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        for r in rooms {
            match r.zone() {
                Zone::Top => top.push(r),
                Zone::Bottom => bottom.push(r),
                Zone::Mid => log::debug!("Ignoring corridor record '{}'", r.name()),
            }
        }
        (top, bottom)
    };

    log::debug!(
        "Placing {} top / {} bottom rooms in {:.2}×{:.2} interior (zones {:.2} / {:.2}, corridor {:.2})",
        top_rooms.len(),
        bottom_rooms.len(),
        interior_w,
        interior_h,
        top_h,
        bottom_h,
        corridor_h,
    );

    let top = place_zone(
        &top_rooms,
        left,
        right,
        top_edge,
        ceiling_edge,
        WALL_THICKNESS + bottom_h + corridor_h + top_h / 2.0,
    );
    let bottom = place_zone(
        &bottom_rooms,
        left,
        right,
        floor_edge,
        corridor_edge,
        WALL_THICKNESS + bottom_h / 2.0,
    );

    let corridor = PlacedRoom {
        spec: RoomSpec::corridor(),
        x: left,
        y: corridor_edge,
        width: r2(right - left),
        height: r2(top_edge - corridor_edge),
        row: 0,
    };

    Ok(FloorPlacement {
        interior: Rect {
            x: left,
            y: floor_edge,
            width: r2(right - left),
            height: r2(ceiling_edge - floor_edge),
        },
        top,
        corridor,
        bottom,
    })
}

/// Fill one zone. `y0`/`y1` are the rounded zone edges; `split` is the
/// unrounded midline used when the zone needs two sub-rows.
fn place_zone(
    rooms: &[&RoomSpec],
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    split: f64,
) -> Vec<PlacedRoom> {
    if rooms.is_empty() {
        return Vec::new();
    }
    if rooms.len() <= MAX_ROW_ROOMS {
        return place_row(rooms, x0, x1, y0, y1, 0);
    }

    let mid = rooms.len().div_ceil(2);
    let split = r2(split);
    let mut placed = place_row(&rooms[..mid], x0, x1, split, y1, 0);
    placed.extend(place_row(&rooms[mid..], x0, x1, y0, split, 1));
    placed
}

/// Lay `rooms` left to right between `x0` and `x1`, widths proportional to
/// weight within this row only.
fn place_row(rooms: &[&RoomSpec], x0: f64, x1: f64, y0: f64, y1: f64, row: u8) -> Vec<PlacedRoom> {
    let total: f64 = rooms.iter().map(|r| r.weight()).sum();
    let total = if total > 0.0 { total } else { 1.0 };
    let span = x1 - x0;
    let height = r2(y1 - y0);

    let mut placed = Vec::with_capacity(rooms.len());
    let mut cumulative = 0.0;
    let mut left = x0;
    for (i, r) in rooms.iter().enumerate() {
        cumulative += r.weight();
        let right = if i + 1 == rooms.len() {
            x1
        } else {
            r2(x0 + span * cumulative / total)
        };
        placed.push(PlacedRoom {
            spec: (*r).clone(),
            x: left,
            y: y0,
            width: r2(right - left),
            height,
            row,
        });
        left = right;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{validate_floor, Severity};
    use crate::rooms::RoomCategory;
    use proptest::prelude::*;

    fn spec(name: &str, zone: Zone, weight: f64) -> RoomSpec {
        RoomSpec::new(name, RoomCategory::Bedroom, zone, weight).unwrap()
    }

    fn row_sum(rooms: &[PlacedRoom], row: u8) -> f64 {
        rooms.iter().filter(|r| r.row == row).map(|r| r.width).sum()
    }

    #[test]
    fn interior_and_bands() {
        let p = position_rooms(&[], 31.5, 41.5).unwrap();
        assert_eq!(p.interior.x, 0.75);
        assert_eq!(p.interior.y, 0.75);
        assert_eq!(p.interior.width, 30.0);
        assert_eq!(p.interior.height, 40.0);
        // 8% of 40 = 3.2 < 4.0, so the minimum applies
        assert_eq!(p.corridor.height, 4.0);
        // 36 * 0.48 = 17.28 above the wall
        assert_eq!(p.corridor.y, 18.03);
        assert_eq!(p.corridor.width, 30.0);
    }

    #[test]
    fn corridor_scales_on_deep_plots() {
        let p = position_rooms(&[], 40.0, 101.5).unwrap();
        assert_eq!(p.corridor.height, 8.0);
    }

    #[test]
    fn empty_zones_still_get_one_corridor() {
        let p = position_rooms(&[], 30.0, 40.0).unwrap();
        assert!(p.top.is_empty());
        assert!(p.bottom.is_empty());
        assert_eq!(p.all().count(), 1);
        assert!(p.corridor.category().is_corridor());
        assert_eq!(p.corridor.zone(), Zone::Mid);
        assert_eq!(p.corridor.spec.weight(), 0.0);
    }

    #[test]
    fn one_zone_empty() {
        let rooms = vec![spec("A", Zone::Top, 1.0), spec("B", Zone::Top, 1.0)];
        let p = position_rooms(&rooms, 30.0, 40.0).unwrap();
        assert_eq!(p.top.len(), 2);
        assert!(p.bottom.is_empty());
        assert_eq!(p.all().filter(|r| r.category().is_corridor()).count(), 1);
    }

    #[test]
    fn widths_follow_weights() {
        let rooms = vec![
            spec("A", Zone::Bottom, 3.5),
            spec("B", Zone::Bottom, 2.0),
            spec("C", Zone::Bottom, 2.0),
        ];
        let p = position_rooms(&rooms, 31.5, 41.5).unwrap();
        let b = &p.bottom;
        assert_eq!(b[0].width, 14.0);
        assert_eq!(b[1].width, 8.0);
        assert_eq!(b[2].width, 8.0);
        assert_eq!(b[0].x, 0.75);
        assert_eq!(b[1].x, 14.75);
        assert_eq!(b[2].x, 22.75);
        assert!(b.iter().all(|r| r.y == 0.75 && r.row == 0));
        assert!(b.iter().all(|r| (r.height - 17.28).abs() < 1e-9));
    }

    #[test]
    fn crowded_zone_splits_in_two() {
        let rooms: Vec<RoomSpec> = (0..5)
            .map(|i| spec(&format!("R{i}"), Zone::Top, 1.0))
            .collect();
        let p = position_rooms(&rooms, 30.0, 40.0).unwrap();
        let upper: Vec<&str> = p.top.iter().filter(|r| r.row == 0).map(|r| r.name()).collect();
        let lower: Vec<&str> = p.top.iter().filter(|r| r.row == 1).map(|r| r.name()).collect();
        assert_eq!(upper, vec!["R0", "R1", "R2"]);
        assert_eq!(lower, vec!["R3", "R4"]);

        let upper_y = p.top[0].y;
        let lower_y = p.top[3].y;
        assert!(upper_y > lower_y, "first rooms take the upper sub-row");
        assert!((lower_y - (p.corridor.y + p.corridor.height)).abs() < 1e-9);
        assert!((p.top[3].height + p.top[0].height - (p.interior.top() - lower_y)).abs() < 0.011);
    }

    #[test]
    fn sub_rows_weigh_independently() {
        let rooms = vec![
            spec("Big", Zone::Bottom, 10.0),
            spec("A", Zone::Bottom, 1.0),
            spec("B", Zone::Bottom, 1.0),
            spec("C", Zone::Bottom, 1.0),
        ];
        let p = position_rooms(&rooms, 31.5, 41.5).unwrap();
        // lower sub-row: B and C alone share 30ft equally
        let lower: Vec<&PlacedRoom> = p.bottom.iter().filter(|r| r.row == 1).collect();
        assert_eq!(lower.len(), 2);
        assert_eq!(lower[0].width, 15.0);
        assert_eq!(lower[1].width, 15.0);
    }

    #[test]
    fn plot_too_small() {
        assert!(matches!(
            position_rooms(&[], 1.0, 40.0),
            Err(LayoutError::PlotTooSmall { .. })
        ));
        assert!(matches!(
            position_rooms(&[], 30.0, 5.0),
            Err(LayoutError::PlotTooSmall { .. })
        ));
        assert!(position_rooms(&[], f64::NAN, 40.0).is_err());
    }

    #[test]
    fn corridor_records_are_ignored() {
        let rooms = vec![RoomSpec::corridor(), spec("A", Zone::Top, 1.0)];
        let p = position_rooms(&rooms, 30.0, 40.0).unwrap();
        assert_eq!(p.all().count(), 2);
    }

    #[test]
    fn deterministic() {
        let rooms: Vec<RoomSpec> = (0..7)
            .map(|i| spec(&format!("R{i}"), Zone::Top, 1.0 + i as f64 * 0.3))
            .collect();
        let a = position_rooms(&rooms, 27.3, 35.9).unwrap();
        let b = position_rooms(&rooms, 27.3, 35.9).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn rows_fill_the_interior(
            top in prop::collection::vec(0.1f64..5.0, 0..8),
            bottom in prop::collection::vec(0.1f64..5.0, 0..8),
            width in 10.0f64..80.0,
            depth in 10.0f64..100.0,
        ) {
            let mut rooms = Vec::new();
            for (i, w) in top.iter().enumerate() {
                rooms.push(spec(&format!("T{i}"), Zone::Top, *w));
            }
            for (i, w) in bottom.iter().enumerate() {
                rooms.push(spec(&format!("B{i}"), Zone::Bottom, *w));
            }
            let p = position_rooms(&rooms, width, depth).unwrap();

            prop_assert_eq!(p.top.len(), top.len());
            prop_assert_eq!(p.bottom.len(), bottom.len());
            prop_assert_eq!(p.all().filter(|r| r.category().is_corridor()).count(), 1);

            for zone in [&p.top, &p.bottom] {
                if zone.is_empty() {
                    continue;
                }
                let rows = if zone.len() > MAX_ROW_ROOMS { 2 } else { 1 };
                for row in 0..rows {
                    let sum = row_sum(zone, row);
                    prop_assert!((sum - p.interior.width).abs() < 0.01, "row {} sums to {}", row, sum);
                    if zone.len() <= 2 * MAX_ROW_ROOMS {
                        prop_assert!(zone.iter().filter(|r| r.row == row).count() <= MAX_ROW_ROOMS);
                    }
                }
                prop_assert!(zone.iter().all(|r| r.row < rows));
            }

            let errors: Vec<_> = validate_floor(&p)
                .into_iter()
                .filter(|i| i.severity == Severity::Error)
                .collect();
            prop_assert!(errors.is_empty(), "geometry errors: {:?}", errors);
        }
    }
}
