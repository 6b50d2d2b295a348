//! Integration tests for the full blueprint pipeline.
//!
//! Exercises: HouseRequest → extras parse → floor composition → placement
//! → geometry checks → render plans → JSON response.
//!
//! All tests are pure logic — no HTTP, no rendering.

use homeplan_logic::allocator::position_rooms;
use homeplan_logic::blueprint::{generate_blueprint, plot_dimensions, Blueprint};
use homeplan_logic::composer::compose_floors;
use homeplan_logic::features::parse_extra_features;
use homeplan_logic::geometry::{validate_floor, Severity};
use homeplan_logic::render::StairArrow;
use homeplan_logic::request::HouseRequest;
use homeplan_logic::rooms::{RoomCategory, Zone};
use homeplan_logic::LayoutError;

// ── Helpers ────────────────────────────────────────────────────────────

fn request(floors: i64, bedrooms: i64, bathrooms: i64) -> HouseRequest {
    HouseRequest {
        area: 1200.0 * floors as f64,
        bedrooms,
        bathrooms,
        floors,
        ..HouseRequest::default()
    }
}

fn names_in(blueprint: &Blueprint, floor: usize, zone: Zone) -> Vec<String> {
    blueprint.floors[floor]
        .placement
        .rooms()
        .filter(|r| r.zone() == zone)
        .map(|r| r.name().to_string())
        .collect()
}

// ── Reference house ────────────────────────────────────────────────────

#[test]
fn single_storey_reference_house() {
    let blueprint = generate_blueprint(&HouseRequest::default()).unwrap();
    assert_eq!(blueprint.floors.len(), 1);

    let floor = &blueprint.floors[0];
    assert_eq!(floor.placement.room_count(), 9);
    assert_eq!(
        floor
            .placement
            .all()
            .filter(|r| r.category().is_corridor())
            .count(),
        1
    );

    assert_eq!(
        names_in(&blueprint, 0, Zone::Top),
        vec![
            "Master Bedroom",
            "Bedroom 2",
            "Bedroom 3",
            "Attached Bath",
            "Bathroom 2",
            "Balcony"
        ]
    );
    assert_eq!(
        names_in(&blueprint, 0, Zone::Bottom),
        vec!["Living Room", "Dining Room", "Kitchen"]
    );
}

#[test]
fn reference_house_rows_fill_the_interior() {
    let blueprint = generate_blueprint(&HouseRequest::default()).unwrap();
    let placement = &blueprint.floors[0].placement;
    let width = placement.interior.width;

    for zone in [&placement.top, &placement.bottom] {
        for row in 0..2u8 {
            let in_row: Vec<_> = zone.iter().filter(|r| r.row == row).collect();
            if in_row.is_empty() {
                continue;
            }
            assert!(in_row.len() <= 3);
            let sum: f64 = in_row.iter().map(|r| r.width).sum();
            assert!((sum - width).abs() < 0.01, "row {row} spans {sum}, interior {width}");
        }
    }
    // six top-zone rooms split three and three
    assert_eq!(placement.top.iter().filter(|r| r.row == 0).count(), 3);
    assert_eq!(placement.top.iter().filter(|r| r.row == 1).count(), 3);
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn deterministic_output() {
    let req = HouseRequest {
        area: 2600.0,
        bedrooms: 4,
        bathrooms: 3,
        floors: 2,
        garage: true,
        extra_features: "study, gym and a pooja room".into(),
        ..HouseRequest::default()
    };
    let a = generate_blueprint(&req).unwrap();
    let b = generate_blueprint(&req).unwrap();
    for (fa, fb) in a.floors.iter().zip(&b.floors) {
        assert_eq!(fa.spec, fb.spec);
        assert_eq!(fa.placement, fb.placement);
        assert_eq!(fa.plan, fb.plan);
    }
    assert_eq!(a.response(), b.response());
}

#[test]
fn compose_then_place_is_idempotent() {
    let params = request(3, 5, 4).to_params().unwrap();
    let extras = parse_extra_features("home office, store room, terrace, play area");
    let (w, d) = plot_dimensions(params.per_floor_area());

    let first = compose_floors(&params, &extras).unwrap();
    let second = compose_floors(&params, &extras).unwrap();
    assert_eq!(first, second);
    for floor in &first {
        assert_eq!(
            position_rooms(&floor.rooms, w, d).unwrap(),
            position_rooms(&floor.rooms, w, d).unwrap()
        );
    }
}

// ── Validation ─────────────────────────────────────────────────────────

#[test]
fn invalid_floor_counts_rejected() {
    for floors in [0, 4, -1] {
        let req = HouseRequest {
            floors,
            ..HouseRequest::default()
        };
        let err = generate_blueprint(&req).unwrap_err();
        assert_eq!(err, LayoutError::InvalidFloorCount(floors));
        assert!(err.is_validation());
    }
}

#[test]
fn negative_counts_rejected() {
    let err = generate_blueprint(&request(1, -2, 2)).unwrap_err();
    assert!(matches!(err, LayoutError::NegativeCount { field: "bedrooms", .. }));
}

// ── Multi-storey ───────────────────────────────────────────────────────

#[test]
fn two_storey_layout() {
    let blueprint = generate_blueprint(&request(2, 3, 2)).unwrap();
    assert_eq!(blueprint.floors.len(), 2);

    let ground = &blueprint.floors[0];
    assert!(ground.placement.find("Living Room").is_some());
    assert!(ground.placement.find("Staircase").is_some());
    assert!(ground.plan.entrance.is_some());
    assert_eq!(ground.plan.stairs[0].arrow, StairArrow::Up);

    let first = &blueprint.floors[1];
    assert_eq!(
        names_in(&blueprint, 1, Zone::Bottom),
        vec!["Master Bedroom", "Bedroom 2", "Bedroom 3"]
    );
    assert!(first.placement.find("Attached Bath").is_some());
    assert!(first.plan.entrance.is_none());
    assert_eq!(first.plan.stairs[0].arrow, StairArrow::Down);
}

#[test]
fn three_storey_layout() {
    let blueprint = generate_blueprint(&request(3, 4, 3)).unwrap();
    assert_eq!(blueprint.floors.len(), 3);

    let middle = &blueprint.floors[1];
    assert_eq!(middle.plan.stairs[0].arrow, StairArrow::Both);
    assert_eq!(
        names_in(&blueprint, 1, Zone::Bottom),
        vec!["Master Bedroom", "Bedroom 2"]
    );

    let top = &blueprint.floors[2];
    assert_eq!(top.plan.stairs[0].arrow, StairArrow::Down);
    assert!(top.placement.find("Terrace").is_some());
    assert_eq!(
        names_in(&blueprint, 2, Zone::Bottom),
        vec!["Bedroom 3", "Bedroom 4"]
    );
}

#[test]
fn every_supported_shape_passes_geometry() {
    for floors in 1..=3 {
        for bedrooms in 0..=6 {
            for bathrooms in 0..=4 {
                for (garage, balcony) in [(false, false), (true, true)] {
                    let req = HouseRequest {
                        garage,
                        balcony,
                        extra_features: "study, utility, gym, walk-in closet".into(),
                        ..request(floors, bedrooms, bathrooms)
                    };
                    let blueprint = generate_blueprint(&req)
                        .unwrap_or_else(|e| panic!("{req:?} failed: {e}"));
                    for floor in &blueprint.floors {
                        let errors: Vec<_> = validate_floor(&floor.placement)
                            .into_iter()
                            .filter(|i| i.severity == Severity::Error)
                            .collect();
                        assert!(errors.is_empty(), "{req:?}: {errors:?}");
                    }
                }
            }
        }
    }
}

// ── Extras ─────────────────────────────────────────────────────────────

#[test]
fn extras_land_on_their_floors() {
    let req = HouseRequest {
        extra_features: "pooja room, study, gym".into(),
        ..request(2, 3, 2)
    };
    let blueprint = generate_blueprint(&req).unwrap();
    let ground = &blueprint.floors[0].placement;
    let first = &blueprint.floors[1].placement;

    assert!(ground.find("Pooja Room").is_some());
    assert!(first.find("Study Room").is_some());
    assert!(first.find("Gym").is_some());
    assert_eq!(
        blueprint.response().extra_features,
        vec!["Study Room", "Pooja Room", "Gym"]
    );
}

// ── Response shape ─────────────────────────────────────────────────────

#[test]
fn response_json_shape() {
    let req = HouseRequest {
        garage: true,
        ..HouseRequest::default()
    };
    let response = generate_blueprint(&req).unwrap().response();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["config"], "3BHK + 2 Bath + Garage + Balcony");
    assert_eq!(json["style"], "Modern");
    assert_eq!(json["totalArea"], 1200.0);
    assert_eq!(json["perFloorArea"], 1200.0);
    assert!(json["plotWidth"].is_number());
    assert!(json["plotDepth"].is_number());

    let floor = &json["floors"][0];
    assert_eq!(floor["label"], "Ground Floor Plan");
    let rooms = floor["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 10);
    assert!(rooms.iter().all(|r| r["type"] != "corridor"));
    assert!(rooms.iter().any(|r| r["type"] == "garage"));
    for room in rooms {
        for key in ["name", "width", "length", "area", "type"] {
            assert!(room.get(key).is_some(), "room missing {key}: {room}");
        }
    }
    assert_eq!(floor["plan"]["is_ground_floor"], true);
}

#[test]
fn large_single_storey_warns_instead_of_failing() {
    let blueprint = generate_blueprint(&HouseRequest {
        area: 2400.0,
        ..request(1, 5, 3)
    })
    .unwrap();
    let top = &blueprint.floors[0].placement.top;
    assert_eq!(top.len(), 9);
    assert!(blueprint.floors[0]
        .warnings
        .iter()
        .any(|w| w.category == "row_capacity"));
    assert!(blueprint.floors[0]
        .plan
        .legend
        .iter()
        .all(|e| e.category != RoomCategory::Corridor));
}
