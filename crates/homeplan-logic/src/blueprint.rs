//! End-to-end blueprint generation.
//!
//! `generate_blueprint` runs the whole pipeline for one request:
//! validate → parse extras → compose floors → place each floor → geometry
//! checks → render plans. The result can be turned into the JSON response
//! shape with [`Blueprint::response`].

use serde::Serialize;

use crate::allocator::position_rooms;
use crate::composer::compose_floors;
use crate::constants::layout::PLOT_ASPECT;
use crate::error::LayoutError;
use crate::features::{parse_extra_features, ExtraFeature};
use crate::geometry::{round_to, validate_floor, GeometryIssue, Severity};
use crate::render::{floor_title, plan_floor, title_case, FloorContext, RenderPlan};
use crate::request::{HouseParams, HouseRequest};
use crate::rooms::{FloorPlacement, FloorSpec, RoomCategory};

/// Plot size for one floor of `per_floor_area` sq.ft: width × depth with a
/// fixed 1 : 1.3 aspect.
pub fn plot_dimensions(per_floor_area: f64) -> (f64, f64) {
    let width = (per_floor_area / PLOT_ASPECT).sqrt();
    (width, per_floor_area / width)
}

/// One generated floor.
#[derive(Debug, Clone)]
pub struct FloorBlueprint {
    pub spec: FloorSpec,
    pub placement: FloorPlacement,
    pub plan: RenderPlan,
    /// Warning-severity geometry findings.
    pub warnings: Vec<GeometryIssue>,
}

/// A fully generated house.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub params: HouseParams,
    pub extras: Vec<ExtraFeature>,
    pub plot_width: f64,
    pub plot_depth: f64,
    pub floors: Vec<FloorBlueprint>,
}

/// Generate every floor for `request`.
pub fn generate_blueprint(request: &HouseRequest) -> Result<Blueprint, LayoutError> {
    let params = request.to_params()?;
    let extras = parse_extra_features(&request.extra_features);
    let (plot_width, plot_depth) = plot_dimensions(params.per_floor_area());

    log::debug!(
        "Generating {}-storey {}BHK, {:.0} sq.ft on a {:.1} x {:.1} plot",
        params.floor_count,
        params.bedrooms,
        params.total_area,
        plot_width,
        plot_depth
    );

    let specs = compose_floors(&params, &extras)?;
    let floor_count = specs.len();
    let mut floors = Vec::with_capacity(floor_count);

    for (index, spec) in specs.into_iter().enumerate() {
        let placement = position_rooms(&spec.rooms, plot_width, plot_depth)?;

        let (errors, warnings): (Vec<_>, Vec<_>) = validate_floor(&placement)
            .into_iter()
            .partition(|i| i.severity == Severity::Error);
        if !errors.is_empty() {
            let detail: Vec<String> = errors.iter().map(|i| i.message.clone()).collect();
            return Err(LayoutError::Invariant(format!(
                "{}: {}",
                spec.label,
                detail.join("; ")
            )));
        }
        for w in &warnings {
            log::debug!("{}: {}", spec.label, w.message);
        }

        let plan = plan_floor(
            &placement,
            FloorContext::new(index, floor_count),
            floor_title(params.bedrooms, &params.style, &spec.label),
            spec.area,
            plot_width,
            plot_depth,
        );
        floors.push(FloorBlueprint {
            spec,
            placement,
            plan,
            warnings,
        });
    }

    Ok(Blueprint {
        params,
        extras,
        plot_width,
        plot_depth,
        floors,
    })
}

// ── Response shape ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub area: f64,
    #[serde(rename = "type")]
    pub category: RoomCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorResponse {
    pub label: String,
    pub rooms: Vec<RoomSummary>,
    pub area: f64,
    pub plan: RenderPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintResponse {
    pub floors: Vec<FloorResponse>,
    pub config: String,
    pub style: String,
    pub total_area: f64,
    pub per_floor_area: f64,
    pub plot_width: f64,
    pub plot_depth: f64,
    pub extra_features: Vec<String>,
}

/// "3BHK + 2 Bath + Garage + Balcony".
pub fn config_label(params: &HouseParams) -> String {
    let mut config = format!("{}BHK + {} Bath", params.bedrooms, params.bathrooms);
    if params.has_garage {
        config.push_str(" + Garage");
    }
    if params.has_balcony {
        config.push_str(" + Balcony");
    }
    config
}

impl Blueprint {
    pub fn response(&self) -> BlueprintResponse {
        let floors = self
            .floors
            .iter()
            .map(|f| FloorResponse {
                label: f.spec.label.clone(),
                rooms: f
                    .placement
                    .rooms()
                    .map(|r| {
                        let width = round_to(r.width, 1);
                        let length = round_to(r.height, 1);
                        RoomSummary {
                            name: r.name().to_string(),
                            width,
                            length,
                            area: (width * length).round(),
                            category: r.category(),
                        }
                    })
                    .collect(),
                area: f.spec.area.round(),
                plan: f.plan.clone(),
            })
            .collect();

        BlueprintResponse {
            floors,
            config: config_label(&self.params),
            style: title_case(&self.params.style),
            total_area: self.params.total_area,
            per_floor_area: self.params.per_floor_area().round(),
            plot_width: round_to(self.plot_width, 1),
            plot_depth: round_to(self.plot_depth, 1),
            extra_features: self.extras.iter().map(|e| e.name.clone()).collect(),
        }
    }

    /// Rooms across all floors, corridors excluded.
    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|f| f.placement.room_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_keeps_area_and_aspect() {
        let (w, d) = plot_dimensions(1300.0);
        assert!((w * d - 1300.0).abs() < 1e-9);
        assert!((d / w - PLOT_ASPECT).abs() < 1e-9);
    }

    #[test]
    fn config_labels() {
        let mut params = HouseRequest::default().to_params().unwrap();
        assert_eq!(config_label(&params), "3BHK + 2 Bath + Balcony");
        params.has_garage = true;
        params.has_balcony = false;
        assert_eq!(config_label(&params), "3BHK + 2 Bath + Garage");
    }

    #[test]
    fn default_request_generates() {
        let blueprint = generate_blueprint(&HouseRequest::default()).unwrap();
        assert_eq!(blueprint.floors.len(), 1);
        assert_eq!(blueprint.room_count(), 9);
        assert!(blueprint.floors[0].plan.entrance.is_some());
    }

    #[test]
    fn invalid_request_fails_before_placement() {
        let request = HouseRequest {
            floors: 0,
            ..HouseRequest::default()
        };
        assert_eq!(
            generate_blueprint(&request).unwrap_err(),
            LayoutError::InvalidFloorCount(0)
        );
    }

    #[test]
    fn tiny_area_reports_plot_too_small() {
        let request = HouseRequest {
            area: 10.0,
            ..HouseRequest::default()
        };
        assert!(matches!(
            generate_blueprint(&request),
            Err(LayoutError::PlotTooSmall { .. })
        ));
    }

    #[test]
    fn response_rounds_rooms() {
        let response = generate_blueprint(&HouseRequest::default())
            .unwrap()
            .response();
        for room in &response.floors[0].rooms {
            assert_eq!(round_to(room.width, 1), room.width);
            assert_eq!(room.area, (room.width * room.length).round());
        }
        assert_eq!(response.style, "Modern");
        assert_eq!(response.per_floor_area, 1200.0);
    }
}
