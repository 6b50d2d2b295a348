//! HomePlan Headless Layout Harness
//!
//! Sweeps the layout pipeline across every supported house shape and checks
//! the geometric guarantees. Runs entirely in-process: no HTTP, no rendering.
//!
//! Usage:
//!   cargo run -p homeplan-simtest
//!   cargo run -p homeplan-simtest -- --verbose
//!   cargo run -p homeplan-simtest -- --request house.json --json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use homeplan_logic::blueprint::{generate_blueprint, plot_dimensions};
use homeplan_logic::composer::{compose_floors, supported_floor_counts};
use homeplan_logic::cost::{
    estimate_cost, predict_budget, quote_contract, CostModel, EstimateRequest, PredictionRequest,
    QuotationRequest, RateCardModel,
};
use homeplan_logic::features::{parse_extra_features, FEATURE_KEYWORDS};
use homeplan_logic::geometry::{validate_floor, Severity};
use homeplan_logic::market::{QualityTier, CITIES};
use homeplan_logic::render::StairArrow;
use homeplan_logic::request::HouseRequest;
use homeplan_logic::rooms::{RoomCategory, Zone};
use homeplan_logic::LayoutError;

#[derive(Parser, Debug)]
#[command(name = "homeplan-simtest")]
#[command(author, version, about = "Headless sweep of the floor-plan layout engine", long_about = None)]
struct Cli {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Generate a single blueprint from a JSON request file instead of sweeping
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// With --request, print the full JSON response
    #[arg(long)]
    json: bool,
}

const EXTRAS_SAMPLES: [&str; 5] = [
    "",
    "study and pooja room",
    "home office, gym, utility, walk-in closet",
    "terrace garden, play area, library, home theater",
    "guest room, servant quarters, laundry, store, pantry, media room",
];

const AREAS: [f64; 4] = [800.0, 1200.0, 2400.0, 4000.0];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn setup_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    if let Some(path) = &cli.request {
        return run_single(path, cli.json);
    }

    println!("=== HomePlan Layout Harness ===\n");

    let model = RateCardModel;
    let mut results = Vec::new();

    // 1. Feature keyword parser
    results.extend(validate_feature_parser(cli.verbose));

    // 2. Floor composition sweep
    results.extend(validate_composition(cli.verbose));

    // 3. Placement + geometry sweep
    results.extend(validate_placement(cli.verbose));

    // 4. Render plan consistency
    results.extend(validate_render_plans(cli.verbose));

    // 5. Cost estimates over the market table
    results.extend(validate_cost_model(&model, cli.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_single(path: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    let request: HouseRequest = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse request file {}", path.display()))?;
    let blueprint = generate_blueprint(&request).context("Blueprint generation failed")?;
    let response = blueprint.response();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("Failed to serialise response")?
        );
        return Ok(());
    }

    println!("{} ({} style)", response.config, response.style);
    println!(
        "Plot {}' × {}', {} sq.ft per floor",
        response.plot_width, response.plot_depth, response.per_floor_area
    );
    for floor in &response.floors {
        println!("\n{} ({} sq.ft)", floor.label, floor.area);
        for room in &floor.rooms {
            println!(
                "  {:<18} {:>5.1} × {:<5.1} {:>5} sq.ft  [{}]",
                room.name, room.width, room.length, room.area, room.category
            );
        }
    }
    for floor in &blueprint.floors {
        for w in &floor.warnings {
            println!("warning: {}: {}", floor.spec.label, w.message);
        }
    }
    Ok(())
}

fn sweep_requests() -> Vec<HouseRequest> {
    let mut requests = Vec::new();
    for floors in supported_floor_counts() {
        for bedrooms in 0..=6 {
            for bathrooms in 0..=4 {
                for (garage, balcony) in [(false, false), (false, true), (true, false), (true, true)]
                {
                    requests.push(HouseRequest {
                        area: 1200.0 * floors as f64,
                        bedrooms,
                        bathrooms,
                        floors,
                        garage,
                        balcony,
                        ..HouseRequest::default()
                    });
                }
            }
        }
    }
    requests
}

// ── 1. Feature Parser ───────────────────────────────────────────────────

fn validate_feature_parser(verbose: bool) -> Vec<TestResult> {
    println!("--- Feature Parser ---");
    let mut results = Vec::new();

    let parsed = parse_extra_features("Pooja room, STUDY and a gym please");
    let names: Vec<&str> = parsed.iter().map(|e| e.name.as_str()).collect();
    results.push(TestResult {
        name: "parser_table_order".into(),
        passed: names == ["Study Room", "Pooja Room", "Gym"],
        detail: format!("{:?}", names),
    });

    results.push(TestResult {
        name: "parser_empty".into(),
        passed: parse_extra_features("").is_empty()
            && parse_extra_features("a swimming pool").is_empty(),
        detail: "no keywords → no extras".into(),
    });

    let deduped = parse_extra_features("pooja puja prayer");
    results.push(TestResult {
        name: "parser_dedupe".into(),
        passed: deduped.len() == 2,
        detail: format!("{} extras from synonyms", deduped.len()),
    });

    // Every keyword yields its own entry when scanned alone
    let mut every_keyword = true;
    for (keyword, name, category) in FEATURE_KEYWORDS {
        let found = parse_extra_features(keyword);
        if !found.iter().any(|e| e.name == *name && e.category == *category) {
            every_keyword = false;
            if verbose {
                println!("  keyword '{}' did not produce {}", keyword, name);
            }
        }
    }
    results.push(TestResult {
        name: "parser_every_keyword".into(),
        passed: every_keyword,
        detail: format!("{} keywords", FEATURE_KEYWORDS.len()),
    });

    results
}

// ── 2. Composition ──────────────────────────────────────────────────────

fn validate_composition(verbose: bool) -> Vec<TestResult> {
    println!("--- Floor Composition ---");
    let mut results = Vec::new();
    let requests = sweep_requests();

    let mut bad_floor_count = 0;
    let mut missing_bedrooms = 0;
    let mut corridor_in_specs = 0;
    let mut composed = 0;

    for request in &requests {
        let params = match request.to_params() {
            Ok(p) => p,
            Err(e) => {
                results.push(TestResult {
                    name: "compose_params".into(),
                    passed: false,
                    detail: format!("{:?}: {}", request, e),
                });
                continue;
            }
        };
        let floors = match compose_floors(&params, &[]) {
            Ok(f) => f,
            Err(e) => {
                results.push(TestResult {
                    name: "compose_floors".into(),
                    passed: false,
                    detail: format!("{:?}: {}", request, e),
                });
                continue;
            }
        };
        composed += 1;

        if floors.len() != params.floor_count {
            bad_floor_count += 1;
        }
        let bedrooms: usize = floors
            .iter()
            .map(|f| f.count_category(RoomCategory::Bedroom))
            .sum();
        // a remainder floor always gets at least one bedroom
        if bedrooms < params.bedrooms {
            missing_bedrooms += 1;
            if verbose {
                println!("  {:?}: only {} bedrooms", request, bedrooms);
            }
        }
        if floors
            .iter()
            .any(|f| f.rooms.iter().any(|r| r.category().is_corridor()))
        {
            corridor_in_specs += 1;
        }
    }

    results.push(TestResult {
        name: "compose_sweep".into(),
        passed: composed == requests.len(),
        detail: format!("{}/{} requests composed", composed, requests.len()),
    });
    results.push(TestResult {
        name: "compose_floor_count".into(),
        passed: bad_floor_count == 0,
        detail: format!("{} requests with wrong floor count", bad_floor_count),
    });
    results.push(TestResult {
        name: "compose_bedrooms".into(),
        passed: missing_bedrooms == 0,
        detail: format!("{} requests missing bedrooms", missing_bedrooms),
    });
    results.push(TestResult {
        name: "compose_no_corridor".into(),
        passed: corridor_in_specs == 0,
        detail: "corridor is only added by the allocator".into(),
    });

    let rejected = [0, 4, -1].iter().all(|&floors| {
        let request = HouseRequest {
            floors,
            ..HouseRequest::default()
        };
        request.to_params() == Err(LayoutError::InvalidFloorCount(floors))
    });
    results.push(TestResult {
        name: "compose_rejects_floor_counts".into(),
        passed: rejected,
        detail: "0, 4 and -1 storeys rejected".into(),
    });

    results
}

// ── 3. Placement ────────────────────────────────────────────────────────

fn validate_placement(verbose: bool) -> Vec<TestResult> {
    println!("--- Placement & Geometry ---");
    let mut results = Vec::new();

    let mut generated = 0;
    let mut failures = Vec::new();
    let mut geometry_errors = 0;
    let mut warnings = 0;
    let mut nondeterministic = 0;
    let mut corridor_count_wrong = 0;

    for base in sweep_requests() {
        for extras in EXTRAS_SAMPLES {
            for area in AREAS {
                let request = HouseRequest {
                    area: area * base.floors as f64,
                    extra_features: extras.to_string(),
                    ..base.clone()
                };
                let blueprint = match generate_blueprint(&request) {
                    Ok(b) => b,
                    Err(e) => {
                        failures.push(format!("{:?}: {}", request, e));
                        continue;
                    }
                };
                generated += 1;

                for floor in &blueprint.floors {
                    let issues = validate_floor(&floor.placement);
                    geometry_errors += issues
                        .iter()
                        .filter(|i| i.severity == Severity::Error)
                        .count();
                    warnings += floor.warnings.len();
                    if floor
                        .placement
                        .all()
                        .filter(|r| r.category().is_corridor())
                        .count()
                        != 1
                    {
                        corridor_count_wrong += 1;
                    }
                }

                if let Ok(again) = generate_blueprint(&request) {
                    if again.response() != blueprint.response() {
                        nondeterministic += 1;
                    }
                }
            }
        }
    }

    if verbose {
        for f in failures.iter().take(10) {
            println!("  failed: {}", f);
        }
    }

    results.push(TestResult {
        name: "placement_sweep".into(),
        passed: failures.is_empty(),
        detail: format!("{} blueprints, {} failures", generated, failures.len()),
    });
    results.push(TestResult {
        name: "placement_geometry".into(),
        passed: geometry_errors == 0,
        detail: format!("{} geometry errors, {} warnings", geometry_errors, warnings),
    });
    results.push(TestResult {
        name: "placement_one_corridor".into(),
        passed: corridor_count_wrong == 0,
        detail: format!("{} floors without exactly one corridor", corridor_count_wrong),
    });
    results.push(TestResult {
        name: "placement_deterministic".into(),
        passed: nondeterministic == 0,
        detail: format!("{} non-repeatable blueprints", nondeterministic),
    });

    // Reference house
    let reference = generate_blueprint(&HouseRequest::default());
    let (top, bottom) = match &reference {
        Ok(b) => (
            b.floors[0].placement.top.len(),
            b.floors[0].placement.bottom.len(),
        ),
        Err(_) => (0, 0),
    };
    results.push(TestResult {
        name: "placement_reference_house".into(),
        passed: top == 6 && bottom == 3,
        detail: format!("{} top / {} bottom rooms", top, bottom),
    });

    let (w, d) = plot_dimensions(1300.0);
    results.push(TestResult {
        name: "placement_plot_aspect".into(),
        passed: (w * d - 1300.0).abs() < 1e-6,
        detail: format!("1300 sq.ft → {:.2} × {:.2}", w, d),
    });

    results
}

// ── 4. Render plans ─────────────────────────────────────────────────────

fn validate_render_plans(_verbose: bool) -> Vec<TestResult> {
    println!("--- Render Plans ---");
    let mut results = Vec::new();

    let mut entrance_wrong = 0;
    let mut arrows_wrong = 0;
    let mut doors_wrong = 0;
    let mut legend_wrong = 0;

    for floors in supported_floor_counts() {
        let request = HouseRequest {
            floors,
            area: 1400.0 * floors as f64,
            garage: true,
            ..HouseRequest::default()
        };
        let Ok(blueprint) = generate_blueprint(&request) else {
            arrows_wrong += 1;
            continue;
        };
        let count = blueprint.floors.len();
        for (index, floor) in blueprint.floors.iter().enumerate() {
            let plan = &floor.plan;
            if plan.entrance.is_some() != (index == 0) {
                entrance_wrong += 1;
            }
            let expected = if index == 0 {
                StairArrow::Up
            } else if index + 1 == count {
                StairArrow::Down
            } else {
                StairArrow::Both
            };
            if plan.stairs.iter().any(|s| s.arrow != expected) {
                arrows_wrong += 1;
            }
            if plan.doors.len() != floor.placement.room_count() {
                doors_wrong += 1;
            }
            for door in &plan.doors {
                let Some(room) = floor.placement.find(&door.room) else {
                    doors_wrong += 1;
                    continue;
                };
                let on_corridor_side = match room.zone() {
                    Zone::Top => (door.y - room.y).abs() < 0.011,
                    Zone::Bottom => (door.y - (room.y + room.height)).abs() < 0.011,
                    Zone::Mid => false,
                };
                if !on_corridor_side {
                    doors_wrong += 1;
                }
            }
            if plan
                .legend
                .iter()
                .any(|e| e.category == RoomCategory::Corridor)
            {
                legend_wrong += 1;
            }
        }
    }

    results.push(TestResult {
        name: "render_entrance_ground_only".into(),
        passed: entrance_wrong == 0,
        detail: format!("{} misplaced entrances", entrance_wrong),
    });
    results.push(TestResult {
        name: "render_stair_arrows".into(),
        passed: arrows_wrong == 0,
        detail: format!("{} wrong arrows", arrows_wrong),
    });
    results.push(TestResult {
        name: "render_doors_face_corridor".into(),
        passed: doors_wrong == 0,
        detail: format!("{} misplaced doors", doors_wrong),
    });
    results.push(TestResult {
        name: "render_legend".into(),
        passed: legend_wrong == 0,
        detail: "corridor never in legend".into(),
    });

    results
}

// ── 5. Cost model ───────────────────────────────────────────────────────

fn validate_cost_model(model: &dyn CostModel, verbose: bool) -> Vec<TestResult> {
    println!("--- Cost Model ({}) ---", model.name());
    let mut results = Vec::new();

    let mut not_rounded = 0;
    let mut tier_order_wrong = 0;
    let mut foreign_cheaper = 0;

    for city in &CITIES {
        let mut previous = 0.0;
        for tier in [QualityTier::Basic, QualityTier::Mid, QualityTier::Premium] {
            let request = EstimateRequest {
                city: city.name.to_string(),
                area: 1500.0,
                quality: tier.to_string(),
                floors: 2,
                ..EstimateRequest::default()
            };
            let estimate = estimate_cost(model, &request);
            if estimate.estimated_cost % 1000.0 != 0.0 {
                not_rounded += 1;
            }
            if estimate.estimated_cost <= previous {
                tier_order_wrong += 1;
            }
            previous = estimate.estimated_cost;

            let foreign = estimate_cost(
                model,
                &EstimateRequest {
                    materials: "foreign".into(),
                    ..request.clone()
                },
            );
            if foreign.estimated_cost < estimate.estimated_cost {
                foreign_cheaper += 1;
            }
            if verbose {
                println!(
                    "  {:<10} {:<8} ₹{:>10} ({} / sq.ft)",
                    city.name, tier, estimate.estimated_cost, estimate.rate_per_sq_ft
                );
            }
        }
    }

    results.push(TestResult {
        name: "cost_rounded".into(),
        passed: not_rounded == 0,
        detail: "estimates rounded to ₹1000".into(),
    });
    results.push(TestResult {
        name: "cost_tier_order".into(),
        passed: tier_order_wrong == 0,
        detail: "basic < mid < premium in every city".into(),
    });
    results.push(TestResult {
        name: "cost_foreign_premium".into(),
        passed: foreign_cheaper == 0,
        detail: "foreign material never cheaper".into(),
    });

    let mut quote_faults = 0;
    let mut budget_faults = 0;
    for city in &CITIES {
        for floors in 1..=3 {
            let quote = quote_contract(
                model,
                &QuotationRequest {
                    city: city.name.to_string(),
                    area: 1800.0,
                    floors,
                    ..QuotationRequest::default()
                },
            );
            if quote.total_quote % 1000.0 != 0.0
                || quote.total_quote <= quote.base_cost
                || quote.phases.iter().any(|p| p.duration_months == 0)
            {
                quote_faults += 1;
            }

            let budget = predict_budget(
                model,
                &PredictionRequest {
                    city: city.name.to_string(),
                    area: 1800.0,
                    floors,
                    ..PredictionRequest::default()
                },
            );
            if budget.monthly_cost.len() != budget.estimated_months as usize
                || budget.total_prediction != budget.base_cost + budget.contingency_amount
                || budget.comparison.savings < 0.0
            {
                budget_faults += 1;
            }
            if verbose {
                println!(
                    "  {:<10} {} floor(s): quote ₹{} over {} months, budget ₹{}",
                    city.name,
                    floors,
                    quote.total_quote,
                    quote.timeline_months,
                    budget.total_prediction
                );
            }
        }
    }

    results.push(TestResult {
        name: "cost_quotation".into(),
        passed: quote_faults == 0,
        detail: format!("{quote_faults} quotations malformed"),
    });
    results.push(TestResult {
        name: "cost_budget".into(),
        passed: budget_faults == 0,
        detail: format!("{budget_faults} budget predictions inconsistent"),
    });

    results
}
