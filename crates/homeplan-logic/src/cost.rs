//! Cost estimation boundary.
//!
//! The layout core never calls into this module. A [`CostModel`] is built
//! once by the host and passed by reference into [`estimate_cost`].

use serde::{Deserialize, Serialize};

use crate::market::{city_index, city_or_default, MaterialSource, QualityTier, CITIES};
use crate::render::title_case;

/// Share of the total cost per trade, in a fixed order.
pub const COST_BREAKDOWN: [(&str, f64); 11] = [
    ("foundation", 0.12),
    ("structure", 0.18),
    ("brickwork", 0.10),
    ("plumbing", 0.08),
    ("electrical", 0.07),
    ("flooring", 0.10),
    ("doors_windows", 0.08),
    ("painting", 0.05),
    ("kitchen", 0.06),
    ("bathroom", 0.06),
    ("miscellaneous", 0.10),
];

const FOREIGN_MATERIAL_FACTOR: f64 = 1.35;
const PER_EXTRA_FLOOR: f64 = 0.08;

/// Numeric model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostFeatures {
    pub city_index: usize,
    pub area: f64,
    pub quality_index: u8,
    pub material_index: u8,
    pub floor_count: u32,
}

/// A construction cost predictor.
pub trait CostModel: Send + Sync {
    /// Predicted total cost in rupees.
    fn predict(&self, features: &CostFeatures) -> f64;

    fn name(&self) -> &str;
}

/// Deterministic model driven by the market rate table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateCardModel;

impl CostModel for RateCardModel {
    fn predict(&self, f: &CostFeatures) -> f64 {
        let city = CITIES.get(f.city_index).unwrap_or(&CITIES[0]);
        let tier = match f.quality_index {
            0 => QualityTier::Basic,
            2 => QualityTier::Premium,
            _ => QualityTier::Mid,
        };
        let material = if f.material_index == 0 {
            1.0
        } else {
            FOREIGN_MATERIAL_FACTOR
        };
        let storeys = 1.0 + f.floor_count.saturating_sub(1) as f64 * PER_EXTRA_FLOOR;
        f.area * city.band(tier).avg * material * storeys * city.labor_index
    }

    fn name(&self) -> &str {
        "Rate Card"
    }
}

/// An estimate request; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    pub city: String,
    pub area: f64,
    pub quality: String,
    pub materials: String,
    pub floors: u32,
}

impl Default for EstimateRequest {
    fn default() -> Self {
        Self {
            city: "bangalore".to_string(),
            area: 1200.0,
            quality: "mid".to_string(),
            materials: "indian".to_string(),
            floors: 1,
        }
    }
}

impl EstimateRequest {
    pub fn features(&self) -> CostFeatures {
        cost_features(
            &self.city,
            self.area,
            &self.quality,
            MaterialSource::from_label(&self.materials),
            self.floors,
        )
    }
}

fn cost_features(
    city: &str,
    area: f64,
    quality: &str,
    material: MaterialSource,
    floors: u32,
) -> CostFeatures {
    CostFeatures {
        city_index: city_index(city),
        area,
        quality_index: QualityTier::from_label(quality).index(),
        material_index: material.index(),
        floor_count: floors,
    }
}

fn per_sq_ft(amount: f64, area: f64) -> f64 {
    if area > 0.0 {
        (amount / area).round()
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketRange {
    pub low: f64,
    pub high: f64,
}

/// One trade's share of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub trade: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub estimated_cost: f64,
    pub rate_per_sq_ft: f64,
    pub breakdown: Vec<BreakdownLine>,
    pub market_range: MarketRange,
    pub tips: Vec<String>,
    pub model_type: String,
}

/// Round to the nearest thousand.
fn round_thousand(value: f64) -> f64 {
    (value / 1000.0).round() * 1000.0
}

fn tips_for(request: &EstimateRequest, tier: QualityTier, material: MaterialSource) -> Vec<String> {
    let city = title_case(&request.city);
    let mut tips = Vec::new();
    if material == MaterialSource::Foreign && tier != QualityTier::Premium {
        tips.push("Foreign materials with non-premium finish may not be cost-effective.".to_string());
    }
    if request.area > 2500.0 && request.floors == 1 {
        tips.push(format!(
            "With {} sq.ft on 1 floor, multi-storey could cut foundation costs ~20%.",
            request.area
        ));
    }
    if request.city == "mumbai" {
        tips.push("Budget an extra 3-5% for monsoon waterproofing in Mumbai.".to_string());
    }
    if tier == QualityTier::Premium {
        tips.push(format!(
            "Premium in {city} typically includes Italian marble, modular kitchen & smart home."
        ));
    }
    if tips.is_empty() {
        let band = city_or_default(&request.city).band(tier);
        tips.push(format!(
            "Current {tier} rate in {city}: ₹{}–₹{}/sq.ft.",
            band.min, band.max
        ));
    }
    tips
}

/// Estimate the cost of a build with the given model.
pub fn estimate_cost(model: &dyn CostModel, request: &EstimateRequest) -> CostEstimate {
    let features = request.features();
    let estimated = round_thousand(model.predict(&features));
    log::debug!(
        "{} estimate for {} sq.ft in {}: {}",
        model.name(),
        request.area,
        request.city,
        estimated
    );

    let tier = QualityTier::from_label(&request.quality);
    let material = MaterialSource::from_label(&request.materials);
    let band = city_or_default(&request.city).band(tier);

    let rate_per_sq_ft = per_sq_ft(estimated, request.area);

    CostEstimate {
        estimated_cost: estimated,
        rate_per_sq_ft,
        breakdown: COST_BREAKDOWN
            .iter()
            .map(|&(trade, share)| BreakdownLine {
                trade,
                amount: (estimated * share).round(),
            })
            .collect(),
        market_range: MarketRange {
            low: request.area * band.min,
            high: request.area * band.max,
        },
        tips: tips_for(request, tier, material),
        model_type: model.name().to_string(),
    }
}

// ── Contractor quotation ────────────────────────────────────────────────

const LABOR_OVERHEAD: f64 = 0.08;
const SUPERVISION: f64 = 0.05;
const PERMITS: f64 = 0.03;

/// Construction phases with their share of the base cost.
pub const CONSTRUCTION_PHASES: [(&str, f64); 7] = [
    ("Site Preparation & Foundation", 0.15),
    ("Structural Work (RCC)", 0.25),
    ("Brickwork & Plastering", 0.15),
    ("Plumbing & Electrical", 0.12),
    ("Flooring & Tiling", 0.13),
    ("Finishing & Painting", 0.10),
    ("Doors, Windows & Fixtures", 0.10),
];

/// A contractor quotation request. Quotes always price Indian material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationRequest {
    pub city: String,
    pub area: f64,
    pub quality: String,
    /// Contractor profit, percent of base cost.
    pub margin: f64,
    pub floors: u32,
}

impl Default for QuotationRequest {
    fn default() -> Self {
        Self {
            city: "bangalore".to_string(),
            area: 1200.0,
            quality: "mid".to_string(),
            margin: 15.0,
            floors: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub name: &'static str,
    pub duration_months: u32,
    pub cost: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub base_cost: f64,
    pub labor_overhead: f64,
    pub supervision: f64,
    pub permits: f64,
    pub profit: f64,
    pub margin: f64,
    pub total_quote: f64,
    pub timeline_months: u32,
    pub phases: Vec<Phase>,
    pub rate_per_sq_ft: f64,
}

/// Build time in months: six, plus extra for large plots, upper storeys and
/// premium finish.
pub fn build_months(area: f64, floors: u32, tier: QualityTier) -> u32 {
    let mut months = 6;
    if area > 2000.0 {
        months += 3;
    }
    if area > 3500.0 {
        months += 3;
    }
    months += 2 * floors.saturating_sub(1);
    if tier == QualityTier::Premium {
        months += 2;
    }
    months
}

/// Price a build as a contractor would: base cost plus overheads and margin.
pub fn quote_contract(model: &dyn CostModel, request: &QuotationRequest) -> Quotation {
    let tier = QualityTier::from_label(&request.quality);
    let features = cost_features(
        &request.city,
        request.area,
        &request.quality,
        MaterialSource::Indian,
        request.floors,
    );
    let base = round_thousand(model.predict(&features));

    let labor_overhead = (base * LABOR_OVERHEAD).round();
    let supervision = (base * SUPERVISION).round();
    let permits = (base * PERMITS).round();
    let profit = (base * request.margin / 100.0).round();
    let total_quote = round_thousand(base + labor_overhead + supervision + permits + profit);

    let timeline_months = build_months(request.area, request.floors, tier);
    let phases = CONSTRUCTION_PHASES
        .iter()
        .map(|&(name, share)| Phase {
            name,
            duration_months: ((timeline_months as f64 * share).round() as u32).max(1),
            cost: (base * share).round(),
            percentage: (share * 100.0).round(),
        })
        .collect();

    log::debug!(
        "{} quote for {} sq.ft in {}: {} over {} months",
        model.name(),
        request.area,
        request.city,
        total_quote,
        timeline_months
    );

    Quotation {
        base_cost: base,
        labor_overhead,
        supervision,
        permits,
        profit,
        margin: request.margin,
        total_quote,
        timeline_months,
        phases,
        rate_per_sq_ft: per_sq_ft(total_quote, request.area),
    }
}

// ── Budget prediction ───────────────────────────────────────────────────

/// Budget categories with their share of the base cost.
pub const BUDGET_CATEGORIES: [(&str, f64); 7] = [
    ("Foundation & Structure", 0.30),
    ("Finishing & Interiors", 0.25),
    ("Plumbing & Electrical", 0.15),
    ("Flooring & Tiling", 0.10),
    ("Doors & Windows", 0.08),
    ("Painting & Exterior", 0.07),
    ("Miscellaneous", 0.05),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRequest {
    pub city: String,
    pub area: f64,
    pub quality: String,
    /// Reserve on top of the base cost, percent.
    pub contingency: f64,
    pub floors: u32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            city: "bangalore".to_string(),
            area: 1200.0,
            quality: "mid".to_string(),
            contingency: 15.0,
            floors: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyCost {
    pub month: u32,
    pub cost: f64,
}

/// Indian versus foreign material for the same build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialComparison {
    pub indian: f64,
    pub foreign: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPrediction {
    pub base_cost: f64,
    pub contingency: f64,
    pub contingency_amount: f64,
    pub total_prediction: f64,
    pub rate_per_sq_ft: f64,
    pub categories: Vec<BreakdownLine>,
    pub monthly_cost: Vec<MonthlyCost>,
    pub estimated_months: u32,
    pub comparison: MaterialComparison,
}

/// Months a build is spread over for cash-flow planning.
pub fn projection_months(area: f64, floors: u32) -> u32 {
    let thousands = if area > 0.0 {
        (area / 1000.0).floor() as u32
    } else {
        0
    };
    8 + thousands + 3 * floors.saturating_sub(1)
}

/// Predict the total budget with contingency and an even monthly spend.
pub fn predict_budget(model: &dyn CostModel, request: &PredictionRequest) -> BudgetPrediction {
    let features = |material| {
        cost_features(
            &request.city,
            request.area,
            &request.quality,
            material,
            request.floors,
        )
    };
    let indian = model.predict(&features(MaterialSource::Indian));
    let foreign = model.predict(&features(MaterialSource::Foreign));

    let base = round_thousand(indian);
    let contingency_amount = (base * request.contingency / 100.0).round();
    let total = base + contingency_amount;

    let months = projection_months(request.area, request.floors);
    let per_month = (total / months as f64).round();

    let comparison = MaterialComparison {
        indian: round_thousand(indian),
        foreign: round_thousand(foreign),
        savings: round_thousand(foreign) - round_thousand(indian),
    };

    BudgetPrediction {
        base_cost: base,
        contingency: request.contingency,
        contingency_amount,
        total_prediction: total,
        rate_per_sq_ft: per_sq_ft(base, request.area),
        categories: BUDGET_CATEGORIES
            .iter()
            .map(|&(trade, share)| BreakdownLine {
                trade,
                amount: (base * share).round(),
            })
            .collect(),
        monthly_cost: (1..=months)
            .map(|month| MonthlyCost {
                month,
                cost: per_month,
            })
            .collect(),
        estimated_months: months,
        comparison,
    }
}
