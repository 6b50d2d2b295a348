//! Static construction-rate tables per city.
//!
//! Rates are rupees per sq.ft for each quality tier. The table order is
//! stable: a city's position is its feature index for cost models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-sq.ft rate band for one quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityRates {
    pub name: &'static str,
    pub basic: RateBand,
    pub mid: RateBand,
    pub premium: RateBand,
    /// Labour cost multiplier relative to Bangalore.
    pub labor_index: f64,
    /// Yearly land appreciation, percent.
    pub land_appreciation: f64,
}

impl CityRates {
    pub fn band(&self, tier: QualityTier) -> RateBand {
        match tier {
            QualityTier::Basic => self.basic,
            QualityTier::Mid => self.mid,
            QualityTier::Premium => self.premium,
        }
    }
}

const fn band(min: f64, max: f64, avg: f64) -> RateBand {
    RateBand { min, max, avg }
}

pub static CITIES: [CityRates; 6] = [
    CityRates {
        name: "bangalore",
        basic: band(1400.0, 1700.0, 1550.0),
        mid: band(1750.0, 2100.0, 1900.0),
        premium: band(2200.0, 2800.0, 2500.0),
        labor_index: 1.0,
        land_appreciation: 8.5,
    },
    CityRates {
        name: "mumbai",
        basic: band(1700.0, 2100.0, 1900.0),
        mid: band(2100.0, 2600.0, 2350.0),
        premium: band(2700.0, 3400.0, 3050.0),
        labor_index: 1.15,
        land_appreciation: 6.2,
    },
    CityRates {
        name: "delhi",
        basic: band(1500.0, 1850.0, 1650.0),
        mid: band(1900.0, 2300.0, 2100.0),
        premium: band(2400.0, 3000.0, 2700.0),
        labor_index: 1.05,
        land_appreciation: 7.0,
    },
    CityRates {
        name: "chennai",
        basic: band(1350.0, 1650.0, 1500.0),
        mid: band(1700.0, 2050.0, 1850.0),
        premium: band(2100.0, 2700.0, 2400.0),
        labor_index: 0.95,
        land_appreciation: 7.5,
    },
    CityRates {
        name: "hyderabad",
        basic: band(1300.0, 1600.0, 1450.0),
        mid: band(1650.0, 2000.0, 1800.0),
        premium: band(2050.0, 2650.0, 2350.0),
        labor_index: 0.92,
        land_appreciation: 9.0,
    },
    CityRates {
        name: "pune",
        basic: band(1400.0, 1750.0, 1575.0),
        mid: band(1800.0, 2150.0, 1950.0),
        premium: band(2250.0, 2850.0, 2550.0),
        labor_index: 0.98,
        land_appreciation: 7.8,
    },
];

/// Finish quality. Unknown labels fall back to [`QualityTier::Mid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Basic,
    #[default]
    Mid,
    Premium,
}

impl QualityTier {
    pub fn index(self) -> u8 {
        match self {
            QualityTier::Basic => 0,
            QualityTier::Mid => 1,
            QualityTier::Premium => 2,
        }
    }

    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(QualityTier::Basic),
            "mid" => Ok(QualityTier::Mid),
            "premium" => Ok(QualityTier::Premium),
            other => Err(format!("unknown quality tier: {other}")),
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityTier::Basic => "basic",
            QualityTier::Mid => "mid",
            QualityTier::Premium => "premium",
        })
    }
}

/// Where finishing material is sourced. Anything but "indian" counts as foreign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialSource {
    #[default]
    Indian,
    Foreign,
}

impl MaterialSource {
    pub fn index(self) -> u8 {
        match self {
            MaterialSource::Indian => 0,
            MaterialSource::Foreign => 1,
        }
    }

    pub fn from_label(label: &str) -> Self {
        if label == "indian" {
            MaterialSource::Indian
        } else {
            MaterialSource::Foreign
        }
    }
}

pub fn find_city(name: &str) -> Option<&'static CityRates> {
    CITIES.iter().find(|c| c.name == name)
}

/// Position of a city in [`CITIES`]; unknown cities map to 0.
pub fn city_index(name: &str) -> usize {
    CITIES.iter().position(|c| c.name == name).unwrap_or(0)
}

/// Rates for a city, falling back to the first table entry.
pub fn city_or_default(name: &str) -> &'static CityRates {
    &CITIES[city_index(name)]
}

/// Average rate per tier plus appreciation, for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSummary {
    pub basic: f64,
    pub mid: f64,
    pub premium: f64,
    pub appreciation: f64,
}

/// Summary of every city keyed by name.
pub fn market_rates() -> BTreeMap<&'static str, MarketSummary> {
    CITIES
        .iter()
        .map(|c| {
            (
                c.name,
                MarketSummary {
                    basic: c.basic.avg,
                    mid: c.mid.avg,
                    premium: c.premium.avg,
                    appreciation: c.land_appreciation,
                },
            )
        })
        .collect()
}
