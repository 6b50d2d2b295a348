//! Client-facing house description and its validation.
//!
//! A [`HouseRequest`] mirrors the JSON a client submits. Every field has a
//! default, so `{}` is a valid request for a 1200 sq.ft, 3-bedroom,
//! single-storey home. Validation runs before any composition and reports
//! every problem at once.
//!
//! ```
//! use homeplan_logic::request::{validate_request, HouseRequest};
//!
//! let mut request = HouseRequest::default();
//! request.floors = 2;
//! request.extra_features = "study and a gym".to_string();
//! assert!(validate_request(&request).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::composer::floor_rules;
use crate::error::LayoutError;

/// House parameters as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseRequest {
    /// Total built-up area across all floors, in sq.ft.
    pub area: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    /// Number of storeys (1, 2 or 3).
    pub floors: i64,
    /// Free-form style label, only used in titles.
    pub style: String,
    pub garage: bool,
    pub balcony: bool,
    /// Free text scanned for extra rooms ("study, pooja room, gym").
    pub extra_features: String,
}

impl Default for HouseRequest {
    fn default() -> Self {
        Self {
            area: 1200.0,
            bedrooms: 3,
            bathrooms: 2,
            floors: 1,
            style: "modern".to_string(),
            garage: false,
            balcony: true,
            extra_features: String::new(),
        }
    }
}

/// Validated, typed house parameters consumed by the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseParams {
    pub total_area: f64,
    pub bedrooms: usize,
    pub bathrooms: usize,
    pub floor_count: usize,
    pub has_garage: bool,
    pub has_balcony: bool,
    pub style: String,
}

impl HouseParams {
    pub fn per_floor_area(&self) -> f64 {
        self.total_area / self.floor_count as f64
    }
}

/// Validate a request, returning all errors found.
pub fn validate_request(request: &HouseRequest) -> Vec<LayoutError> {
    let mut errors = Vec::new();

    if !request.area.is_finite() || request.area <= 0.0 {
        errors.push(LayoutError::NonPositiveArea(request.area));
    }
    if request.bedrooms < 0 {
        errors.push(LayoutError::NegativeCount {
            field: "bedrooms",
            value: request.bedrooms,
        });
    }
    if request.bathrooms < 0 {
        errors.push(LayoutError::NegativeCount {
            field: "bathrooms",
            value: request.bathrooms,
        });
    }
    if let Err(e) = floor_rules(request.floors) {
        errors.push(e);
    }

    errors
}

impl HouseRequest {
    /// Validate and convert; the first problem found is returned as the error.
    pub fn to_params(&self) -> Result<HouseParams, LayoutError> {
        if let Some(first) = validate_request(self).into_iter().next() {
            return Err(first);
        }
        Ok(HouseParams {
            total_area: self.area,
            bedrooms: self.bedrooms as usize,
            bathrooms: self.bathrooms as usize,
            floor_count: self.floors as usize,
            has_garage: self.garage,
            has_balcony: self.balcony,
            style: self.style.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_valid() {
        let request = HouseRequest::default();
        let errors = validate_request(&request);
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn empty_json_uses_defaults() {
        let request: HouseRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, HouseRequest::default());
    }

    #[test]
    fn camel_case_fields() {
        let request: HouseRequest = serde_json::from_str(
            r#"{"area": 2400, "floors": 2, "garage": true, "extraFeatures": "gym"}"#,
        )
        .unwrap();
        assert_eq!(request.area, 2400.0);
        assert_eq!(request.floors, 2);
        assert!(request.garage);
        assert_eq!(request.extra_features, "gym");
        assert_eq!(request.bedrooms, 3);
    }

    #[test]
    fn non_positive_area() {
        for area in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let request = HouseRequest {
                area,
                ..HouseRequest::default()
            };
            assert!(validate_request(&request)
                .iter()
                .any(|e| matches!(e, LayoutError::NonPositiveArea(_))));
        }
    }

    #[test]
    fn negative_counts() {
        let request = HouseRequest {
            bedrooms: -1,
            bathrooms: -3,
            ..HouseRequest::default()
        };
        let errors = validate_request(&request);
        assert!(errors.contains(&LayoutError::NegativeCount {
            field: "bedrooms",
            value: -1
        }));
        assert!(errors.contains(&LayoutError::NegativeCount {
            field: "bathrooms",
            value: -3
        }));
    }

    #[test]
    fn invalid_floor_count() {
        for floors in [0, 4, 10, -2] {
            let request = HouseRequest {
                floors,
                ..HouseRequest::default()
            };
            assert!(validate_request(&request).contains(&LayoutError::InvalidFloorCount(floors)));
        }
    }

    #[test]
    fn reports_every_problem() {
        let request = HouseRequest {
            area: 0.0,
            bedrooms: -1,
            floors: 9,
            ..HouseRequest::default()
        };
        assert_eq!(validate_request(&request).len(), 3);
        assert_eq!(
            request.to_params().unwrap_err(),
            LayoutError::NonPositiveArea(0.0)
        );
    }

    #[test]
    fn to_params_converts() {
        let request = HouseRequest {
            floors: 3,
            area: 3000.0,
            ..HouseRequest::default()
        };
        let params = request.to_params().unwrap();
        assert_eq!(params.floor_count, 3);
        assert_eq!(params.bedrooms, 3);
        assert!(params.has_balcony);
        assert!((params.per_floor_area() - 1000.0).abs() < 1e-9);
    }
}
