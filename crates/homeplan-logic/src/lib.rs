//! Pure floor-plan logic for HomePlan.
//!
//! This crate turns a house description (area, bedrooms, bathrooms, storeys,
//! free-text extras) into placed room rectangles per floor. It has no HTTP,
//! database or rendering dependencies: functions take plain data and return
//! results, so the same code runs behind a web service, in the headless
//! harness, and in tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocator`] | Zone bands, corridor, weight-proportional rows and row splitting |
//! | [`blueprint`] | End-to-end pipeline and the JSON response shape |
//! | [`composer`] | Per-storey rule tables expanded into room lists |
//! | [`constants`] | Layout dimensions, room weights and canonical names |
//! | [`cost`] | Cost model trait, rate-card model and estimates |
//! | [`error`] | `LayoutError` shared by every stage |
//! | [`features`] | Keyword scan of free-text extras |
//! | [`geometry`] | Placement validation (bounds, overlaps, row widths) |
//! | [`market`] | Per-city construction rate tables |
//! | [`render`] | Doors, windows, stairs, entrance and legend for drawing |
//! | [`request`] | Client request defaults and validation |
//! | [`rooms`] | Room categories, zones, specs and placed rectangles |

pub mod allocator;
pub mod blueprint;
pub mod composer;
pub mod constants;
pub mod cost;
pub mod error;
pub mod features;
pub mod geometry;
pub mod market;
pub mod render;
pub mod request;
pub mod rooms;

pub use error::LayoutError;
