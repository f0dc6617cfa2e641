//! Redistribute a column of gross mass values so it sums exactly to a target
//! total, in 0.001 steps, never letting a row fall below 0.001.
//!
//! The core lives in [`mass`]; everything else is the `grossmass` command
//! line that feeds it.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod mass;
pub mod services;
pub mod telemetry;

pub use mass::{adjust, preview, Adjustment, AdjustmentError, MassSeries, MassValue};
