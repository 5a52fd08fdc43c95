//! Household-responsibility balance scoring.
//!
//! [`scoring::compute_weight`] turns a survey question and a family's
//! category priorities into an effective weight;
//! [`scoring::compute_balance`] folds a family's answers into overall and
//! per-category balance percentages between two responders.

pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
pub mod survey;

pub use error::ValidationError;
pub use scoring::{compute_balance, compute_weight, BalanceScores};
