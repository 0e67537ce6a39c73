//! Carbon Calculator
//!
//! Estimates trip CO2 emissions per transport mode, compares modes against
//! the car baseline and prices the carbon credits needed to offset a trip.

pub mod calculator;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod routes;

pub use calculator::EmissionCalculator;
pub use config::{CalculatorConfig, CarbonCreditConfig};
pub use error::{CalcError, Result};
pub use models::{CalculationInput, CalculationResult, TransportMode};
pub use routes::{RouteTable, resolve_distance};
