//! Data models for trips, transport modes and calculation results

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Travel method with its own CO2 emission factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    #[serde(rename = "bicicleta")]
    Bicycle,
    #[serde(rename = "carro")]
    Car,
    #[serde(rename = "onibus")]
    Bus,
    #[serde(rename = "caminhao")]
    Truck,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Bicycle,
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Truck,
    ];

    /// Reference mode every savings figure is measured against
    pub const BASELINE: TransportMode = TransportMode::Car;

    pub fn id(&self) -> &'static str {
        match self {
            TransportMode::Bicycle => "bicicleta",
            TransportMode::Car => "carro",
            TransportMode::Bus => "onibus",
            TransportMode::Truck => "caminhao",
        }
    }
}

impl FromStr for TransportMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.id() == id)
            .ok_or_else(|| CalcError::UnknownTransport(s.trim().to_string()))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Display metadata for a transport mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub label: String,
    pub icon: String,
    pub color: String,
    pub description: String,
}

/// Directed city pair with its distance in km
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
}

/// Raw trip request as collected by a front end
///
/// Fields are unchecked; `EmissionCalculator::calculate` is the validation gate.
#[derive(Debug, Clone, Default)]
pub struct CalculationInput {
    pub origin: String,
    pub destination: String,
    pub transport: String,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
}

/// Snapshot of a finished calculation. Figures are already rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub route: RouteSummary,
    pub transport: TransportMode,
    pub selected_emission: f64, // kg CO2, 2 decimals
    pub all_emissions: BTreeMap<TransportMode, f64>,
    pub savings: i64, // percent vs baseline, may be negative
    pub credits: f64, // 4 decimals
    pub credit_price: f64,
    pub timestamp: DateTime<Local>,
}

/// One bar of the mode comparison chart
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub mode: TransportMode,
    pub emission: f64,
    pub percentage: f64, // relative to the largest emission
    pub selected: bool,
}

/// Environmental equivalents of an emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equivalents {
    pub trees: u64, // trees needed to absorb it in a year
}
