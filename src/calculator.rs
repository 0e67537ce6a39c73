//! Emission calculator logic

use std::collections::BTreeMap;

use chrono::Local;

use crate::config::CalculatorConfig;
use crate::error::{CalcError, Result};
use crate::models::{
    CalculationInput, CalculationResult, ComparisonRow, Equivalents, RouteSummary, TransportMode,
};

const KG_CO2_PER_TREE_PER_YEAR: f64 = 20.0;

/// Round half toward positive infinity, as browsers' `Math.round` does
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Pure arithmetic over an injected factor table and credit pricing
#[derive(Debug, Clone, Default)]
pub struct EmissionCalculator {
    config: CalculatorConfig,
}

impl EmissionCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// kg CO2 for `mode` over `distance` km.
    ///
    /// Returns 0 when the mode has no factor or the distance is missing,
    /// zero or negative.
    pub fn emission_for(&self, mode: TransportMode, distance: Option<f64>) -> f64 {
        let Some(distance) = distance.filter(|d| *d > 0.0) else {
            return 0.0;
        };

        match self.config.factor(mode) {
            Some(factor) => distance * factor,
            None => 0.0,
        }
    }

    /// Emission for every mode in the factor table
    pub fn emission_for_all_modes(&self, distance: Option<f64>) -> BTreeMap<TransportMode, f64> {
        self.config
            .emission_factors
            .keys()
            .map(|mode| (*mode, self.emission_for(*mode, distance)))
            .collect()
    }

    /// Percent of `baseline` avoided by `mode_emission`, rounded to an integer
    pub fn savings_percent(&self, baseline: f64, mode_emission: f64) -> i64 {
        if baseline == 0.0 {
            return 0;
        }

        let savings = (baseline - mode_emission) / baseline * 100.0;
        round_half_up(savings) as i64
    }

    /// Carbon credits needed to offset `emission_kg`
    pub fn credits_for(&self, emission_kg: f64) -> f64 {
        if !(emission_kg > 0.0) {
            return 0.0;
        }
        emission_kg / self.config.carbon_credit.kg_per_credit
    }

    /// Monetary cost of `credits`
    pub fn cost_for(&self, credits: f64) -> f64 {
        credits * self.config.carbon_credit.price_per_credit
    }

    pub fn equivalents(&self, emission_kg: f64) -> Equivalents {
        let trees = if emission_kg > 0.0 {
            (emission_kg / KG_CO2_PER_TREE_PER_YEAR).ceil() as u64
        } else {
            0
        };
        Equivalents { trees }
    }

    /// Validate a trip request and compute the full result snapshot
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult> {
        let origin = input.origin.trim();
        let destination = input.destination.trim();

        if origin.is_empty() {
            return Err(CalcError::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(CalcError::MissingDestination);
        }
        if origin.to_lowercase() == destination.to_lowercase() {
            return Err(CalcError::SameCity);
        }
        if input.transport.trim().is_empty() {
            return Err(CalcError::MissingTransport);
        }
        let transport: TransportMode = input.transport.parse()?;
        let distance = match input.distance {
            Some(d) if d > 0.0 && d.is_finite() => d,
            _ => return Err(CalcError::InvalidDistance),
        };

        let selected = self.emission_for(transport, Some(distance));
        let all = self.emission_for_all_modes(Some(distance));
        let baseline = all.get(&TransportMode::BASELINE).copied().unwrap_or(0.0);
        let savings = self.savings_percent(baseline, selected);
        let credits = self.credits_for(selected);
        let cost = self.cost_for(credits);

        log::debug!(
            "{} -> {} ({} km) by {}: {:.3} kg CO2, savings {}%, {:.4} credits",
            origin,
            destination,
            distance,
            transport,
            selected,
            savings,
            credits
        );

        Ok(CalculationResult {
            route: RouteSummary {
                origin: origin.to_string(),
                destination: destination.to_string(),
                distance,
            },
            transport,
            selected_emission: round_to(selected, 2),
            all_emissions: all
                .into_iter()
                .map(|(mode, emission)| (mode, round_to(emission, 2)))
                .collect(),
            savings,
            credits: round_to(credits, 4),
            credit_price: round_to(cost, 2),
            timestamp: Local::now(),
        })
    }

    /// Bar chart rows comparing every mode of a result against the largest emission
    pub fn comparison(&self, result: &CalculationResult) -> Vec<ComparisonRow> {
        let max = result
            .all_emissions
            .values()
            .copied()
            .fold(0.0_f64, f64::max);

        result
            .all_emissions
            .iter()
            .map(|(mode, emission)| ComparisonRow {
                mode: *mode,
                emission: *emission,
                percentage: if max > 0.0 { emission / max * 100.0 } else { 0.0 },
                selected: *mode == result.transport,
            })
            .collect()
    }
}
