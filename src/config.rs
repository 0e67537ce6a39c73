//! Calculator configuration: emission factors, mode metadata and credit pricing

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::models::{ModeInfo, TransportMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonCreditConfig {
    pub price_per_credit: f64, // BRL
    pub kg_per_credit: f64,
}

impl Default for CarbonCreditConfig {
    fn default() -> Self {
        Self {
            price_per_credit: 25.0,
            kg_per_credit: 1000.0,
        }
    }
}

/// Everything the calculator needs that is not part of a single request.
///
/// Factors are kg CO2 per km. A mode missing from `emission_factors` is
/// treated as unrecognized and emits nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub emission_factors: BTreeMap<TransportMode, f64>,
    pub modes: BTreeMap<TransportMode, ModeInfo>,
    pub carbon_credit: CarbonCreditConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        let emission_factors = BTreeMap::from([
            (TransportMode::Bicycle, 0.0),
            (TransportMode::Car, 0.12),   // average car
            (TransportMode::Bus, 0.089),  // per passenger, typical occupancy
            (TransportMode::Truck, 0.96),
        ]);

        let modes = BTreeMap::from([
            (TransportMode::Bicycle, mode_info("Bicicleta", "🚴", "#34d399", "Zero emissão de carbono")),
            (TransportMode::Car, mode_info("Carro", "🚗", "#f59e0b", "Emissão média")),
            (TransportMode::Bus, mode_info("Ônibus", "🚌", "#3b82f6", "Emissão baixa (compartilhada)")),
            (TransportMode::Truck, mode_info("Caminhão", "🚚", "#ef4444", "Emissão alta")),
        ]);

        Self {
            emission_factors,
            modes,
            carbon_credit: CarbonCreditConfig::default(),
        }
    }
}

fn mode_info(label: &str, icon: &str, color: &str, description: &str) -> ModeInfo {
    ModeInfo {
        label: label.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        description: description.to_string(),
    }
}

impl CalculatorConfig {
    /// Parse a JSON document; absent sections keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        log::info!(
            "Loaded calculator config from {} ({} emission factors)",
            path.display(),
            config.emission_factors.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (mode, factor) in &self.emission_factors {
            if !factor.is_finite() || *factor < 0.0 {
                return Err(CalcError::InvalidConfig(format!(
                    "emission factor for {} must be a non-negative number, got {}",
                    mode, factor
                )));
            }
        }

        let credit = &self.carbon_credit;
        if !(credit.kg_per_credit > 0.0) {
            return Err(CalcError::InvalidConfig(format!(
                "kg_per_credit must be greater than 0, got {}",
                credit.kg_per_credit
            )));
        }
        if !(credit.price_per_credit >= 0.0) {
            return Err(CalcError::InvalidConfig(format!(
                "price_per_credit must not be negative, got {}",
                credit.price_per_credit
            )));
        }

        Ok(())
    }

    pub fn factor(&self, mode: TransportMode) -> Option<f64> {
        self.emission_factors.get(&mode).copied()
    }

    /// Display label for a mode, falling back to its identifier
    pub fn label(&self, mode: TransportMode) -> String {
        self.modes
            .get(&mode)
            .map(|info| info.label.clone())
            .unwrap_or_else(|| mode.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_factors() {
        let config = CalculatorConfig::default();
        assert_eq!(config.factor(TransportMode::Bicycle), Some(0.0));
        assert_eq!(config.factor(TransportMode::Car), Some(0.12));
        assert_eq!(config.factor(TransportMode::Bus), Some(0.089));
        assert_eq!(config.factor(TransportMode::Truck), Some(0.96));
        assert_eq!(config.carbon_credit.kg_per_credit, 1000.0);
        assert_eq!(config.carbon_credit.price_per_credit, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CalculatorConfig::from_json_str(
            r#"{ "carbon_credit": { "price_per_credit": 40.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.carbon_credit.price_per_credit, 40.0);
        assert_eq!(config.carbon_credit.kg_per_credit, 1000.0);
        assert_eq!(config.factor(TransportMode::Car), Some(0.12));
        assert_eq!(config.label(TransportMode::Bus), "Ônibus");
    }

    #[test]
    fn test_json_factor_table_replaces_defaults() {
        let config =
            CalculatorConfig::from_json_str(r#"{ "emission_factors": { "carro": 0.2 } }"#).unwrap();
        assert_eq!(config.factor(TransportMode::Car), Some(0.2));
        assert_eq!(config.factor(TransportMode::Truck), None);
    }

    #[test]
    fn test_rejects_negative_factor() {
        let err = CalculatorConfig::from_json_str(r#"{ "emission_factors": { "carro": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_conversion() {
        let err = CalculatorConfig::from_json_str(r#"{ "carbon_credit": { "kg_per_credit": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_mode_key() {
        let err = CalculatorConfig::from_json_str(r#"{ "emission_factors": { "aviao": 0.3 } }"#)
            .unwrap_err();
        assert!(matches!(err, CalcError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "emission_factors": {{ "onibus": 0.05 }} }}"#).unwrap();

        let config = CalculatorConfig::load(file.path()).unwrap();
        assert_eq!(config.factor(TransportMode::Bus), Some(0.05));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let config = CalculatorConfig {
            modes: BTreeMap::new(),
            ..CalculatorConfig::default()
        };
        assert_eq!(config.label(TransportMode::Truck), "caminhao");
    }
}
