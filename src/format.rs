//! pt-BR number formatting and the plain-text trip report

use std::fmt;

use crate::calculator::round_to;
use crate::config::CalculatorConfig;
use crate::models::{CalculationResult, ComparisonRow, Equivalents};

const BAR_WIDTH: usize = 30;

/// Format with `.` thousands grouping and `,` as decimal separator
pub fn format_number(value: f64, decimals: usize) -> String {
    let rounded = round_to(value, decimals as i32);
    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + fixed.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut output = String::new();
    if rounded < 0.0 {
        output.push('-');
    }
    output.push_str(&grouped);
    if let Some(frac_part) = frac_part {
        output.push(',');
        output.push_str(frac_part);
    }
    output
}

/// Brazilian real, e.g. `R$ 1.234,50` (non-breaking space after the symbol)
pub fn format_currency(value: f64) -> String {
    let number = format_number(value, 2);
    match number.strip_prefix('-') {
        Some(abs) => format!("-R$\u{a0}{}", abs),
        None => format!("R$\u{a0}{}", number),
    }
}

/// Everything a front end shows for one calculation
pub struct TripReport<'a> {
    pub result: &'a CalculationResult,
    pub comparison: Vec<ComparisonRow>,
    pub equivalents: Equivalents,
    pub config: &'a CalculatorConfig,
}

impl fmt::Display for TripReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let mode = self.config.modes.get(&result.transport);

        writeln!(f, "=== Rota ===")?;
        writeln!(f, "{} → {}", result.route.origin, result.route.destination)?;
        writeln!(f, "{} km", format_number(result.route.distance, 0))?;
        writeln!(f)?;

        writeln!(f, "=== Modo Selecionado ===")?;
        match mode {
            Some(info) => {
                writeln!(f, "{} {}", info.icon, info.label)?;
                writeln!(f, "{}", info.description)?;
            }
            None => writeln!(f, "{}", result.transport)?,
        }
        writeln!(f)?;

        writeln!(f, "=== Emissão de CO₂ ===")?;
        writeln!(f, "{} kg", format_number(result.selected_emission, 2))?;
        writeln!(
            f,
            "ou {} toneladas",
            format_number(result.selected_emission / 1000.0, 3)
        )?;
        writeln!(f, "Economia vs. carro: {}%", result.savings)?;
        writeln!(f)?;

        writeln!(f, "=== Comparação ===")?;
        for row in &self.comparison {
            let filled = (row.percentage / 100.0 * BAR_WIDTH as f64).round() as usize;
            let marker = if row.selected { "  ✓ Selecionado" } else { "" };
            writeln!(
                f,
                "  {:<10} {:>12} kg  {:<width$}{}",
                self.config.label(row.mode),
                format_number(row.emission, 2),
                "█".repeat(filled.min(BAR_WIDTH)),
                marker,
                width = BAR_WIDTH
            )?;
        }
        writeln!(f)?;

        writeln!(f, "=== Créditos de Carbono ===")?;
        writeln!(f, "Créditos necessários:   {}", format_number(result.credits, 4))?;
        writeln!(f, "Custo de neutralização: {}", format_currency(result.credit_price))?;
        writeln!(f, "Árvores/ano:            {}", self.equivalents.trees)?;
        writeln!(f)?;

        write!(f, "Calculado em {}", result.timestamp.format("%d/%m/%Y, %H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::calculator::EmissionCalculator;
    use crate::models::CalculationInput;

    #[rstest]
    #[case(0.0, 2, "0,00")]
    #[case(51.6, 2, "51,60")]
    #[case(430.0, 0, "430")]
    #[case(1015.0, 0, "1.015")]
    #[case(1234567.891, 2, "1.234.567,89")]
    #[case(0.96, 4, "0,9600")]
    #[case(0.0516, 3, "0,052")]
    #[case(-1500.5, 1, "-1.500,5")]
    #[case(-0.001, 2, "0,00")]
    fn test_format_number(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
        assert_eq!(format_number(value, decimals), expected);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(24.0), "R$\u{a0}24,00");
        assert_eq!(format_currency(1290.5), "R$\u{a0}1.290,50");
        assert_eq!(format_currency(-3.0), "-R$\u{a0}3,00");
    }

    #[test]
    fn test_report_sections() {
        let calc = EmissionCalculator::default();
        let result = calc
            .calculate(&CalculationInput {
                origin: "São Paulo".to_string(),
                destination: "Brasília".to_string(),
                transport: "onibus".to_string(),
                distance: Some(2000.0),
            })
            .unwrap();

        let report = TripReport {
            result: &result,
            comparison: calc.comparison(&result),
            equivalents: calc.equivalents(result.selected_emission),
            config: calc.config(),
        }
        .to_string();

        assert!(report.contains("São Paulo → Brasília"));
        assert!(report.contains("2.000 km"));
        assert!(report.contains("🚌 Ônibus"));
        assert!(report.contains("178,00 kg"));
        assert!(report.contains("Economia vs. carro: 26%"));
        assert!(report.contains("0,1780"));
        assert!(report.contains("✓ Selecionado"));
        assert!(report.contains("R$\u{a0}4,45"));
        assert!(report.contains("Árvores/ano:            9"));
    }
}
