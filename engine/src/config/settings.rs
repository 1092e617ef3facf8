// Engine settings: payroll tables and logging, loaded from JSON.
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::EngineError;
use crate::payroll::brackets::{Bracket, BracketTable};

const DEFAULT_CONFIG: &str = include_str!("../../config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub log_level: String,
    pub payroll: PayrollConfig,
}

/// Jurisdiction and year specific constants for the pay slip estimate.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PayrollConfig {
    pub monthly_hours_divisor: f64,
    pub overtime_multiplier: f64,
    pub night_shift_premium: f64,
    pub dependent_exemption: f64,
    pub transport_voucher_rate: f64,
    // No cap until one is configured.
    pub transport_voucher_cap: Option<f64>,
    pub social_security: BracketTable,
    pub income_tax: BracketTable,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            log_level: "info".to_string(),
            payroll: PayrollConfig::default(),
        }
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        PayrollConfig {
            monthly_hours_divisor: 220.0,
            overtime_multiplier: 1.5,
            night_shift_premium: 0.2,
            dependent_exemption: 189.59,
            transport_voucher_rate: 0.06,
            transport_voucher_cap: None,
            social_security: BracketTable {
                brackets: vec![
                    Bracket::up_to(1556.94, 0.075, 0.0),
                    Bracket::up_to(2826.65, 0.09, 23.35),
                    Bracket::up_to(4279.29, 0.12, 108.28),
                    Bracket::up_to(7507.49, 0.14, 194.06),
                ],
                ceiling: Some(908.85),
            },
            income_tax: BracketTable {
                brackets: vec![
                    Bracket::up_to(2112.00, 0.0, 0.0),
                    Bracket::up_to(2826.65, 0.075, 158.40),
                    Bracket::up_to(3751.05, 0.15, 370.40),
                    Bracket::up_to(4664.68, 0.225, 651.73),
                    Bracket::unbounded(0.275, 884.96),
                ],
                ceiling: None,
            },
        }
    }
}

impl EngineSettings {
    /// Settings shipped with the crate in `config/default.json`.
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(content)?;
        settings.payroll.validate()?;
        Ok(settings)
    }
}

impl PayrollConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.monthly_hours_divisor.is_finite() && self.monthly_hours_divisor > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "monthly_hours_divisor must be positive, got {}",
                self.monthly_hours_divisor
            )));
        }
        if let Some(cap) = self.transport_voucher_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(EngineError::ConfigError(format!(
                    "transport_voucher_cap must be a non-negative amount, got {}",
                    cap
                )));
            }
        }
        self.social_security.validate("social_security")?;
        self.income_tax.validate("income_tax")?;
        Ok(())
    }
}
