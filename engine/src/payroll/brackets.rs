// Progressive withholding tables resolved by first matching bracket.
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One tier of a withholding table. `limit: None` means the tier has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub limit: Option<f64>,
    pub rate: f64,
    #[serde(default)]
    pub deduction: f64,
}

impl Bracket {
    pub fn up_to(limit: f64, rate: f64, deduction: f64) -> Self {
        Self { limit: Some(limit), rate, deduction }
    }

    pub fn unbounded(rate: f64, deduction: f64) -> Self {
        Self { limit: None, rate, deduction }
    }

    fn covers(&self, base: f64) -> bool {
        self.limit.map_or(true, |limit| base <= limit)
    }

    fn apply(&self, base: f64) -> f64 {
        base * self.rate - self.deduction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTable {
    pub brackets: Vec<Bracket>,
    /// Fixed amount charged when the base is above every bounded limit.
    #[serde(default)]
    pub ceiling: Option<f64>,
}

impl BracketTable {
    /// Applies `base * rate - deduction` of the first bracket whose limit is `>= base`.
    ///
    /// This is a single-bracket approximation, not a sum over marginal slices. Above the
    /// last limit the ceiling is returned; without a ceiling the last bracket is applied.
    pub fn resolve(&self, base: f64) -> f64 {
        if let Some(bracket) = self.brackets.iter().find(|b| b.covers(base)) {
            return bracket.apply(base);
        }
        match (self.ceiling, self.brackets.last()) {
            (Some(ceiling), _) => ceiling,
            (None, Some(last)) => last.apply(base),
            (None, None) => 0.0,
        }
    }

    pub fn validate(&self, table_name: &str) -> Result<(), EngineError> {
        let mut previous: Option<f64> = None;
        for (idx, bracket) in self.brackets.iter().enumerate() {
            if !bracket.rate.is_finite() || bracket.rate < 0.0 || !bracket.deduction.is_finite() {
                return Err(EngineError::ConfigError(format!(
                    "{} bracket {} has an invalid rate or deduction",
                    table_name,
                    idx + 1
                )));
            }
            match bracket.limit {
                Some(limit) => {
                    if !limit.is_finite() || previous.map_or(false, |prev| limit <= prev) {
                        return Err(EngineError::ConfigError(format!(
                            "{} bracket limits must be finite and ascending (bracket {})",
                            table_name,
                            idx + 1
                        )));
                    }
                    previous = Some(limit);
                }
                None if idx + 1 != self.brackets.len() => {
                    return Err(EngineError::ConfigError(format!(
                        "{} bracket {} is unbounded but is not the last one",
                        table_name,
                        idx + 1
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }
}
