// Pay slip estimation: statutory withholdings and the gross-to-net pipeline.
pub mod brackets;
pub mod estimator;
pub mod income_tax;
pub mod social_security;

pub use estimator::PayrollEstimator;
pub use income_tax::IncomeTax;
pub use social_security::SocialSecurity;

use serde_json::Value;

// Common trait for the statutory withholdings
pub trait WithholdingCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Table in use, for display and auditing
    fn calculate(&self, base: f64) -> f64;
}
