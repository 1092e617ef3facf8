// Engine library root
// AFD punch-file parsing and pay slip estimation, plus the service layer the binary drives.

pub mod config;
pub mod data;
pub mod error;
pub mod payroll;
pub mod services;

pub use error::EngineError;
