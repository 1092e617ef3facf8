pub mod models;
pub mod utils;

// Models and format helpers used by the engine and by anything rendering its output.
