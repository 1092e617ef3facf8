pub mod afd_parser;
pub mod punch_log;
