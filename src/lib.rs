pub mod config;
pub mod curve;
pub mod output;
pub mod stats;
