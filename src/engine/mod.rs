pub mod generator;
pub mod indicators;
pub mod market;
pub mod metrics;
pub mod selection;
