pub mod chart;
pub mod config;
pub mod indicator;
pub mod instrument;
pub mod price_bar;
