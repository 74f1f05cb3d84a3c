// Domain layer - Series, traces and chart page state
pub mod chart;
pub mod layout;
pub mod meter;
pub mod page;
pub mod series;
