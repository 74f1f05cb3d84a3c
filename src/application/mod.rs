// Application layer - Use cases and the ports they depend on
pub mod chart_renderer;
pub mod chart_service;
pub mod totals_source;
