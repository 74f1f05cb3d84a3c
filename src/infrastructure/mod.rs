// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_totals_source;
pub mod plotly_renderer;
