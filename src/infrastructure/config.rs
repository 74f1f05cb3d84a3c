use crate::infrastructure::plotly_renderer::DEFAULT_PLOTLY_SRC;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    pub source: SourceSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub page: PageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    /// Base URL; documents live at `<base_url>/<meter>/daily_totals.json` and `monthly_totals.json`
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    #[serde(default = "default_plotly_src")]
    pub plotly_src: String,
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            plotly_src: default_plotly_src(),
            title_prefix: default_title_prefix(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_plotly_src() -> String {
    DEFAULT_PLOTLY_SRC.to_string()
}

fn default_title_prefix() -> String {
    "Energy".to_string()
}

/// Load `config/charts.*`, overridden by `ENERGY_CHARTS__SECTION__KEY` variables
pub fn load_charts_config() -> anyhow::Result<ChartsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts").required(false))
        .add_source(config::Environment::with_prefix("ENERGY_CHARTS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
