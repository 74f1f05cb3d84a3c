// Accumulated chart state for one page
use super::series::Trace;

/// Traces are only ever appended; the page is redrawn from the full list.
#[derive(Debug, Clone)]
pub struct ChartState {
    traces: Vec<Trace>,
    loading_visible: bool,
    alert: Option<String>,
    fetches: usize,
    page: Option<String>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            traces: Vec::new(),
            loading_visible: true,
            alert: None,
            fetches: 0,
            page: None,
        }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn append(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn needs_fetch(&self) -> bool {
        self.fetches == 0
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    /// Latest rendered page
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Store a freshly rendered page. Clears any alert that page already raised.
    pub fn rendered(&mut self, page: String) {
        self.page = Some(page);
        self.alert = None;
    }

    pub fn hide_loading(&mut self) {
        self.loading_visible = false;
    }

    pub fn fail(&mut self, message: String) {
        self.alert = Some(message);
    }
}
