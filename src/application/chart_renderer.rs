// Port for drawing a chart page
use crate::domain::layout::Layout;
use crate::domain::meter::MeterId;
use crate::domain::page::PageVariant;
use crate::domain::series::Trace;

/// Everything a renderer needs to draw one page
#[derive(Debug, Clone, Copy)]
pub struct ChartView<'a> {
    pub meter: MeterId,
    pub variant: PageVariant,
    pub traces: &'a [Trace],
    pub layout: &'a Layout,
    pub loading_visible: bool,
    pub alert: Option<&'a str>,
}

pub trait ChartRenderer: Send + Sync {
    /// Must be deterministic: the same view always yields the same page.
    fn render(&self, view: &ChartView<'_>) -> String;
}
