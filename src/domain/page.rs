// Chart page variants
use super::layout::Layout;
use super::series::{DailyDataSet, DataSet, MonthlyDataSet};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    Daily,
    Monthly,
}

impl PageVariant {
    /// Upstream document, relative to the energy API base URL
    pub fn resource(&self) -> &'static str {
        match self {
            PageVariant::Daily => "daily_totals.json",
            PageVariant::Monthly => "monthly_totals.json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PageVariant::Daily => "daily totals",
            PageVariant::Monthly => "monthly totals",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageVariant::Daily => "Daily Usage",
            PageVariant::Monthly => "Monthly Usage",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            PageVariant::Daily => Layout::daily(),
            PageVariant::Monthly => Layout::monthly(),
        }
    }

    pub fn decode(&self, body: &[u8]) -> serde_json::Result<DataSet> {
        match self {
            PageVariant::Daily => serde_json::from_slice::<DailyDataSet>(body).map(DataSet::Daily),
            PageVariant::Monthly => {
                serde_json::from_slice::<MonthlyDataSet>(body).map(DataSet::Monthly)
            }
        }
    }

    /// Message raised on the page when the document cannot be loaded
    pub fn alert_message(&self, reason: &dyn std::fmt::Display) -> String {
        format!("Error loading {} {}", self.description(), reason)
    }
}
