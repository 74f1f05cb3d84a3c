// Chart service - Use case for loading totals and drawing the chart pages
use crate::application::chart_renderer::{ChartRenderer, ChartView};
use crate::application::totals_source::{SourceError, TotalsSource};
use crate::domain::chart::ChartState;
use crate::domain::layout::Layout;
use crate::domain::meter::MeterId;
use crate::domain::page::PageVariant;
use crate::domain::series::{Series, Trace};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Daily and monthly chart state of one meter
#[derive(Default)]
struct MeterCharts {
    daily: Arc<Mutex<ChartState>>,
    monthly: Arc<Mutex<ChartState>>,
}

impl MeterCharts {
    fn get(&self, variant: PageVariant) -> Arc<Mutex<ChartState>> {
        match variant {
            PageVariant::Daily => self.daily.clone(),
            PageVariant::Monthly => self.monthly.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ChartService {
    source: Arc<dyn TotalsSource>,
    renderer: Arc<dyn ChartRenderer>,
    meters: Arc<Mutex<HashMap<MeterId, MeterCharts>>>,
}

impl ChartService {
    pub fn new(source: Arc<dyn TotalsSource>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            source,
            renderer,
            meters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // The meter map is only locked long enough to find or create the chart state.
    async fn state(&self, meter: MeterId, variant: PageVariant) -> Arc<Mutex<ChartState>> {
        let mut meters = self.meters.lock().await;
        meters.entry(meter).or_default().get(variant)
    }

    /// Fetch the document again and append one trace per series.
    /// Returns the number of traces appended.
    pub async fn load(&self, meter: MeterId, variant: PageVariant) -> Result<usize, SourceError> {
        let state = self.state(meter, variant).await;
        let mut state = state.lock().await;
        self.load_into(meter, variant, &mut state).await
    }

    /// Current page, fetching the document first if this chart was never loaded
    pub async fn page(&self, meter: MeterId, variant: PageVariant) -> String {
        let state = self.state(meter, variant).await;
        let mut state = state.lock().await;
        self.ensure_loaded(meter, variant, &mut state).await;

        match state.page() {
            Some(page) => page.to_string(),
            None => self.draw(meter, variant, &variant.layout(), &state),
        }
    }

    /// Accumulated traces, fetching the document first if this chart was never loaded
    pub async fn traces(&self, meter: MeterId, variant: PageVariant) -> Vec<Trace> {
        let state = self.state(meter, variant).await;
        let mut state = state.lock().await;
        self.ensure_loaded(meter, variant, &mut state).await;
        state.traces().to_vec()
    }

    async fn ensure_loaded(&self, meter: MeterId, variant: PageVariant, state: &mut ChartState) {
        if !state.needs_fetch() {
            return;
        }
        // Failures are already recorded on the state as an alert
        if let Err(e) = self.load_into(meter, variant, state).await {
            tracing::debug!(
                "First load of meter {} {} failed: {}",
                meter,
                variant.description(),
                e
            );
        }
    }

    // The chart lock is held across the request, so one fetch per chart is in flight.
    async fn load_into(
        &self,
        meter: MeterId,
        variant: PageVariant,
        state: &mut ChartState,
    ) -> Result<usize, SourceError> {
        state.record_fetch();
        let layout = variant.layout();

        match self.source.fetch(meter, variant).await {
            Ok(dataset) => {
                let series = dataset.into_series();
                for s in &series {
                    self.apply_series(meter, variant, &layout, state, s);
                }
                tracing::info!(
                    "Loaded meter {} {}: {} series, {} traces on chart",
                    meter,
                    variant.description(),
                    series.len(),
                    state.traces().len()
                );
                Ok(series.len())
            }
            Err(e) => {
                tracing::error!(
                    "Error loading meter {} {}: {}",
                    meter,
                    variant.description(),
                    e
                );
                state.fail(variant.alert_message(&e));
                let page = self.draw(meter, variant, &layout, state);
                state.rendered(page);
                Err(e)
            }
        }
    }

    fn apply_series(
        &self,
        meter: MeterId,
        variant: PageVariant,
        layout: &Layout,
        state: &mut ChartState,
        series: &Series,
    ) {
        state.append(Trace::bar(series));
        state.hide_loading();
        let page = self.draw(meter, variant, layout, state);
        state.rendered(page);
    }

    fn draw(
        &self,
        meter: MeterId,
        variant: PageVariant,
        layout: &Layout,
        state: &ChartState,
    ) -> String {
        self.renderer.render(&ChartView {
            meter,
            variant,
            traces: state.traces(),
            layout,
            loading_visible: state.loading_visible(),
            alert: state.alert(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::{DailyDataSet, DataPoint, DataSet, MonthlyDataSet, XValue};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const METER: MeterId = MeterId(1);

    struct FakeSource {
        responses: StdMutex<VecDeque<Result<DataSet, SourceError>>>,
        calls: StdMutex<Vec<(MeterId, PageVariant)>>,
    }

    impl FakeSource {
        fn new(responses: Vec<Result<DataSet, SourceError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
                calls: StdMutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(MeterId, PageVariant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TotalsSource for FakeSource {
        async fn fetch(&self, meter: MeterId, variant: PageVariant) -> Result<DataSet, SourceError> {
            self.calls.lock().unwrap().push((meter, variant));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(decode_error()))
        }
    }

    /// Describes the view instead of drawing it
    struct SummaryRenderer {
        renders: AtomicUsize,
    }

    impl ChartRenderer for SummaryRenderer {
        fn render(&self, view: &ChartView<'_>) -> String {
            self.renders.fetch_add(1, Ordering::SeqCst);
            format!(
                "{} {:?} traces={} loading={} alert={:?}",
                view.meter,
                view.variant,
                view.traces.len(),
                view.loading_visible,
                view.alert
            )
        }
    }

    fn decode_error() -> SourceError {
        SourceError::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    fn series(label: &str, len: usize) -> Series {
        Series {
            label: label.to_string(),
            data: (0..len)
                .map(|i| DataPoint(XValue::Number(i.into()), 1i64.into()))
                .collect(),
            color: None,
        }
    }

    fn daily(lengths: [usize; 3]) -> DataSet {
        DataSet::Daily(DailyDataSet {
            consumption: series("Consumption", lengths[0]),
            controlled: series("Controlled", lengths[1]),
            generation: series("Generation", lengths[2]),
        })
    }

    fn monthly() -> DataSet {
        let monthly: MonthlyDataSet = serde_json::from_value(serde_json::json!({
            "consumption": {"label": "Use", "data": [[1, 2], [2, 3]]}
        }))
        .unwrap();
        DataSet::Monthly(monthly)
    }

    fn service(source: Arc<FakeSource>) -> (ChartService, Arc<SummaryRenderer>) {
        let renderer = Arc::new(SummaryRenderer {
            renders: AtomicUsize::new(0),
        });
        (ChartService::new(source, renderer.clone()), renderer)
    }

    #[tokio::test]
    async fn test_daily_load_appends_in_order() {
        let source = FakeSource::new(vec![Ok(daily([5, 0, 3]))]);
        let (service, renderer) = service(source);

        assert_eq!(service.load(METER, PageVariant::Daily).await.unwrap(), 3);

        let traces = service.traces(METER, PageVariant::Daily).await;
        let shape: Vec<(&str, usize, usize)> = traces
            .iter()
            .map(|t| (t.name.as_str(), t.x.len(), t.y.len()))
            .collect();
        assert_eq!(
            shape,
            vec![("Consumption", 5, 5), ("Controlled", 0, 0), ("Generation", 3, 3)]
        );
        // Redrawn after every append
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_monthly_load_single_trace() {
        let source = FakeSource::new(vec![Ok(monthly())]);
        let (service, _) = service(source);

        let page = service.page(METER, PageVariant::Monthly).await;
        assert_eq!(page, "1 Monthly traces=1 loading=false alert=None");

        let traces = service.traces(METER, PageVariant::Monthly).await;
        assert_eq!(traces.len(), 1);
        assert_eq!(
            serde_json::to_value(&traces[0]).unwrap(),
            serde_json::json!({"type": "bar", "x": [1, 2], "y": [2, 3], "name": "Use"})
        );
    }

    #[tokio::test]
    async fn test_first_render_hides_loading() {
        let source = FakeSource::new(vec![Ok(daily([1, 1, 1]))]);
        let (service, renderer) = service(source);

        service.load(METER, PageVariant::Daily).await.unwrap();

        let page = service.page(METER, PageVariant::Daily).await;
        assert!(page.contains("loading=false"));
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_chart_and_loading() {
        let source = FakeSource::new(vec![Err(decode_error())]);
        let (service, _) = service(source);

        assert!(service.load(METER, PageVariant::Daily).await.is_err());

        let page = service.page(METER, PageVariant::Daily).await;
        assert!(page.starts_with(
            "1 Daily traces=0 loading=true alert=Some(\"Error loading daily totals invalid payload"
        ));
        assert!(service.traces(METER, PageVariant::Daily).await.is_empty());
    }

    #[tokio::test]
    async fn test_page_fetches_once() {
        let source = FakeSource::new(vec![Ok(daily([1, 1, 1])), Ok(daily([1, 1, 1]))]);
        let (service, _) = service(source.clone());

        let first = service.page(METER, PageVariant::Daily).await;
        let second = service.page(METER, PageVariant::Daily).await;
        service.traces(METER, PageVariant::Daily).await;

        assert_eq!(first, second);
        assert_eq!(first, "1 Daily traces=3 loading=false alert=None");
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_page_load_is_not_retried() {
        let source = FakeSource::new(vec![Err(decode_error()), Ok(daily([1, 1, 1]))]);
        let (service, _) = service(source.clone());

        service.page(METER, PageVariant::Daily).await;
        service.page(METER, PageVariant::Daily).await;

        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_loads_append() {
        let source = FakeSource::new(vec![Ok(daily([2, 2, 2])), Ok(daily([4, 4, 4]))]);
        let (service, _) = service(source);

        service.load(METER, PageVariant::Daily).await.unwrap();
        service.load(METER, PageVariant::Daily).await.unwrap();

        let lengths: Vec<usize> = service
            .traces(METER, PageVariant::Daily)
            .await
            .iter()
            .map(|t| t.x.len())
            .collect();
        assert_eq!(lengths, vec![2, 2, 2, 4, 4, 4]);
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_traces() {
        let source = FakeSource::new(vec![Ok(daily([1, 2, 3])), Err(decode_error())]);
        let (service, _) = service(source);

        service.load(METER, PageVariant::Daily).await.unwrap();
        assert!(service.load(METER, PageVariant::Daily).await.is_err());

        let page = service.page(METER, PageVariant::Daily).await;
        assert!(page.starts_with("1 Daily traces=3 loading=false alert=Some("));
        assert_eq!(service.traces(METER, PageVariant::Daily).await.len(), 3);
    }

    #[tokio::test]
    async fn test_meters_have_separate_charts() {
        let source = FakeSource::new(vec![
            Ok(daily([1, 1, 1])),
            Ok(daily([2, 2, 2])),
            Ok(monthly()),
        ]);
        let (service, _) = service(source.clone());

        let first = service.page(MeterId(1), PageVariant::Daily).await;
        let second = service.page(MeterId(2), PageVariant::Daily).await;
        service.page(MeterId(1), PageVariant::Monthly).await;
        service.page(MeterId(2), PageVariant::Daily).await;

        assert_eq!(first, "1 Daily traces=3 loading=false alert=None");
        assert_eq!(second, "2 Daily traces=3 loading=false alert=None");
        assert_eq!(
            service.traces(MeterId(2), PageVariant::Daily).await[0].x.len(),
            2
        );
        assert_eq!(service.traces(MeterId(1), PageVariant::Monthly).await.len(), 1);
        assert_eq!(
            source.calls(),
            vec![
                (MeterId(1), PageVariant::Daily),
                (MeterId(2), PageVariant::Daily),
                (MeterId(1), PageVariant::Monthly),
            ]
        );
    }
}
