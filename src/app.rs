//! Main application state and the `eframe::App` implementation.
//!
//! All network work (list, detail, create, update) runs on background
//! threads and reports back over mpsc channels; the UI thread polls the
//! receivers once per frame. Detail fetches are tagged with a
//! monotonically increasing request token, and a response is applied
//! only when its token still matches the latest one issued, so a slow
//! response for a dataset the user already navigated away from can
//! never overwrite the current view.

use eframe::egui;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::api::{self, DatasetSummary, Stats};
use crate::brush::BrushState;
use crate::display::{prepare_chart_data, ChartData};
use crate::series::{sanitize_series, Sample};
use crate::state::{
    ChartCacheKey, DisplayMode, FetchResult, FetchState, LayoutMode, ListResult, MutationResult,
    ToastType, ViewportClass,
};
use crate::stats::{channel_minima, ChannelMinima};

/// A fully loaded dataset: identity, service aggregates, and the
/// sanitized sample series everything downstream works from.
pub struct ActiveDataset {
    pub id: i64,
    pub name: String,
    pub stats: Stats,
    /// Sanitized series; raw samples with non-finite fields are gone
    pub series: Vec<Sample>,
    /// Client-side per-channel minima over the full sanitized series
    pub minima: Option<ChannelMinima>,
}

/// Main application state
pub struct MyoViewApp {
    /// Dataset summaries for the sidebar list
    pub(crate) datasets: Vec<DatasetSummary>,
    /// Channel for the in-flight list fetch
    list_receiver: Option<Receiver<ListResult>>,
    pub(crate) list_loading: bool,

    /// The dataset currently on screen
    pub(crate) active: Option<ActiveDataset>,
    /// Channel for the in-flight detail fetch
    fetch_receiver: Option<Receiver<FetchResult>>,
    pub(crate) fetch_state: FetchState,
    /// Token of the most recently issued detail fetch
    request_token: u64,

    /// Channel for an in-flight create/update call
    mutation_receiver: Option<Receiver<MutationResult>>,
    pub(crate) mutation_in_flight: bool,

    pub(crate) display_mode: DisplayMode,
    pub(crate) layout_mode: LayoutMode,
    /// Memoized display-ready data per (dataset, mode, viewport)
    chart_cache: HashMap<ChartCacheKey, ChartData>,
    /// View-window selection over the displayed series
    pub(crate) brush: BrushState,

    /// Toast message for user feedback
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,

    // === Upload form ===
    pub(crate) upload_name: String,
    pub(crate) upload_path: Option<PathBuf>,
    // === Edit form ===
    pub(crate) edit_open: bool,
    pub(crate) edit_name: String,
    pub(crate) edit_path: Option<PathBuf>,
}

impl Default for MyoViewApp {
    fn default() -> Self {
        Self {
            datasets: Vec::new(),
            list_receiver: None,
            list_loading: false,
            active: None,
            fetch_receiver: None,
            fetch_state: FetchState::Idle,
            request_token: 0,
            mutation_receiver: None,
            mutation_in_flight: false,
            display_mode: DisplayMode::default(),
            layout_mode: LayoutMode::default(),
            chart_cache: HashMap::new(),
            brush: BrushState::default(),
            toast_message: None,
            upload_name: String::new(),
            upload_path: None,
            edit_open: false,
            edit_name: String::new(),
            edit_path: None,
        }
    }
}

impl MyoViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        app.refresh_datasets();
        app
    }

    // ========================================================================
    // Background Fetches
    // ========================================================================

    /// Start fetching the dataset list in the background
    pub(crate) fn refresh_datasets(&mut self) {
        if self.list_loading {
            return;
        }
        self.list_loading = true;

        let (sender, receiver): (Sender<ListResult>, Receiver<ListResult>) = channel();
        self.list_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match api::fetch_dataset_list() {
                Ok(datasets) => ListResult::Success(datasets),
                Err(e) => ListResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Select a dataset from the list. A no-op when it is already
    /// active or already being fetched.
    pub(crate) fn select_dataset(&mut self, id: i64) {
        if let FetchState::Loading(pending) = self.fetch_state {
            if pending == id {
                return;
            }
        }
        if self.active.as_ref().is_some_and(|a| a.id == id) {
            return;
        }
        self.reload_dataset(id);
    }

    /// Fetch a dataset unconditionally (used after an update replaces
    /// its contents on the server)
    pub(crate) fn reload_dataset(&mut self, id: i64) {
        self.request_token += 1;
        let token = self.request_token;
        self.fetch_state = FetchState::Loading(id);

        let (sender, receiver): (Sender<FetchResult>, Receiver<FetchResult>) = channel();
        self.fetch_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match api::fetch_dataset(id) {
                Ok(detail) => FetchResult::Success(token, Box::new(detail)),
                Err(e) => FetchResult::Error(token, e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Create a dataset from the upload form
    pub(crate) fn start_create_dataset(&mut self) {
        let name = self.upload_name.trim().to_string();
        if name.is_empty() {
            self.show_toast("Enter a dataset name", ToastType::Error);
            return;
        }
        let Some(path) = self.upload_path.clone() else {
            self.show_toast("Choose an .xlsx file", ToastType::Error);
            return;
        };

        self.mutation_in_flight = true;
        let (sender, receiver): (Sender<MutationResult>, Receiver<MutationResult>) = channel();
        self.mutation_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match api::create_dataset(&name, &path) {
                Ok(id) => MutationResult::Created(id),
                Err(e) => MutationResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Update the active dataset from the edit form
    pub(crate) fn start_update_dataset(&mut self) {
        let Some(id) = self.active.as_ref().map(|a| a.id) else {
            return;
        };
        let name = self.edit_name.trim().to_string();
        if name.is_empty() {
            self.show_toast("Enter a dataset name", ToastType::Error);
            return;
        }
        let path = self.edit_path.clone();

        self.mutation_in_flight = true;
        let (sender, receiver): (Sender<MutationResult>, Receiver<MutationResult>) = channel();
        self.mutation_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match api::update_dataset(id, &name, path.as_deref()) {
                Ok(()) => MutationResult::Updated(id),
                Err(e) => MutationResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    // ========================================================================
    // Completion Polling
    // ========================================================================

    /// Check for a completed list fetch
    fn check_list_complete(&mut self) {
        if let Some(receiver) = &self.list_receiver {
            if let Ok(result) = receiver.try_recv() {
                match result {
                    ListResult::Success(datasets) => {
                        tracing::info!(count = datasets.len(), "dataset list loaded");
                        self.datasets = datasets;
                    }
                    ListResult::Error(e) => {
                        tracing::warn!(error = %e, "dataset list fetch failed");
                        self.show_toast(&format!("Error: {}", e), ToastType::Error);
                    }
                }
                self.list_receiver = None;
                self.list_loading = false;
            }
        }
    }

    /// Check for a completed detail fetch. Responses whose token no
    /// longer matches the latest issued one are discarded.
    fn check_fetch_complete(&mut self) {
        if let Some(receiver) = &self.fetch_receiver {
            if let Ok(result) = receiver.try_recv() {
                let token = match &result {
                    FetchResult::Success(token, _) | FetchResult::Error(token, _) => *token,
                };
                if token != self.request_token {
                    tracing::warn!(
                        token,
                        latest = self.request_token,
                        "discarding stale dataset response"
                    );
                    return;
                }

                match result {
                    FetchResult::Success(_, detail) => {
                        let series = sanitize_series(&detail.series);
                        let minima = channel_minima(&series);
                        tracing::info!(
                            id = detail.id,
                            raw = detail.series.len(),
                            sanitized = series.len(),
                            "dataset loaded"
                        );
                        self.active = Some(ActiveDataset {
                            id: detail.id,
                            name: detail.name,
                            stats: detail.stats,
                            series,
                            minima,
                        });
                        self.chart_cache.clear();
                        self.edit_open = false;
                    }
                    FetchResult::Error(_, e) => {
                        tracing::warn!(error = %e, "dataset fetch failed");
                        self.show_toast(&format!("Error: {}", e), ToastType::Error);
                    }
                }
                self.fetch_receiver = None;
                self.fetch_state = FetchState::Idle;
            }
        }
    }

    /// Check for a completed create/update call
    fn check_mutation_complete(&mut self) {
        if let Some(receiver) = &self.mutation_receiver {
            if let Ok(result) = receiver.try_recv() {
                match result {
                    MutationResult::Created(id) => {
                        self.show_toast("Dataset created", ToastType::Success);
                        self.upload_name.clear();
                        self.upload_path = None;
                        self.refresh_datasets();
                        self.select_dataset(id);
                    }
                    MutationResult::Updated(id) => {
                        self.show_toast("Dataset updated", ToastType::Success);
                        self.edit_open = false;
                        self.edit_path = None;
                        self.refresh_datasets();
                        self.reload_dataset(id);
                    }
                    MutationResult::Error(e) => {
                        tracing::warn!(error = %e, "dataset upload failed");
                        self.show_toast(&format!("Error: {}", e), ToastType::Error);
                    }
                }
                self.mutation_receiver = None;
                self.mutation_in_flight = false;
            }
        }
    }

    // ========================================================================
    // Chart Data Access
    // ========================================================================

    /// Cache key for the currently displayed series, if any dataset is
    /// active
    pub(crate) fn chart_key(&self, viewport: ViewportClass) -> Option<ChartCacheKey> {
        self.active.as_ref().map(|active| ChartCacheKey {
            dataset_id: active.id,
            mode: self.display_mode,
            viewport,
        })
    }

    /// Make sure display-ready data for `key` is cached, then return it.
    /// A hit performs zero recomputation.
    pub(crate) fn chart_data(&mut self, key: ChartCacheKey) -> Option<&ChartData> {
        if !self.chart_cache.contains_key(&key) {
            let active = self.active.as_ref()?;
            let data = prepare_chart_data(&active.series, key.mode, key.viewport);
            self.chart_cache.insert(key, data);
        }
        self.chart_cache.get(&key)
    }

    /// Identity tag of the displayed series. Folds in the chart key
    /// (dataset, mode, viewport) and the layout mode, so a change in
    /// any of them hands the brush a different tag and clears the
    /// selection.
    pub(crate) fn series_tag(&self, key: ChartCacheKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.layout_mode.hash(&mut hasher);
        hasher.finish()
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Show a toast message
    pub(crate) fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), Instant::now(), toast_type));
    }

    /// Whether any background work is in flight (keeps spinners alive)
    fn is_busy(&self) -> bool {
        self.list_loading
            || self.mutation_in_flight
            || matches!(self.fetch_state, FetchState::Loading(_))
    }
}

impl eframe::App for MyoViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background work
        self.check_list_complete();
        self.check_fetch_complete();
        self.check_mutation_complete();

        ctx.set_visuals(egui::Visuals::dark());

        // Request repaint while background work runs (spinner animation
        // and prompt result pickup)
        if self.is_busy() {
            ctx.request_repaint();
        }

        self.render_toast(ctx);

        // Viewport class is derived from the window width each frame
        let viewport = ViewportClass::from_width(ctx.screen_rect().width());

        egui::SidePanel::left("datasets_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_datasets_panel(ui);
            });

        egui::TopBottomPanel::bottom("stats_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_stats_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_toolbar(ui);
            ui.separator();
            self.render_chart(ui, viewport);
        });

        if self.edit_open {
            self.render_edit_window(ctx);
        }
    }
}
