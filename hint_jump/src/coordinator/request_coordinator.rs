// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns bursts of show and hide requests into at most one rendering pass.
//!
//! - [`RequestCoordinator::request_show`] is debounced: every call cancels the pending
//!   one and restarts the delay, so only the parameters of the last call in a burst
//!   are rendered.
//! - Rendering happens in batches of [`RENDER_BATCH_SIZE`] hints with a yield to the
//!   runtime between batches. Before each batch the pass checks that it is still the
//!   current one, so [`RequestCoordinator::request_hide`] (or a newer show) stops it
//!   part way.
//! - Every hide clears the display, even if nothing was shown.

use std::{fmt,
          sync::{Arc, Mutex, MutexGuard, PoisonError,
                 atomic::{AtomicBool, AtomicU64, Ordering}},
          time::{Duration, Instant}};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{Clock, CursorSource, EditorMode, HintJumpConfig, HintMapping, HintRenderer,
            InputResolution, LabelCache, LabelCacheStats, PerfMetrics, PerfOperation,
            PerfSummary, SystemClock, TimestampMs, TinyInlineString, VisualRange,
            WindowId, WordSource, assign_hints, filter_words_in_range, resolve_input};

/// Hints drawn per batch before yielding.
pub const RENDER_BATCH_SIZE: usize = 15;

/// Everything a show request needs besides the host collaborators.
#[derive(Debug, Clone)]
pub struct ShowParams {
    pub mode: EditorMode,
    pub config: Arc<HintJumpConfig>,
    pub active_window: Option<WindowId>,
    /// The motion that triggered the request, used for per-key minimum word length.
    pub motion_key: Option<TinyInlineString>,
    /// Only words on these lines get hints.
    pub visual_range: Option<VisualRange>,
}

impl ShowParams {
    #[must_use]
    pub fn new(config: Arc<HintJumpConfig>) -> Self {
        Self {
            mode: EditorMode::Normal,
            config,
            active_window: None,
            motion_key: None,
            visual_range: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EditorMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_active_window(mut self, window: WindowId) -> Self {
        self.active_window = Some(window);
        self
    }

    #[must_use]
    pub fn with_motion_key(mut self, key: &str) -> Self {
        self.motion_key = Some(key.into());
        self
    }

    /// Limits hints to the selection, and switches to [`EditorMode::Visual`].
    #[must_use]
    pub fn with_visual_range(mut self, range: VisualRange) -> Self {
        self.mode = EditorMode::Visual;
        self.visual_range = Some(range);
        self
    }
}

#[derive(Debug)]
struct PendingShow {
    generation: u64,
    handle: JoinHandle<()>,
}

/// State shared between a [`RequestCoordinator`] and the tasks it spawns.
///
/// `generation` is bumped by every show and hide request. A rendering pass remembers
/// the generation it started with and stops as soon as it differs. `rendering` holds
/// the generation of the pass that is drawing, `0` for none.
#[derive(Debug, Default)]
pub struct CoordinatorContext {
    rendering: AtomicU64,
    visible: AtomicBool,
    generation: AtomicU64,
    label_cache: Mutex<LabelCache>,
    perf_metrics: Mutex<PerfMetrics>,
    current_hints: Mutex<Arc<Vec<HintMapping>>>,
    last_config: Mutex<Option<Arc<HintJumpConfig>>>,
    pending_show: Mutex<Option<PendingShow>>,
}

impl CoordinatorContext {
    /// Stops any rendering pass in flight, and returns the new generation.
    pub fn cancel_rendering(&self) -> u64 {
        self.rendering.store(0, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn generation(&self) -> u64 { self.generation.load(Ordering::SeqCst) }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        let rendering = self.rendering.load(Ordering::SeqCst);
        rendering != 0 && rendering == self.generation()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool { self.visible.load(Ordering::SeqCst) }

    /// `true` while a debounced show is waiting for its delay.
    #[must_use]
    pub fn has_pending_show(&self) -> bool { lock(&self.pending_show).is_some() }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation && self.rendering.load(Ordering::SeqCst) == generation
    }

    fn abort_pending_show(&self) {
        if let Some(pending) = lock(&self.pending_show).take() {
            pending.handle.abort();
        }
    }

    /// Called by the debounced task once its delay is over. From then on, only the
    /// generation check can stop it.
    fn release_pending_show(&self, generation: u64) {
        let mut pending_show = lock(&self.pending_show);
        if pending_show
            .as_ref()
            .is_some_and(|it| it.generation == generation)
        {
            pending_show.take();
        }
    }

    fn record(&self, operation: PerfOperation, duration: Duration) {
        lock(&self.perf_metrics).record(operation, duration);
    }
}

/// A poisoned lock only means another task panicked mid-update. The data is still
/// usable for this state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything the coordinator knows at one point in time, for bug reports.
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    pub timestamp_ms: TimestampMs,
    /// Config of the last show request, if any.
    pub config: Option<HintJumpConfig>,
    pub hints_visible: bool,
    pub is_rendering: bool,
    pub generation: u64,
    pub current_hints: Vec<HintMapping>,
    pub metrics: Vec<PerfSummary>,
    pub label_cache: LabelCacheStats,
}

/// Owns the host collaborators and serializes show and hide requests against them.
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RequestCoordinator {
    context: Arc<CoordinatorContext>,
    word_source: Arc<dyn WordSource>,
    cursor_source: Arc<dyn CursorSource>,
    renderer: Arc<dyn HintRenderer>,
}

impl fmt::Debug for RequestCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCoordinator")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl RequestCoordinator {
    pub fn new(
        word_source: Arc<dyn WordSource>,
        cursor_source: Arc<dyn CursorSource>,
        renderer: Arc<dyn HintRenderer>,
    ) -> Self {
        Self {
            context: Arc::new(CoordinatorContext::default()),
            word_source,
            cursor_source,
            renderer,
        }
    }

    #[must_use]
    pub fn context(&self) -> &Arc<CoordinatorContext> { &self.context }

    #[must_use]
    pub fn is_hints_visible(&self) -> bool { self.context.is_visible() }

    /// The hints from the last completed or in-flight rendering pass.
    #[must_use]
    pub fn current_hints(&self) -> Arc<Vec<HintMapping>> {
        Arc::clone(&lock(&self.context.current_hints))
    }

    #[must_use]
    pub fn perf_snapshot(&self) -> Vec<PerfSummary> {
        lock(&self.context.perf_metrics).snapshot()
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> LabelCacheStats {
        lock(&self.context.label_cache).stats()
    }

    #[must_use]
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            timestamp_ms: SystemClock.now_ms(),
            config: lock(&self.context.last_config).as_deref().cloned(),
            hints_visible: self.is_hints_visible(),
            is_rendering: self.context.is_rendering(),
            generation: self.context.generation(),
            current_hints: self.current_hints().to_vec(),
            metrics: self.perf_snapshot(),
            label_cache: self.label_cache_stats(),
        }
    }

    /// Drops the collected timings.
    pub fn clear_debug_info(&self) { lock(&self.context.perf_metrics).clear(); }

    /// Schedules a rendering pass after `config.debounce_delay_ms`, replacing any
    /// pending one. Does nothing when the config is disabled or when called outside a
    /// tokio runtime.
    pub fn request_show(&self, params: ShowParams) {
        if !params.config.enabled {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(message = "request_show called outside of a tokio runtime");
            return;
        };

        let mut pending_show = lock(&self.context.pending_show);
        if let Some(pending) = pending_show.take() {
            pending.handle.abort();
        }
        // A newer request supersedes whatever is rendering now.
        let generation = self.context.cancel_rendering();

        let delay = Duration::from_millis(params.config.debounce_delay_ms);
        let this = self.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            this.context.release_pending_show(generation);
            if this.context.generation() == generation {
                this.render_pass(params, generation).await;
            }
        });
        *pending_show = Some(PendingShow { generation, handle });
    }

    /// Cancels anything pending or in flight and renders right away, skipping the
    /// debounce delay. Returns the hints that were computed.
    pub async fn show_immediately(&self, params: ShowParams) -> Arc<Vec<HintMapping>> {
        if !params.config.enabled {
            return Arc::default();
        }
        self.context.abort_pending_show();
        let generation = self.context.cancel_rendering();
        self.render_pass(params, generation).await
    }

    /// Cancels any pending or in-flight show and clears the display.
    pub fn request_hide(&self) {
        let start = Instant::now();

        self.context.abort_pending_show();
        self.context.cancel_rendering();
        self.context.visible.store(false, Ordering::SeqCst);
        *lock(&self.context.current_hints) = Arc::default();
        self.renderer.clear();

        self.context.record(PerfOperation::HideHints, start.elapsed());
    }

    /// Feeds typed label text to the visible hints. A complete label hides the hints
    /// and returns the target. A prefix redraws only the remaining candidates, without
    /// generating new labels. No match leaves the display alone.
    pub fn narrow(&self, input: &str) -> InputResolution {
        let hints = self.current_hints();
        let resolution = resolve_input(&hints, input);
        match &resolution {
            InputResolution::Jump(_) => self.request_hide(),
            InputResolution::Narrowed(candidates) => {
                self.renderer.clear();
                self.renderer.render(candidates);
            }
            InputResolution::NoMatch => {}
        }
        resolution
    }

    #[tracing::instrument(skip(self, params), fields(mode = ?params.mode))]
    async fn render_pass(&self, params: ShowParams, generation: u64) -> Arc<Vec<HintMapping>> {
        let show_start = Instant::now();
        let config = &params.config;

        if self.context.generation() != generation {
            tracing::debug!(message = "Superseded before starting", generation);
            return Arc::default();
        }
        self.context.rendering.store(generation, Ordering::SeqCst);
        lock(&self.context.perf_metrics).log_samples = config.performance_log;
        *lock(&self.context.last_config) = Some(Arc::clone(config));

        let start = Instant::now();
        let mut words = self.word_source.list_visible_words();
        if let Some(range) = &params.visual_range {
            words = filter_words_in_range(&words, range);
        }
        self.context.record(PerfOperation::WordDetection, start.elapsed());

        let cursor = self.cursor_source.cursor_position();

        let start = Instant::now();
        let count = words.len().min(config.max_hints);
        let labels = lock(&self.context.label_cache).get_or_generate(count, &config.label_pool());
        self.context.record(PerfOperation::HintGeneration, start.elapsed());

        let start = Instant::now();
        let options = config.assign_options(params.motion_key.as_deref(), params.active_window);
        let hints = Arc::new(assign_hints(&words, &labels, cursor, params.mode, &options));
        self.context.record(PerfOperation::HintAssignment, start.elapsed());

        if !self.context.is_current(generation) {
            tracing::debug!(message = "Superseded before rendering", generation);
            return hints;
        }

        *lock(&self.context.current_hints) = Arc::clone(&hints);
        self.context.visible.store(!hints.is_empty(), Ordering::SeqCst);
        self.renderer.clear();

        let mut batches = hints.chunks(RENDER_BATCH_SIZE).peekable();
        while let Some(batch) = batches.next() {
            if !self.context.is_current(generation) {
                tracing::debug!(message = "Rendering cancelled", generation);
                return hints;
            }
            self.renderer.render(batch);
            if batches.peek().is_some() {
                tokio::task::yield_now().await;
            }
        }

        // Only clears the flag if no newer pass has taken over.
        let _unused = self.context.rendering.compare_exchange(
            generation,
            0,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.context.record(PerfOperation::ShowHints, show_start.elapsed());

        if config.debug_mode {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Rendered hints", snapshot = ?self.debug_snapshot());
        }

        hints
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CursorPos, HintPosition, VisualMode, Word};

    /// What the renderer does from inside its first `render` call.
    #[derive(Debug)]
    enum OnFirstRender {
        CancelRendering(Arc<CoordinatorContext>),
        RequestShow(RequestCoordinator, ShowParams),
        RequestHide(RequestCoordinator),
    }

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        batches: Mutex<Vec<Vec<HintMapping>>>,
        clear_count: AtomicU64,
        on_first_render: OnceLock<OnFirstRender>,
        fired: AtomicBool,
    }

    impl RecordingRenderer {
        fn batches(&self) -> Vec<Vec<HintMapping>> { self.batches.lock().unwrap().clone() }

        fn batch_sizes(&self) -> Vec<usize> { self.batches().iter().map(Vec::len).collect() }

        fn clear_count(&self) -> u64 { self.clear_count.load(Ordering::SeqCst) }
    }

    impl HintRenderer for RecordingRenderer {
        fn render(&self, hints: &[HintMapping]) {
            self.batches.lock().unwrap().push(hints.to_vec());
            if self.fired.swap(true, Ordering::SeqCst) {
                return;
            }
            match self.on_first_render.get() {
                Some(OnFirstRender::CancelRendering(context)) => {
                    context.cancel_rendering();
                }
                Some(OnFirstRender::RequestShow(coordinator, params)) => {
                    coordinator.request_show(params.clone());
                }
                Some(OnFirstRender::RequestHide(coordinator)) => coordinator.request_hide(),
                None => {}
            }
        }

        fn clear(&self) { self.clear_count.fetch_add(1, Ordering::SeqCst); }
    }

    fn words(count: usize) -> Vec<Word> {
        (0..count)
            .map(|index| Word::new(format!("word{index}"), index + 2, 1))
            .collect()
    }

    fn setup(word_count: usize) -> (RequestCoordinator, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::default());
        let coordinator = RequestCoordinator::new(
            Arc::new(move || words(word_count)),
            Arc::new(CursorPos::new(1, 1)),
            renderer.clone(),
        );
        (coordinator, renderer)
    }

    fn params(config: HintJumpConfig) -> ShowParams { ShowParams::new(Arc::new(config)) }

    fn debounce_ms() -> u64 { HintJumpConfig::default().debounce_delay_ms }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_show_requests_renders_last_one_once() {
        let (coordinator, renderer) = setup(3);

        for position in [HintPosition::Start, HintPosition::Overlay, HintPosition::End] {
            coordinator.request_show(params(HintJumpConfig {
                hint_position: position,
                ..Default::default()
            }));
            tokio::time::sleep(Duration::from_millis(debounce_ms() / 2)).await;
        }
        assert!(renderer.batches().is_empty());

        tokio::time::sleep(Duration::from_millis(debounce_ms() * 2)).await;

        let batches = renderer.batches();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].iter().all(|it| it.placement == HintPosition::End));
        assert!(coordinator.is_hints_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_slot_is_released_when_delay_fires() {
        let (coordinator, _renderer) = setup(3);

        coordinator.request_show(params(HintJumpConfig::default()));
        assert!(coordinator.context().has_pending_show());

        tokio::time::sleep(Duration::from_millis(debounce_ms() * 2)).await;
        assert!(!coordinator.context().has_pending_show());
        assert!(coordinator.is_hints_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_cancels_pending_show() {
        let (coordinator, renderer) = setup(3);

        coordinator.request_show(params(HintJumpConfig::default()));
        coordinator.request_hide();
        tokio::time::sleep(Duration::from_millis(debounce_ms() * 4)).await;

        assert!(renderer.batches().is_empty());
        assert_eq!(renderer.clear_count(), 1);
        assert!(!coordinator.is_hints_visible());
        assert!(!coordinator.context().has_pending_show());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_without_hints_still_clears() {
        let (coordinator, renderer) = setup(0);
        coordinator.request_hide();
        coordinator.request_hide();
        assert_eq!(renderer.clear_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rendering_is_batched() {
        let (coordinator, renderer) = setup(40);

        let hints = coordinator
            .show_immediately(params(HintJumpConfig {
                default_min_word_length: 1,
                ..Default::default()
            }))
            .await;

        assert_eq!(hints.len(), 40);
        assert_eq!(renderer.batch_sizes(), vec![15, 15, 10]);
        assert!(!coordinator.context().is_rendering());
        assert_eq!(coordinator.current_hints().len(), 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_between_batches() {
        let (coordinator, renderer) = setup(40);
        renderer
            .on_first_render
            .set(OnFirstRender::CancelRendering(Arc::clone(coordinator.context())))
            .unwrap();

        coordinator.show_immediately(params(HintJumpConfig::default())).await;

        assert_eq!(renderer.batch_sizes(), vec![RENDER_BATCH_SIZE]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_show_request_stops_rendering_in_flight() {
        let (coordinator, renderer) = setup(40);
        renderer
            .on_first_render
            .set(OnFirstRender::RequestShow(
                coordinator.clone(),
                params(HintJumpConfig::default()),
            ))
            .unwrap();

        let hints = coordinator.show_immediately(params(HintJumpConfig::default())).await;
        assert_eq!(hints.len(), 40);
        // The first pass stopped after one batch, the debounced one is still waiting.
        assert_eq!(renderer.batch_sizes(), vec![15]);
        assert!(coordinator.context().has_pending_show());

        tokio::time::sleep(Duration::from_millis(debounce_ms() * 2)).await;

        assert_eq!(renderer.batch_sizes(), vec![15, 15, 15, 10]);
        assert!(!coordinator.context().is_rendering());
        assert!(coordinator.is_hints_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_request_stops_rendering_in_flight() {
        let (coordinator, renderer) = setup(40);
        renderer
            .on_first_render
            .set(OnFirstRender::RequestHide(coordinator.clone()))
            .unwrap();

        coordinator.show_immediately(params(HintJumpConfig::default())).await;

        assert_eq!(renderer.batch_sizes(), vec![15]);
        // One clear before the first batch, one from the hide.
        assert_eq!(renderer.clear_count(), 2);
        assert!(!coordinator.is_hints_visible());
        assert!(!coordinator.context().is_rendering());
        assert!(coordinator.current_hints().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_pass_does_not_mark_rendering() {
        let (coordinator, renderer) = setup(5);
        let stale = coordinator.context().cancel_rendering();
        coordinator.request_hide();

        let hints = coordinator
            .render_pass(params(HintJumpConfig::default()), stale)
            .await;

        assert!(hints.is_empty());
        assert!(!coordinator.context().is_rendering());
        assert!(renderer.batches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_visual_range_limits_hints_to_selection() {
        // Words are on lines 2 to 11.
        let (coordinator, _renderer) = setup(10);

        let hints = coordinator
            .show_immediately(
                params(HintJumpConfig::default())
                    .with_visual_range(VisualRange::new(VisualMode::Linewise, 5, 3)),
            )
            .await;

        let mut lines: Vec<usize> = hints.iter().map(|it| it.word.line).collect();
        lines.sort_unstable();
        assert_eq!(lines, vec![3, 4, 5]);
        // Visual mode uses `visual_hint_position`, which defaults to end.
        assert!(hints.iter().all(|it| it.placement == HintPosition::End));
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_hints_caps_labels() {
        let (coordinator, _renderer) = setup(20);

        let hints = coordinator
            .show_immediately(params(HintJumpConfig {
                max_hints: 5,
                ..Default::default()
            }))
            .await;

        assert_eq!(hints.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_label_cache_is_reused() {
        let (coordinator, _renderer) = setup(10);

        coordinator.show_immediately(params(HintJumpConfig::default())).await;
        coordinator.show_immediately(params(HintJumpConfig::default())).await;

        let stats = coordinator.label_cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_config_does_nothing() {
        let (coordinator, renderer) = setup(5);
        let config = HintJumpConfig {
            enabled: false,
            ..Default::default()
        };

        coordinator.request_show(params(config.clone()));
        tokio::time::sleep(Duration::from_millis(debounce_ms() * 4)).await;
        let hints = coordinator.show_immediately(params(config)).await;

        assert!(hints.is_empty());
        assert!(renderer.batches().is_empty());
        assert_eq!(renderer.clear_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrow_then_jump() {
        let (coordinator, renderer) = setup(30);
        let hints = coordinator.show_immediately(params(HintJumpConfig::default())).await;

        // Past the 21 single char labels, the rest are grouped under "B".
        let grouped = hints.iter().filter(|it| it.hint.starts_with('B')).count();
        assert!(grouped > 1);

        match coordinator.narrow("b") {
            InputResolution::Narrowed(candidates) => assert_eq!(candidates.len(), grouped),
            other => panic!("expected Narrowed, got {other:?}"),
        }
        assert_eq!(renderer.batches().last().unwrap().len(), grouped);

        let target = hints[0].clone();
        assert_eq!(
            coordinator.narrow(&target.hint.to_lowercase()),
            InputResolution::Jump(target)
        );
        assert!(!coordinator.is_hints_visible());
        assert!(coordinator.current_hints().is_empty());

        assert_eq!(coordinator.narrow("a"), InputResolution::NoMatch);
    }

    #[tokio::test(start_paused = true)]
    async fn test_perf_metrics_are_recorded() {
        let (coordinator, _renderer) = setup(4);
        coordinator.show_immediately(params(HintJumpConfig::default())).await;
        coordinator.request_hide();

        let operations: Vec<PerfOperation> = coordinator
            .perf_snapshot()
            .iter()
            .map(|it| it.operation)
            .collect();
        assert_eq!(
            operations,
            vec![
                PerfOperation::ShowHints,
                PerfOperation::HideHints,
                PerfOperation::WordDetection,
                PerfOperation::HintGeneration,
                PerfOperation::HintAssignment,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_performance_log_follows_config() {
        let (coordinator, _renderer) = setup(4);
        let log_samples = || lock(&coordinator.context().perf_metrics).log_samples;
        assert!(!log_samples());

        coordinator
            .show_immediately(params(HintJumpConfig {
                performance_log: true,
                ..Default::default()
            }))
            .await;
        assert!(log_samples());

        coordinator.show_immediately(params(HintJumpConfig::default())).await;
        assert!(!log_samples());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debug_snapshot() {
        let (coordinator, _renderer) = setup(4);
        assert_eq!(coordinator.debug_snapshot().config, None);

        let config = HintJumpConfig {
            debug_mode: true,
            ..Default::default()
        };
        coordinator.show_immediately(params(config.clone())).await;

        let snapshot = coordinator.debug_snapshot();
        assert_eq!(snapshot.config, Some(config));
        assert!(snapshot.hints_visible);
        assert!(!snapshot.is_rendering);
        assert_eq!(snapshot.current_hints.len(), 4);
        assert_eq!(snapshot.metrics.len(), 4);
        assert_eq!(snapshot.label_cache.misses, 1);
        assert!(snapshot.timestamp_ms > 0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["hints_visible"], serde_json::json!(true));
        assert_eq!(json["metrics"][0]["operation"], serde_json::json!("show_hints"));

        coordinator.clear_debug_info();
        assert!(coordinator.debug_snapshot().metrics.is_empty());
    }
}
