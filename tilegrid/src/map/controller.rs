//! Tile map controller.
//!
//! Connects viewport notifications to the grid-section provider and owns the
//! resulting tile set and selection.
//!
//! # Flow
//!
//! ```text
//! on_viewport_change(bounds)
//!     │
//!     ├─ RangeTooBig ──► log, keep tiles
//!     │
//!     └─ Refresh([sw, ne]) ──► spawn fetch (sequence n)
//!                                  │
//!                                  ├─ Ok(lines)  ──► materialize ──► replace tiles
//!                                  └─ Err(e)     ──► log, keep tiles
//! ```
//!
//! # Overlapping Fetches
//!
//! A new viewport never cancels an in-flight fetch. Every dispatch gets a
//! monotonically increasing sequence number; [`StaleResultPolicy`] decides
//! whether a result that resolves after a newer dispatch is still applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use super::config::{StaleResultPolicy, TileMapConfig};
use super::events::TileMapEvent;
use super::shape::TileShape;
use super::state::TileMapState;
use crate::coord::Coordinate;
use crate::grid::{materialize_tiles_with_precision, GridLineSet, Tile, TileKey};
use crate::provider::{GridSectionProvider, ProviderError};
use crate::viewport::{SineDeltas, ViewportBounds, ViewportChangeDetector, ViewportDecision};

/// Result of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The tile set was replaced.
    Applied { sequence: u64, tiles: usize },

    /// The fetch failed; tiles unchanged.
    Failed { sequence: u64, error: ProviderError },

    /// A newer fetch was dispatched first; result discarded.
    Superseded { sequence: u64, latest: u64 },
}

impl RefreshOutcome {
    /// Sequence number of the fetch this outcome belongs to.
    pub fn sequence(&self) -> u64 {
        match self {
            RefreshOutcome::Applied { sequence, .. }
            | RefreshOutcome::Failed { sequence, .. }
            | RefreshOutcome::Superseded { sequence, .. } => *sequence,
        }
    }

    /// True when the tile set was replaced.
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Handle to a fetch spawned by [`TileMap::on_viewport_change`].
#[derive(Debug)]
pub struct RefreshHandle {
    sequence: u64,
    handle: JoinHandle<RefreshOutcome>,
}

impl RefreshHandle {
    /// Sequence number assigned at dispatch.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wait for the fetch to resolve and be applied (or discarded).
    pub async fn join(self) -> Result<RefreshOutcome, JoinError> {
        self.handle.await
    }

    /// Abort the fetch task. Nothing is applied if it has not resolved yet.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Result of a viewport notification.
#[derive(Debug)]
pub enum ViewportOutcome {
    /// A fetch was dispatched.
    Refreshing(RefreshHandle),

    /// The viewport was too large; nothing was fetched.
    RangeTooBig(SineDeltas),
}

impl ViewportOutcome {
    /// The dispatched fetch, if any.
    pub fn into_handle(self) -> Option<RefreshHandle> {
        match self {
            ViewportOutcome::Refreshing(handle) => Some(handle),
            ViewportOutcome::RangeTooBig(_) => None,
        }
    }
}

struct Inner<P> {
    provider: P,
    detector: ViewportChangeDetector,
    config: TileMapConfig,
    state: Mutex<TileMapState>,
    last_dispatched: AtomicU64,
    events: broadcast::Sender<TileMapEvent>,
}

impl<P: GridSectionProvider> Inner<P> {
    fn dispatch_sequence(&self) -> u64 {
        self.last_dispatched.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn emit(&self, event: TileMapEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    async fn fetch_and_apply(&self, sequence: u64, corners: [Coordinate; 2]) -> RefreshOutcome {
        match self.provider.fetch_grid_section(corners).await {
            Ok(lines) => self.apply(sequence, &lines),
            Err(error) => {
                warn!(
                    sequence,
                    provider = self.provider.name(),
                    error = %error,
                    "Grid section fetch failed, keeping current tiles"
                );
                self.emit(TileMapEvent::RefreshFailed {
                    sequence,
                    reason: error.to_string(),
                });
                RefreshOutcome::Failed { sequence, error }
            }
        }
    }

    fn apply(&self, sequence: u64, lines: &GridLineSet) -> RefreshOutcome {
        let tiles = materialize_tiles_with_precision(lines, self.config.key_precision);
        let count = tiles.len();

        {
            let mut state = self.state.lock();
            if self.config.stale_policy == StaleResultPolicy::LatestRequestOnly {
                let latest = self.last_dispatched.load(Ordering::SeqCst);
                if sequence != latest {
                    drop(state);
                    debug!(sequence, latest, "Discarding superseded grid section");
                    self.emit(TileMapEvent::RefreshSuperseded { sequence, latest });
                    return RefreshOutcome::Superseded { sequence, latest };
                }
            }
            state.tiles = tiles;
            state.applied_sequence = sequence;
        }

        info!(sequence, tiles = count, "Grid tiles replaced");
        self.emit(TileMapEvent::TilesReplaced { sequence, count });
        RefreshOutcome::Applied {
            sequence,
            tiles: count,
        }
    }
}

/// Owns the tile set and selection for one map.
///
/// Cheap to clone; clones share state.
pub struct TileMap<P> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for TileMap<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: GridSectionProvider + 'static> TileMap<P> {
    /// Create an empty tile map.
    pub fn new(provider: P, config: TileMapConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                provider,
                detector: ViewportChangeDetector::new(config.sine_delta_threshold),
                config,
                state: Mutex::new(TileMapState::default()),
                last_dispatched: AtomicU64::new(0),
                events,
            }),
        }
    }

    /// Create an empty tile map with default settings.
    pub fn with_defaults(provider: P) -> Self {
        Self::new(provider, TileMapConfig::default())
    }

    /// Seed the tile set from a line set (sequence 0).
    pub fn with_initial_lines(self, lines: &GridLineSet) -> Self {
        {
            let mut state = self.inner.state.lock();
            state.tiles = materialize_tiles_with_precision(lines, self.inner.config.key_precision);
            state.applied_sequence = 0;
        }
        self
    }

    /// Handle a viewport change reported by the map surface.
    ///
    /// When the detector passes, the fetch runs on a spawned task and this
    /// returns immediately. Must be called from within a Tokio runtime.
    pub fn on_viewport_change(&self, bounds: ViewportBounds) -> ViewportOutcome {
        match self.inner.detector.evaluate(&bounds) {
            ViewportDecision::Refresh(corners) => {
                let sequence = self.inner.dispatch_sequence();
                debug!(sequence, %bounds, "Dispatching grid section fetch");

                let inner = Arc::clone(&self.inner);
                let handle =
                    tokio::spawn(async move { inner.fetch_and_apply(sequence, corners).await });

                ViewportOutcome::Refreshing(RefreshHandle { sequence, handle })
            }
            ViewportDecision::RangeTooBig(deltas) => {
                debug!(%bounds, %deltas, "Range too big, skipping grid refresh");
                self.inner.emit(TileMapEvent::RangeTooBig { deltas });
                ViewportOutcome::RangeTooBig(deltas)
            }
        }
    }

    /// Fetch and apply the grid for `bounds`, bypassing the detector.
    pub async fn refresh(&self, bounds: ViewportBounds) -> RefreshOutcome {
        let sequence = self.inner.dispatch_sequence();
        debug!(sequence, %bounds, "Refreshing grid section");
        self.inner.fetch_and_apply(sequence, bounds.corners()).await
    }

    /// Selection callback: mark `key` as the selected tile.
    ///
    /// The key is not checked against the current tile set.
    pub fn select(&self, key: impl Into<TileKey>) {
        let key = key.into();
        debug!(key = %key, "Tile selected");
        self.inner.state.lock().selected = Some(key.clone());
        self.inner
            .emit(TileMapEvent::SelectionChanged { key: Some(key) });
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.inner.state.lock().selected = None;
        self.inner
            .emit(TileMapEvent::SelectionChanged { key: None });
    }

    /// The selected key, if any.
    pub fn selected(&self) -> Option<TileKey> {
        self.inner.state.lock().selected.clone()
    }

    /// A copy of the current tile set.
    pub fn tiles(&self) -> Vec<Tile> {
        self.inner.state.lock().tiles.clone()
    }

    /// A copy of the full state.
    pub fn snapshot(&self) -> TileMapState {
        self.inner.state.lock().clone()
    }

    /// Render model for the current state.
    pub fn shapes(&self) -> Vec<TileShape> {
        self.inner.state.lock().shapes()
    }

    /// Subscribe to state change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<TileMapEvent> {
        self.inner.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLine;
    use crate::provider::StaticGridProvider;
    use tokio::sync::oneshot;

    type FetchResult = Result<GridLineSet, ProviderError>;

    /// Provider whose responses are released by the test.
    struct GatedProvider {
        requested: Mutex<Vec<[Coordinate; 2]>>,
        gates: Mutex<Vec<([Coordinate; 2], oneshot::Receiver<FetchResult>)>>,
    }

    impl GatedProvider {
        fn new() -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
                gates: Mutex::new(Vec::new()),
            }
        }

        fn gate(&self, corners: [Coordinate; 2]) -> oneshot::Sender<FetchResult> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().push((corners, rx));
            tx
        }
    }

    impl GridSectionProvider for GatedProvider {
        async fn fetch_grid_section(
            &self,
            corners: [Coordinate; 2],
        ) -> Result<GridLineSet, ProviderError> {
            self.requested.lock().push(corners);
            let rx = {
                let mut gates = self.gates.lock();
                let idx = gates.iter().position(|(c, _)| *c == corners);
                idx.map(|i| gates.remove(i).1)
            };
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ProviderError::HttpError("gate dropped".into()))),
                None => Err(ProviderError::HttpError("no gate".into())),
            }
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    fn street(sw_lat: f64) -> ViewportBounds {
        ViewportBounds::new(
            Coordinate::new(sw_lat, -0.2890),
            Coordinate::new(sw_lat + 0.0002, -0.2886),
        )
    }

    fn square_at(lat: f64, lng: f64) -> GridLineSet {
        GridLineSet::regular(Coordinate::new(lat, lng), 1, 1, 1.0, 1.0)
    }

    #[tokio::test]
    async fn test_range_too_big_skips_fetch() {
        let provider = GatedProvider::new();
        let map = TileMap::with_defaults(provider);
        let mut events = map.subscribe();

        let outcome = map.on_viewport_change(ViewportBounds::new(
            Coordinate::new(51.0, -1.0),
            Coordinate::new(52.0, 0.0),
        ));

        assert!(matches!(outcome, ViewportOutcome::RangeTooBig(_)));
        assert!(map.inner.provider.requested.lock().is_empty());
        assert_eq!(map.inner.last_dispatched.load(Ordering::SeqCst), 0);
        assert!(matches!(
            events.try_recv(),
            Ok(TileMapEvent::RangeTooBig { .. })
        ));
    }

    #[tokio::test]
    async fn test_refresh_requests_exact_corners() {
        let provider = GatedProvider::new();
        let view = street(51.5316);
        let gate = provider.gate(view.corners());
        let map = TileMap::with_defaults(provider);

        let handle = map.on_viewport_change(view).into_handle().unwrap();
        gate.send(Ok(square_at(0.0, 0.0))).unwrap();
        let outcome = handle.join().await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(
            map.inner.provider.requested.lock().as_slice(),
            &[[view.south_west, view.north_east]]
        );
        assert_eq!(map.tiles().len(), 1);
        assert_eq!(map.snapshot().applied_sequence, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_tiles() {
        let provider = GatedProvider::new();
        let view = street(51.5316);
        let gate = provider.gate(view.corners());
        let map = TileMap::with_defaults(provider).with_initial_lines(&square_at(5.0, 5.0));
        let before = map.tiles();
        let mut events = map.subscribe();

        let handle = map.on_viewport_change(view).into_handle().unwrap();
        gate.send(Err(ProviderError::HttpError("boom".into()))).unwrap();
        let outcome = handle.join().await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Failed { sequence: 1, .. }));
        assert_eq!(map.tiles(), before);
        assert!(matches!(
            events.try_recv(),
            Ok(TileMapEvent::RefreshFailed { sequence: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_last_resolved_wins_by_default() {
        let provider = GatedProvider::new();
        let first = street(51.5316);
        let second = street(51.5320);
        let gate_first = provider.gate(first.corners());
        let gate_second = provider.gate(second.corners());
        let map = TileMap::with_defaults(provider);

        let h1 = map.on_viewport_change(first).into_handle().unwrap();
        let h2 = map.on_viewport_change(second).into_handle().unwrap();
        assert_eq!((h1.sequence(), h2.sequence()), (1, 2));

        gate_second.send(Ok(square_at(2.0, 2.0))).unwrap();
        assert!(h2.join().await.unwrap().is_applied());
        gate_first.send(Ok(square_at(1.0, 1.0))).unwrap();
        assert!(h1.join().await.unwrap().is_applied());

        // The older fetch resolved last and overwrote the newer one.
        let state = map.snapshot();
        assert_eq!(state.applied_sequence, 1);
        assert_eq!(state.tiles[0].diagonal.south_west, Coordinate::new(1.0, 1.0));
    }

    #[tokio::test]
    async fn test_latest_request_only_discards_stale() {
        let provider = GatedProvider::new();
        let first = street(51.5316);
        let second = street(51.5320);
        let gate_first = provider.gate(first.corners());
        let gate_second = provider.gate(second.corners());
        let config = TileMapConfig::default().with_stale_policy(StaleResultPolicy::LatestRequestOnly);
        let map = TileMap::new(provider, config);

        let h1 = map.on_viewport_change(first).into_handle().unwrap();
        let h2 = map.on_viewport_change(second).into_handle().unwrap();

        gate_second.send(Ok(square_at(2.0, 2.0))).unwrap();
        assert!(h2.join().await.unwrap().is_applied());
        gate_first.send(Ok(square_at(1.0, 1.0))).unwrap();
        assert_eq!(
            h1.join().await.unwrap(),
            RefreshOutcome::Superseded {
                sequence: 1,
                latest: 2
            }
        );

        let state = map.snapshot();
        assert_eq!(state.applied_sequence, 2);
        assert_eq!(state.tiles[0].diagonal.south_west, Coordinate::new(2.0, 2.0));
    }

    #[tokio::test]
    async fn test_selection_drives_shapes() {
        let map = TileMap::with_defaults(StaticGridProvider::sample())
            .with_initial_lines(&GridLineSet::regular(Coordinate::new(0.0, 0.0), 2, 2, 1.0, 1.0));

        let key = map.tiles()[3].key.clone();
        map.select(key.clone());

        let shapes = map.shapes();
        let selected: Vec<_> = shapes.iter().filter(|s| s.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, key);
        assert_eq!(map.selected(), Some(key));
    }

    #[tokio::test]
    async fn test_select_unknown_key() {
        let map = TileMap::with_defaults(StaticGridProvider::sample());
        map.select("K");
        assert_eq!(map.selected(), Some(TileKey::new("K")));
        assert!(map.snapshot().selected_tile().is_none());
        assert!(map.shapes().iter().all(|s| !s.is_selected));
    }

    #[tokio::test]
    async fn test_selection_survives_refresh() {
        let initial = GridLineSet::new(vec![
            GridLine::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)),
            GridLine::new(Coordinate::new(1.0, 0.0), Coordinate::new(1.0, 1.0)),
            GridLine::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)),
            GridLine::new(Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 1.0)),
        ]);
        let map = TileMap::with_defaults(StaticGridProvider::new(square_at(40.0, 40.0)))
            .with_initial_lines(&initial);

        let key = map.tiles()[0].key.clone();
        map.select(key.clone());

        let outcome = map.refresh(street(51.5316)).await;
        assert!(outcome.is_applied());
        assert!(map.snapshot().tile(&key).is_none());
        assert_eq!(map.selected(), Some(key));
    }

    #[tokio::test]
    async fn test_clear_selection() {
        let map = TileMap::with_defaults(StaticGridProvider::sample());
        let mut events = map.subscribe();

        map.select("A");
        map.clear_selection();

        assert_eq!(map.selected(), None);
        assert_eq!(
            events.try_recv().unwrap(),
            TileMapEvent::SelectionChanged {
                key: Some(TileKey::new("A"))
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            TileMapEvent::SelectionChanged { key: None }
        );
    }
}
