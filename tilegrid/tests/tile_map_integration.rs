//! Integration tests for the tile map.
//!
//! These tests drive the public API the way a map screen would:
//! - viewport notifications → detector → provider → tiles
//! - tap callbacks → selection → tile shapes
//! - overlapping refreshes under both stale-result policies
//!
//! Run with: `cargo test --test tile_map_integration`

use std::sync::Arc;

use parking_lot::Mutex;

use tilegrid::coord::{Coordinate, CoordinatePair};
use tilegrid::grid::{materialize, tile_key, GridLine, GridLineSet, TileKey};
use tilegrid::map::{
    RefreshOutcome, StaleResultPolicy, TileMap, TileMapConfig, TileMapEvent, ViewportOutcome,
    SELECTED_FILL, UNSELECTED_FILL,
};
use tilegrid::provider::{GridSectionProvider, ProviderError};
use tilegrid::viewport::{sine_deltas, ViewportBounds, DEFAULT_SINE_DELTA_THRESHOLD};

// ============================================================================
// Helper Functions
// ============================================================================

/// Provider that records requests and replays scripted responses in order.
#[derive(Clone, Default)]
struct ScriptedProvider {
    requested: Arc<Mutex<Vec<[Coordinate; 2]>>>,
    responses: Arc<Mutex<Vec<Result<GridLineSet, ProviderError>>>>,
}

impl ScriptedProvider {
    fn with_responses(responses: Vec<Result<GridLineSet, ProviderError>>) -> Self {
        Self {
            requested: Arc::default(),
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    fn requested(&self) -> Vec<[Coordinate; 2]> {
        self.requested.lock().clone()
    }
}

impl GridSectionProvider for ScriptedProvider {
    async fn fetch_grid_section(
        &self,
        corners: [Coordinate; 2],
    ) -> Result<GridLineSet, ProviderError> {
        self.requested.lock().push(corners);
        let mut responses = self.responses.lock();
        if responses.is_empty() {
            Err(ProviderError::HttpError("no scripted response".to_string()))
        } else {
            responses.remove(0)
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// One rectangle with south-west corner (0,0) and north-east corner (1,1).
fn unit_square_lines() -> GridLineSet {
    GridLineSet::new(vec![
        GridLine::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)),
        GridLine::new(Coordinate::new(1.0, 0.0), Coordinate::new(1.0, 1.0)),
        GridLine::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)),
        GridLine::new(Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 1.0)),
    ])
}

/// A street-level viewport in north-west London.
fn street_view() -> ViewportBounds {
    ViewportBounds::new(
        Coordinate::new(51.531594, -0.288986),
        Coordinate::new(51.531702, -0.288814),
    )
}

/// A viewport spanning roughly a degree in each direction.
fn region_view() -> ViewportBounds {
    ViewportBounds::new(Coordinate::new(51.0, -1.0), Coordinate::new(52.0, 0.0))
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_key_example() {
    let pair = CoordinatePair::new(
        Coordinate::new(51.531622754, -0.288922980),
        Coordinate::new(51.53165, -0.28888),
    );
    assert_eq!(tile_key(&pair), "51.53162-0.28892");
    assert_eq!(tile_key(&pair), tile_key(&pair));
}

#[test]
fn test_materialize_single_rectangle() {
    let pairs = materialize(&unit_square_lines());
    assert_eq!(pairs.len(), 1);
    assert_eq!(
        pairs[0].as_array(),
        [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]
    );
}

/// A passing viewport issues exactly one fetch for `[south_west, north_east]`
/// and replaces the tile set with the result.
#[tokio::test]
async fn test_viewport_refresh_flow() {
    let provider = ScriptedProvider::with_responses(vec![Ok(unit_square_lines())]);
    let map = TileMap::with_defaults(provider.clone());
    let view = street_view();

    let deltas = sine_deltas(view.south_west, view.north_east);
    assert!(deltas.either_below(DEFAULT_SINE_DELTA_THRESHOLD));

    let handle = map
        .on_viewport_change(view)
        .into_handle()
        .expect("street-level viewport should refresh");
    let outcome = handle.join().await.unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Applied {
            sequence: 1,
            tiles: 1
        }
    );
    assert_eq!(provider.requested(), vec![[view.south_west, view.north_east]]);
    assert_eq!(map.tiles()[0].key, "0.000000.00000");
}

/// A large viewport issues no fetch and leaves the tiles alone.
#[tokio::test]
async fn test_range_too_big_issues_no_fetch() {
    let provider = ScriptedProvider::default();
    let map = TileMap::with_defaults(provider.clone()).with_initial_lines(&unit_square_lines());

    let outcome = map.on_viewport_change(region_view());

    assert!(matches!(outcome, ViewportOutcome::RangeTooBig(_)));
    assert!(provider.requested().is_empty());
    assert_eq!(map.tiles().len(), 1);
}

/// A failed fetch keeps showing the last good tile set.
#[tokio::test]
async fn test_fetch_failure_keeps_stale_tiles() {
    let provider = ScriptedProvider::with_responses(vec![Err(ProviderError::HttpError(
        "503".to_string(),
    ))]);
    let initial = GridLineSet::regular(Coordinate::new(10.0, 10.0), 2, 2, 0.1, 0.1);
    let map = TileMap::with_defaults(provider).with_initial_lines(&initial);
    let before = map.snapshot();

    let outcome = map
        .on_viewport_change(street_view())
        .into_handle()
        .unwrap()
        .join()
        .await
        .unwrap();

    assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
    assert_eq!(map.snapshot(), before);
}

/// Tapping a tile selects it; only that tile renders as selected.
#[tokio::test]
async fn test_selection_reflected_in_shapes() {
    let lines = GridLineSet::regular(Coordinate::new(0.0, 0.0), 3, 3, 1.0, 1.0);
    let map = TileMap::with_defaults(ScriptedProvider::default()).with_initial_lines(&lines);
    let target = map.tiles()[4].key.clone();

    map.select(target.clone());

    for shape in map.shapes() {
        if shape.key == target {
            assert!(shape.is_selected);
            assert_eq!(shape.fill, SELECTED_FILL);
        } else {
            assert!(!shape.is_selected);
            assert_eq!(shape.fill, UNSELECTED_FILL);
        }
    }
}

/// Selecting "A" and refreshing to a tile set without "A" keeps "A"
/// selected; nothing is rendered as selected.
#[tokio::test]
async fn test_stale_selection_is_kept() {
    let elsewhere = GridLineSet::regular(Coordinate::new(40.0, 40.0), 1, 1, 1.0, 1.0);
    let provider = ScriptedProvider::with_responses(vec![Ok(elsewhere)]);
    let map = TileMap::with_defaults(provider).with_initial_lines(&unit_square_lines());

    map.select("A");
    let outcome = map.refresh(street_view()).await;

    assert!(outcome.is_applied());
    assert_eq!(map.selected(), Some(TileKey::new("A")));
    assert!(map.shapes().iter().all(|s| !s.is_selected));
}

/// Two back-to-back refreshes each replace the whole tile set; the second
/// result stays and both emit `TilesReplaced` in order.
#[tokio::test]
async fn test_sequential_refreshes_replace_wholesale() {
    let first = GridLineSet::regular(Coordinate::new(0.0, 0.0), 2, 2, 1.0, 1.0);
    let second = GridLineSet::regular(Coordinate::new(5.0, 5.0), 1, 3, 1.0, 1.0);
    let provider = ScriptedProvider::with_responses(vec![Ok(first), Ok(second)]);
    let map = TileMap::with_defaults(provider);
    let mut events = map.subscribe();

    assert!(map.refresh(street_view()).await.is_applied());
    assert_eq!(map.tiles().len(), 4);
    assert!(map.refresh(street_view()).await.is_applied());
    assert_eq!(map.tiles().len(), 3);

    assert_eq!(
        events.try_recv().unwrap(),
        TileMapEvent::TilesReplaced {
            sequence: 1,
            count: 4
        }
    );
    assert_eq!(
        events.try_recv().unwrap(),
        TileMapEvent::TilesReplaced {
            sequence: 2,
            count: 3
        }
    );
}

/// With `LatestRequestOnly`, a result is dropped once a newer fetch has
/// been dispatched, even if it resolves first.
#[tokio::test]
async fn test_latest_request_only_rejects_older_dispatch() {
    let provider = ScriptedProvider::with_responses(vec![
        Ok(unit_square_lines()),
        Ok(GridLineSet::regular(Coordinate::new(3.0, 3.0), 1, 2, 1.0, 1.0)),
    ]);
    let config = TileMapConfig::default().with_stale_policy(StaleResultPolicy::LatestRequestOnly);
    let map = TileMap::new(provider, config);

    // Dispatch both before either task runs.
    let h1 = map.on_viewport_change(street_view()).into_handle().unwrap();
    let h2 = map.on_viewport_change(street_view()).into_handle().unwrap();

    let o1 = h1.join().await.unwrap();
    let o2 = h2.join().await.unwrap();

    assert!(matches!(o1, RefreshOutcome::Superseded { sequence: 1, latest: 2 }));
    assert!(o2.is_applied());
    assert_eq!(map.snapshot().applied_sequence, 2);
}
