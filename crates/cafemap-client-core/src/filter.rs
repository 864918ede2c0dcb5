//! Filter-driven map data loading and the policy for what gets rendered.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};

use cafemap_shared::{
    const_config::path::{PATH_CAFES_FILTERED_DATA, PATH_CAFES_REGION_STATS},
    filter::FilterSelection,
    map::{FilteredDataResponse, RegionStats},
};
use futures::channel::oneshot;
use tracing::{debug, error};

use crate::{
    client::{
        process_data_response, session::SessionSnapshot, Client, FetchOutcome, UiCallBack, WakeFn,
    },
    demo::{demo_map_points, demo_region_stats, demo_statistics},
    render::{layout_markers, statistics_board, MapScene, StatisticsBoard},
};

/// Owns the current filter selection and what the map pane shows for it.
/// Cheap to clone; clones share state like [`Client`].
#[derive(Clone)]
pub struct FilterController {
    client: Client,
    inner: Arc<Mutex<FilterInner>>,
    wake: Arc<dyn WakeFn>,
}

#[derive(Debug)]
struct FilterInner {
    filters: FilterSelection,
    scene: MapScene,
    board: StatisticsBoard,
    reload_seq: u64,
}

impl Default for FilterInner {
    fn default() -> Self {
        Self {
            filters: FilterSelection::default(),
            scene: layout_markers(&demo_map_points()),
            board: statistics_board(&demo_statistics()),
            reload_seq: 0,
        }
    }
}

impl Debug for FilterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterController")
            .field("client", &self.client)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl FilterController {
    /// The session is injected here, not looked up. Every committed session
    /// transition re-issues a reload so the scene always reflects the
    /// post-transition state.
    pub fn new<F: WakeFn>(client: Client, wake: F) -> Self {
        let this = Self {
            client: client.clone(),
            inner: Arc::new(Mutex::new(FilterInner::default())),
            wake: Arc::new(wake),
        };
        let weak = Arc::downgrade(&this.inner);
        let wake = Arc::clone(&this.wake);
        this.client
            .on_session_change(move |_snapshot: &SessionSnapshot| {
                if let Some(inner) = weak.upgrade() {
                    let _ = spawn_reload(&client, &inner, &wake);
                }
            });
        this
    }

    pub fn set_region(&self, region: String) -> oneshot::Receiver<()> {
        self.lock_inner().filters.region = region;
        self.reload()
    }

    pub fn set_major_category(&self, category: String) -> oneshot::Receiver<()> {
        self.lock_inner().filters.major_category = category;
        self.reload()
    }

    pub fn set_mid_category(&self, category: String) -> oneshot::Receiver<()> {
        self.lock_inner().filters.mid_category = category;
        self.reload()
    }

    /// Selecting the same chip again clears it. Either way the data reloads.
    pub fn toggle_franchise(&self, name: &str) -> oneshot::Receiver<()> {
        self.lock_inner().filters.toggle_franchise(name);
        self.reload()
    }

    /// Issues one query for the current selection. A response that arrives
    /// after a newer reload was issued is dropped (last-issued-wins).
    #[tracing::instrument(skip(self))]
    pub fn reload(&self) -> oneshot::Receiver<()> {
        spawn_reload(&self.client, &self.inner, &self.wake)
    }

    /// Aggregates for the trend pane; every failure settles into the demo
    /// figures instead of surfacing an error
    #[tracing::instrument(skip(self, ui_notify))]
    pub fn region_stats<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<RegionStats> {
        let (tx, rx) = oneshot::channel();
        let query = self.lock_inner().filters.to_query_args();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let stats = match process_data_response::<RegionStats>(resp).await {
                FetchOutcome::Success(stats) => stats,
                FetchOutcome::Unauthorized => demo_region_stats(),
                FetchOutcome::Failed(e) => {
                    error!(?e, "region stats load failed");
                    demo_region_stats()
                }
            };
            let _ = tx.send(stats);
            ui_notify();
        };
        self.client
            .initiate_request(PATH_CAFES_REGION_STATS, &query, on_done);
        rx
    }

    pub fn filters(&self) -> FilterSelection {
        self.lock_inner().filters.clone()
    }

    pub fn scene(&self) -> MapScene {
        self.lock_inner().scene.clone()
    }

    pub fn board(&self) -> StatisticsBoard {
        self.lock_inner().board.clone()
    }

    pub fn map_title(&self) -> String {
        self.lock_inner().filters.map_title()
    }

    pub fn filter_description(&self) -> String {
        self.lock_inner().filters.description()
    }

    fn lock_inner(&self) -> MutexGuard<'_, FilterInner> {
        lock(&self.inner)
    }

    #[cfg(test)]
    fn new_detached(client: Client) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(FilterInner::default())),
            wake: Arc::new(|| {}),
        }
    }
}

fn lock(inner: &Arc<Mutex<FilterInner>>) -> MutexGuard<'_, FilterInner> {
    inner.lock().expect("mutex poisoned")
}

fn spawn_reload(
    client: &Client,
    inner: &Arc<Mutex<FilterInner>>,
    wake: &Arc<dyn WakeFn>,
) -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    let (seq, query) = {
        let mut guard = lock(inner);
        guard.reload_seq += 1;
        (guard.reload_seq, guard.filters.to_query_args())
    };
    let request_client = client.clone();
    let client = client.clone();
    let inner = Arc::clone(inner);
    let wake = Arc::clone(wake);
    let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
        let outcome = process_data_response::<FilteredDataResponse>(resp).await;
        apply_outcome(&client, &inner, seq, outcome);
        let _ = tx.send(());
        (*wake)();
    };
    request_client.initiate_request(PATH_CAFES_FILTERED_DATA, &query, on_done);
    rx
}

/// Policy for what a settled reload leaves on screen. Only the newest issued
/// reload may touch the scene.
fn apply_outcome(
    client: &Client,
    inner: &Arc<Mutex<FilterInner>>,
    seq: u64,
    outcome: FetchOutcome<FilteredDataResponse>,
) {
    {
        let mut guard = lock(inner);
        if guard.reload_seq != seq {
            debug!(seq, latest = guard.reload_seq, "dropping stale reload response");
            return;
        }
        match &outcome {
            FetchOutcome::Success(data) if client.is_authenticated() => {
                guard.scene = layout_markers(&data.map_data);
                guard.board = statistics_board(&data.statistics);
            }
            FetchOutcome::Success(_) => {
                // Preview mode: whatever the backend returned to an anonymous
                // caller is discarded locally
                set_placeholder(&mut guard);
            }
            FetchOutcome::Unauthorized => set_placeholder(&mut guard),
            FetchOutcome::Failed(e) => {
                error!(?e, "map data load failed");
                set_placeholder(&mut guard);
            }
        }
    }
    // The lock is released first: the forced logout notifies session
    // observers, and those issue new requests
    if matches!(outcome, FetchOutcome::Unauthorized) {
        client.force_logout();
    }
}

fn set_placeholder(inner: &mut FilterInner) {
    inner.scene = layout_markers(&demo_map_points());
    inner.board = statistics_board(&demo_statistics());
}
