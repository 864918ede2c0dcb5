//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Needed because we need to enable js feature on this crate
    use getrandom as _;
}

mod client;
mod demo;
mod filter;
mod render;
mod storage;

pub use client::{
    session::{LoginOutcome, SessionObserver, SessionSnapshot, SessionState},
    Client, UiCallBack, WakeFn, DUMMY_ARGUMENT,
};
pub use demo::{demo_map_points, demo_region_stats, demo_statistics};
pub use filter::FilterController;
pub use render::{
    format_growth, layout_markers, session_chrome, statistics_board, MapScene, Marker, PopupState,
    SessionChrome, StatisticsBoard,
};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileTokenStore;
pub use storage::{MemoryTokenStore, TokenStore};
