//! Feeds a fetched map file into a host map editor whose API is not ours.
//!
//! The host is probed through an ordered list of global entry points. When
//! none is callable, a file drop is simulated on the host's drop target.

pub mod config;
pub mod load;
pub mod probe;
pub mod stats;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{EntryPoint, HostConfig, StatsSource};
pub use load::{
    cache_busted, load_into_host, FetchResponse, LoadError, LoadObserver, LoadRequest,
    RemoteResource, ResourceFetcher,
};
pub use probe::{deliver, DropFile, DropTarget, HostError, HostSurface, IntegrationOutcome};
pub use stats::{aggregate, format_compact, summarize, EntityRecord, HostData, StatsOutcome};
