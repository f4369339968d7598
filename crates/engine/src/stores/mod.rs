//! In-memory session stores.
//!
//! - `ConfigStore` - scenario metadata, cast, places and schedule
//! - `EventStore` - materialized timeline events
//! - `MapMarkerStore` - map image and place markers

pub mod config_store;
pub mod event_store;
pub mod map_store;

// Re-export store types
pub use config_store::ConfigStore;
pub use event_store::{EventStore, Saved};
pub use map_store::MapMarkerStore;
