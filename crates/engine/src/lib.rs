//! Alibi Engine library.
//!
//! The stateful half of the timeline engine. Pure derivations (time grid,
//! reference resolution, occupancy views) live in `alibi-domain`.
//!
//! ## Structure
//!
//! - `stores/` - config, event and map-marker stores
//! - `session` - the explicit session state object tying the stores together
//! - `snapshot` - JSON export/import
//! - `settings`, `clock` - environment configuration and the wall-clock port

pub mod clock;
pub mod error;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod stores;

/// Test fixtures shared by the unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use error::{EngineError, ImportError};
pub use session::{Session, SessionData};
pub use settings::EngineSettings;
