// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod timer;
pub mod typing_policy;
pub mod word_generator;

pub use error::SessionError;
pub use session::{Mode, Session, SessionConfig};
pub use typing_policy::{CharStatus, Key};

/// Host redraw cadence.
pub const TICK_RATE_MS: u64 = 10;
