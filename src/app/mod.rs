//! Application runtime for the `quickfill` binary.
//!
//! - `setup`: config dir, settings, logging, shortcut store
//! - `repl`: line-based session that feeds typed text to the engine

mod logging;
mod repl;
mod setup;

pub use repl::{Repl, ReplMode};
pub use setup::{setup, AppContext};
