// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod dialog;
pub mod dictionary;
pub mod events;
pub mod expansion;
pub mod html;
pub mod surface;
pub mod util;

use std::io;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

/// Application entry point - sets up logging and the store, then runs the
/// interactive session on stdin/stdout.
/// Note: This function cannot be unit tested as it blocks on the terminal.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() {
    let context = match app::setup() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("quickfill: setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut repl = app::Repl::new(context.store, stdin.lock(), io::stdout());
    if let Err(e) = repl.run() {
        error!("Session ended with I/O error: {}", e);
        eprintln!("quickfill: {}", e);
        std::process::exit(1);
    }
    info!("Shutting down quickfill");
}
