//! Reelmarks Core Library
//!
//! Timestamped bookmark engine for streaming video playback.
//! A user loads a video by identifier, captures bookmarks at the current
//! playback position while watching, and jumps back to any bookmark later.
//!
//! This library contains the bookmark repository, the external player
//! lifecycle controller, and the session facade that keeps both in sync.
//! The UI shell (URL input, note editor, theme toggle widget) lives in the
//! host application and talks to this crate through [`core::session::NoteSession`].

pub mod core;

/// Initializes the global tracing subscriber for host applications.
///
/// Honors `RUST_LOG`, defaults to `INFO`. Safe to call more than once
/// (tests, embedded use); later calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(cfg!(debug_assertions));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    // Avoid panics if already initialized.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
