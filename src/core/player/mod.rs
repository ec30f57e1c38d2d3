//! Player Lifecycle Module
//!
//! Manages one external playback component instance through its asynchronous
//! initialization protocol. The external player (YouTube iframe API or any
//! equivalent provider) is reached only through the capability traits in
//! [`provider`]; the [`controller`] owns the live instance and exposes the
//! readiness-gated command surface.

mod controller;
mod provider;

pub use controller::*;
pub use provider::*;

#[cfg(test)]
pub(crate) mod mock;
