//! Tower middleware for the bpmink transport.
//!
//! Layers wrap the raw hyper service inside [`HyperClient`](crate::HyperClient)
//! and see every request the invoker sends. The library itself never retries,
//! caches or throttles; such policies, when wanted, are layers the caller adds.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-logging` (default) | `.with_logging()` / `.with_debug_logging()` helpers |
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs each round trip using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
