//! # Pairwise Recent-Progress Cache - Infrastructure Layer
//!
//! Cross-cutting technical concerns around the progress cache.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, `pairwise.toml`, `PAIRWISE_` env |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Provider resolution and `ProgressCacheStore` wiring |
//! | [`error_ext`] | Context helpers mapping foreign errors to the domain error |
//! | [`constants`] | Infrastructure defaults |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{AppContext, init_app, init_test_app};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
