//! floppa-api - HTTP gateway serving random animal images.
//!
//! Each configured animal is backed either by a local directory or by a
//! PocketBase collection. The gateway exposes one image endpoint and one
//! count endpoint per animal, plus an animal listing for the frontend.

pub mod animals;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use animals::{Animal, AnimalInfo, AnimalRegistry, AnimalSource};
pub use config::{AnimalConfig, ConfigError, GatewayConfig, SourceConfig};
pub use error::ApiError;
pub use server::{AppState, build_router, serve};

/// Version string stamped at build time.
pub const VERSION: &str = env!("FLOPPA_VERSION");
