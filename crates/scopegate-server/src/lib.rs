pub mod bootstrap;
pub mod config;
pub mod observability;
pub mod server;

pub use config::{AppConfig, BootstrapConfig, LoggingConfig, ServerConfig};
pub use observability::{init_tracing, shutdown_tracing};
pub use server::{AppState, ScopegateServer, ServerBuilder, build_app, build_state};
