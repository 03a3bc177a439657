pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod router;
pub mod screens;
pub mod session;
pub mod structs;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod shell;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use api::{ApiClient, LoginOutcome};
pub use app::App;
pub use config::Config;
pub use error::{ApiError, ConfigError, SessionError};
pub use router::Route;
pub use session::SessionStore;
