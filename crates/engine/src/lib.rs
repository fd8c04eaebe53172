//! Loc8r Engine library.
//!
//! REST API for locations and their embedded reviews.
//!
//! ## Structure
//!
//! - `use_cases/` - Request orchestration per resource
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::{EngineConfig, ErrorMode, StoreBackend};
