#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Settings popup for the CVD correction extension.
//! The controller and its state machine are DOM-free; the `web` module binds them to the
//! popup document and the extension's JavaScript collaborators on wasm32.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::PopupConfig;
pub use controller::{PopupController, SyncOutcome, resolve_site};
pub use crate::core::cvd::CvdType;
pub use crate::core::phase::{PopupPhase, RestoreSnapshot, SetupStep};
pub use error::{PopupError, Result};

#[cfg(target_arch = "wasm32")]
pub use web::initialize_on_load;
