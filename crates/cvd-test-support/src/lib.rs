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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared test helpers used across popup integration suites.
//! Layout: document.rs (fake element registry), mocks.rs (in-memory collaborators), fixtures.rs (prebuilt controllers).

pub mod document;
pub mod fixtures;
pub mod mocks;
