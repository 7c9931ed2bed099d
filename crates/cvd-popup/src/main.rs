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
//! CVD popup wasm entry point and native stub fallback.

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), std::io::Error> {
    cvd_popup::initialize_on_load();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use cvd_popup::telemetry::{LoggingConfig, init_logging};

    init_logging(&LoggingConfig::default())?;
    tracing::warn!(
        "the cvd-popup binary is intended for wasm32; build with `trunk build` or `cargo build --target wasm32-unknown-unknown`"
    );
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_main_reports_wasm_only() -> anyhow::Result<()> {
        // Only one subscriber may be installed per process; this is the sole caller.
        main()
    }
}
