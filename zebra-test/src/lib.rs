//! Miscellaneous test code for Zebra's `lightwalletd` frontend.
#![doc(html_favicon_url = "https://www.zfnd.org/images/zebra-favicon-128.png")]
#![doc(html_logo_url = "https://www.zfnd.org/images/zebra-icon.png")]
#![doc(html_root_url = "https://doc.zebra.zfnd.org/zebra_test")]
// Standard lints
#![warn(missing_docs)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod vectors;

static INIT: Once = Once::new();

/// Initialize globals for tests such as the tracing subscriber and panic / error
/// reporting hooks.
///
/// Safe to call from every test: only the first call has any effect.
pub fn init() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer().with_target(false).with_test_writer();

        // Use the RUST_LOG env var, or by default:
        //  - warn for most tests, and
        //  - hide expected decode failure warnings from the frontend
        let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn").add_directive(
                "zebra_lightwalletd=error"
                    .parse()
                    .expect("hard-coded directive is valid"),
            )
        });

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(ErrorLayer::default())
            .init();

        color_eyre::config::HookBuilder::default()
            .add_frame_filter(Box::new(|frames| {
                let filters = &[
                    "tokio::",
                    "<futures_util::",
                    "std::panic",
                    "test::run_test_in_process",
                    "core::ops::function::FnOnce::call_once",
                    "<core::future::",
                    "<tracing::instrument::Instrumented",
                ];

                frames.retain(|frame| {
                    frame
                        .name
                        .as_ref()
                        .map_or(true, |name| !filters.iter().any(|f| name.starts_with(f)))
                });
            }))
            .install()
            .expect("color-eyre hooks are only installed once");
    })
}
