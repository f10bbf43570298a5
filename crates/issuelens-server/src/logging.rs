// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Issuelens server.
//!
//! Uses `tracing` with `tracing-subscriber`. The level can be controlled via
//! the `RUST_LOG` environment variable.
//!
//! ```bash
//! # Default: info for issuelens and request traces, warn for reqwest
//! issuelens-server
//!
//! # Raw model responses and request details
//! RUST_LOG=issuelens_core=debug,issuelens_server=debug issuelens-server
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "issuelens_core=info,issuelens_server=info,tower_http=info,reqwest=warn";

/// Initialize the logging subsystem. Logs go to stderr.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
