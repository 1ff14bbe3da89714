//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber. `RUST_LOG` wins when set;
//! otherwise the configured level applies.
//!
//! The default output is the compact format without module targets: actor logs carry
//! an `entity_type` field instead. Set `log_json = true` for one JSON object per line.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run                      # full payloads at client entry points
//! MARKET__LOG_JSON=true cargo run
//! ```
//!
//! A placed order reads like this at `info`:
//!
//! ```text
//! INFO place_order{vendor_id=party_1}: Sending place_order to actor
//! INFO Action ok entity_type="Material" id=material_1
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. A second call is a no-op.
pub fn setup_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
