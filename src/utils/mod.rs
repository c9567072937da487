pub mod format;

use std::sync::Once;

use uuid::Uuid;

pub use format::format_currency;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "finance_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A subscriber installed by the host application wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Generates a fresh identifier such as `tx-3f2a...`. Identifiers are never reused.
pub fn make_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
