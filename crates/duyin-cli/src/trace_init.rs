use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the stderr subscriber. `RUST_LOG` overrides the level chosen
/// by `verbose`.
pub fn init_tracing(verbose: bool, json: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "duyin_core=debug,duyin_cli=debug"
        } else {
            "duyin_core=info,duyin_cli=info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let builder = tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(true)
            .with_env_filter(filter);
        if json {
            builder
                .json()
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                .init();
        } else {
            builder.init();
        }
    });
}
