//! Diagnostic logging
//!
//! Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
//! wins when set; otherwise the level follows the `-v` count.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "ticketdesk=warn",
        1 => "ticketdesk=info",
        _ => "ticketdesk=debug",
    }
}

pub fn init(json: bool, verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}
