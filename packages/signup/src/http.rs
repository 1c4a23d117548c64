//! Shared `reqwest` client construction.

use crate::config::HttpConfig;

/// Build the HTTP client used by both remote services.
pub fn client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let builder = reqwest::Client::builder();

    // The browser's fetch has no per-request timeout knob.
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.timeout(config.timeout());
    #[cfg(target_arch = "wasm32")]
    let _ = config;

    builder.build()
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
