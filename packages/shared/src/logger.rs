//! Logging setup shared by the relay and the client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers every `codesync_*` crate plus the binary itself and can be
/// overridden through the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "codesync-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use codesync_shared::logger::setup_logger;
///
/// setup_logger("codesync-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the fallback filter directive used when `RUST_LOG` is unset.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "codesync_shared={level},codesync_server={level},codesync_client={level},{binary_target}={level},tower_http={level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_crates() {
        // テスト項目: デフォルトのフィルタが全クレートとバイナリを対象にする
        // given (前提条件):
        let binary = "codesync-server";

        // when (操作):
        let filter = default_filter(binary, "debug");

        // then (期待する結果):
        assert!(filter.contains("codesync_server=debug"));
        assert!(filter.contains("codesync_client=debug"));
        assert!(filter.contains("codesync_shared=debug"));
        assert!(filter.ends_with("tower_http=debug"));
    }
}
