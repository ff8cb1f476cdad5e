//! Central configuration for the basaltpass_passkey crate

use std::{env, sync::LazyLock};

/// Base URL of the BasaltPass server.
///
/// Default: "http://localhost:8080"
pub static PASSKEY_SERVER_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("PASSKEY_SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
});

/// Route prefix under which the passkey endpoints are mounted.
///
/// Default: "/api/v1"
pub static PASSKEY_API_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("PASSKEY_API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()));

/// Seconds an idle pooled HTTP connection is kept before it is dropped.
///
/// Requests themselves carry no timeout: a flow waits as long as the server
/// and the platform ceremony take.
pub static PASSKEY_HTTP_POOL_IDLE_TIMEOUT: LazyLock<u64> = LazyLock::new(|| {
    env::var("PASSKEY_HTTP_POOL_IDLE_TIMEOUT")
        .map(|v| v.parse::<u64>().unwrap_or(90))
        .unwrap_or(90)
});

/// Language used by [`crate::FlowError::user_message`].
pub static PASSKEY_MESSAGE_LOCALE: LazyLock<Locale> =
    LazyLock::new(|| parse_locale(env::var("PASSKEY_MESSAGE_LOCALE").ok()));

/// Language of user-facing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

fn parse_locale(value: Option<String>) -> Locale {
    match value {
        None => Locale::En,
        Some(v) => match v.to_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Locale::En,
            "zh" | "zh-cn" | "zh_cn" => Locale::Zh,
            invalid => {
                tracing::warn!("Invalid message locale: {}. Using default 'en'", invalid);
                Locale::En
            }
        },
    }
}
