use std::time::Duration;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_FALLBACK_MODEL: &str = "gemini-1.0-pro";
pub const DEFAULT_HUGGING_FACE_API_URL: &str = "https://api-inference.huggingface.co/models/gpt2";
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PORT: u16 = 8080;

/// Settings for every outbound provider and the HTTP listener.
/// Built once at startup and passed to whatever needs it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub gemini_fallback_model: String,
    pub hugging_face_api_url: String,
    pub hugging_face_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub youtube_api_base: String,
    pub provider_timeout: Duration,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_base: DEFAULT_GEMINI_API_BASE.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_fallback_model: DEFAULT_GEMINI_FALLBACK_MODEL.into(),
            hugging_face_api_url: DEFAULT_HUGGING_FACE_API_URL.into(),
            hugging_face_api_key: None,
            youtube_api_key: None,
            youtube_api_base: DEFAULT_YOUTUBE_API_BASE.into(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Reads settings from the process environment. Call `dotenv::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secret = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let text = |key: &str, default: String| secret(key).unwrap_or(default);

        Self {
            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_api_base: text("GEMINI_API_BASE", defaults.gemini_api_base),
            gemini_model: text("GEMINI_MODEL", defaults.gemini_model),
            gemini_fallback_model: text("GEMINI_FALLBACK_MODEL", defaults.gemini_fallback_model),
            hugging_face_api_url: text("HUGGING_FACE_API_URL", defaults.hugging_face_api_url),
            hugging_face_api_key: secret("HUGGING_FACE_API_KEY"),
            youtube_api_key: secret("YOUTUBE_API_KEY"),
            youtube_api_base: text("YOUTUBE_API_BASE", defaults.youtube_api_base),
            provider_timeout: secret("PROVIDER_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
            port: secret("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
        }
    }
}

/// First few characters of a secret, for log lines.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   "), ("YOUTUBE_API_KEY", "")]));
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.youtube_api_key, None);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc123"),
            ("GEMINI_API_BASE", "http://localhost:9000"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("PORT", "3000"),
        ]));
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.gemini_api_base, "http://localhost:9000");
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("PROVIDER_TIMEOUT_SECS", "0"), ("PORT", "http")]));
        assert_eq!(config.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret("AIzaSyExample"), "AIza***");
        assert_eq!(mask_secret("ab"), "ab***");
    }
}
