//! Build-time client configuration.

use leptos::prelude::*;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u32 = 3000;

/// Resolved once in `App` and shared through context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: &'static str,
    /// How long a toast stays on screen.
    pub notification_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE,
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// `STUDYAPP_API_BASE` at compile time, falling back to the local backend.
    pub fn from_env() -> Self {
        Self::with_base(option_env!("STUDYAPP_API_BASE"))
    }

    fn with_base(base: Option<&'static str>) -> Self {
        match base.map(str::trim) {
            Some(url) if !url.is_empty() => Self {
                api_base_url: url,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_override_falls_back() {
        assert_eq!(AppConfig::with_base(None).api_base_url, DEFAULT_API_BASE);
        assert_eq!(AppConfig::with_base(Some("  ")).api_base_url, DEFAULT_API_BASE);
        assert_eq!(
            AppConfig::with_base(Some("https://study.example/api")).api_base_url,
            "https://study.example/api"
        );
    }
}
