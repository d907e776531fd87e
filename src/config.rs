// ============================================================================
// CONFIGURACIÓN - valores de compilación (build.rs carga .env)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Header `interviewerName`, obligatorio en cada request
    pub interviewer_name: String,
    pub network_timeout_seconds: u64,
    pub mock_login_latency_ms: u64,
    pub search_debounce_ms: u64,
    pub language: String,
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            interviewer_name: String::new(),
            network_timeout_seconds: 10,
            mock_login_latency_ms: 800,
            search_debounce_ms: 300,
            language: "EN".to_string(),
            enable_logging: true,
        }
    }
}

impl ClientConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.api_base_url),
            interviewer_name: option_env!("INTERVIEWER_NAME")
                .map(|s| s.to_string())
                .unwrap_or(defaults.interviewer_name),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.network_timeout_seconds),
            mock_login_latency_ms: option_env!("MOCK_LOGIN_LATENCY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.mock_login_latency_ms),
            search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_debounce_ms),
            language: option_env!("CONSOLE_LANGUAGE")
                .map(|s| s.to_uppercase())
                .unwrap_or(defaults.language),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// URL base sin barra final
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: ClientConfig = ClientConfig::from_env();
}
