// ============================================================================
// AUTH SERVICE - emisión de tokens (backend mock)
// ============================================================================

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ApiError;
use crate::models::{LoginForm, RegisterForm};
use crate::utils::runtime;

/// Backend que emite tokens de sesión
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, form: &LoginForm) -> Result<String, ApiError>;
    async fn register(&self, form: &RegisterForm) -> Result<String, ApiError>;
}

/// Login/registro simulados: espera `latency_ms` y devuelve
/// `base64("<email>:<millis>")`. Sólo rechaza email o password vacíos.
#[derive(Clone, Debug)]
pub struct MockAuthApi {
    latency_ms: u64,
}

impl MockAuthApi {
    pub fn new(latency_ms: u64) -> Self {
        Self { latency_ms }
    }

    fn issue_token(email: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        STANDARD.encode(format!("{}:{}", email, millis))
    }
}

#[async_trait(?Send)]
impl AuthApi for MockAuthApi {
    async fn login(&self, form: &LoginForm) -> Result<String, ApiError> {
        // Latencia simulada para que el estado de carga sea visible
        runtime::sleep(self.latency_ms).await;

        if form.email.trim().is_empty() || form.password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }

        log::info!("🔐 Login mock para {}", form.email);
        Ok(Self::issue_token(&form.email))
    }

    async fn register(&self, form: &RegisterForm) -> Result<String, ApiError> {
        runtime::sleep(self.latency_ms).await;

        if form.email.trim().is_empty() || form.password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }

        log::info!("📝 Registro mock para {} ({})", form.email, form.name);
        Ok(Self::issue_token(&form.email))
    }
}
