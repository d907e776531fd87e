// ============================================================================
// HTTP CLIENT - adapter único para todos los requests
// ============================================================================
// - Inyecta `interviewerName` y `Authorization: Bearer <token>`
// - 401 en cualquier request: borra el token y redirige a /login
// - El resto de errores pasan sin modificar
// ============================================================================

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::services::navigation::Navigator;
use crate::state::SessionState;
use crate::utils::{HEADER_AUTHORIZATION, HEADER_INTERVIEWER_NAME, LOGIN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Request independiente del transporte; `path` es relativo a la URL base
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Capa de red bajo el adapter (reqwest / gloo-net / dobles de test)
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

pub struct HttpClient {
    transport: Rc<dyn Transport>,
    session: Rc<SessionState>,
    navigator: Rc<dyn Navigator>,
    interviewer_name: String,
}

impl HttpClient {
    pub fn new(
        transport: Rc<dyn Transport>,
        session: Rc<SessionState>,
        navigator: Rc<dyn Navigator>,
        interviewer_name: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
            interviewer_name: interviewer_name.into(),
        }
    }

    /// Enviar un request con los headers de sesión
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request.set_header(HEADER_INTERVIEWER_NAME, self.interviewer_name.clone());
        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            request.set_header(HEADER_AUTHORIZATION, format!("Bearer {}", token));
        }

        let method = request.method;
        let path = request.path.clone();
        log::debug!("📡 {} {}", method, path);

        let response = self.transport.send(request).await?;

        if response.status == 401 {
            // Política global: no pasa por el store
            log::warn!("🔒 401 en {} {}: sesión expirada, volviendo a login", method, path);
            self.session.clear_token();
            self.navigator.redirect(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, response.body));
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        let request = HttpRequest::new(HttpMethod::Get, path).with_query(query);
        self.send(request).await?.json()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = HttpRequest::new(HttpMethod::Post, path).with_json(body)?;
        self.send(request).await?.json()
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = HttpRequest::new(HttpMethod::Patch, path).with_json(body)?;
        self.send(request).await?.json()
    }

    /// DELETE; el body de la respuesta se ignora
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(HttpRequest::new(HttpMethod::Delete, path)).await?;
        Ok(())
    }
}
