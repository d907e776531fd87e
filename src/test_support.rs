//! Dobles de test compartidos por los módulos de la crate.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::channel::oneshot;

use crate::error::ApiError;
use crate::models::{Account, AccountStatus, LoginForm, RegisterForm, RoleLevel};
use crate::services::auth_service::AuthApi;
use crate::services::http_client::{HttpRequest, HttpResponse, Transport};

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Transporte con respuestas en cola; registra cada request enviado.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: RefCell<Vec<HttpRequest>>,
    replies: RefCell<VecDeque<Scripted>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, value: serde_json::Value) {
        self.push_status(status, value.to_string());
    }

    pub fn push_status(&self, status: u16, body: impl Into<String>) {
        self.replies
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(HttpResponse::new(status, body))));
    }

    pub fn push_error(&self, error: ApiError) {
        self.replies
            .borrow_mut()
            .push_back(Scripted::Ready(Err(error)));
    }

    /// Respuesta que no llega hasta que el test la envía por el canal
    pub fn push_gated(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string()))),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}

/// Backend de auth que rechaza todo
pub struct RejectingAuth;

#[async_trait(?Send)]
impl AuthApi for RejectingAuth {
    async fn login(&self, _form: &LoginForm) -> Result<String, ApiError> {
        Err(ApiError::InvalidCredentials)
    }

    async fn register(&self, _form: &RegisterForm) -> Result<String, ApiError> {
        Err(ApiError::Status {
            status: 409,
            message: "email taken".to_string(),
            body: String::new(),
        })
    }
}

pub fn account(id: &str, name: &str, status: AccountStatus) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        role_level: RoleLevel::User,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn accounts_json(accounts: &[Account]) -> serde_json::Value {
    serde_json::to_value(accounts).unwrap()
}
