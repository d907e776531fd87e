// ============================================================================
// ACCOUNT API - requests tipados para /accounts
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{Account, AccountFormDto, AccountQuery};
use crate::services::http_client::HttpClient;

#[derive(Clone)]
pub struct AccountApi {
    http: Rc<HttpClient>,
}

impl AccountApi {
    pub fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /accounts?name=&email=
    pub async fn list_accounts(&self, query: Option<&AccountQuery>) -> Result<Vec<Account>, ApiError> {
        let params = query.map(AccountQuery::to_params).unwrap_or_default();
        self.http.get_json("/accounts", params).await
    }

    /// GET /account/{id}
    pub async fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        self.http.get_json(&format!("/account/{}", id), Vec::new()).await
    }

    /// POST /create-account
    pub async fn create_account(&self, data: &AccountFormDto) -> Result<Account, ApiError> {
        self.http.post_json("/create-account", data).await
    }

    /// PATCH /update-account/{id}
    pub async fn update_account(&self, id: &str, data: &AccountFormDto) -> Result<Account, ApiError> {
        self.http
            .patch_json(&format!("/update-account/{}", id), data)
            .await
    }

    /// DELETE /delete-account/{id}
    pub async fn delete_account(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&format!("/delete-account/{}", id)).await
    }
}
