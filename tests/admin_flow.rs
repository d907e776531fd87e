//! Flujo completo contra un backend en memoria: login → listado filtrado →
//! CRUD con re-sincronización → expiración de sesión.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use account_console::models::{Account, AccountFormDto, AccountQuery, AccountStatus, LoginForm, RoleLevel};
use account_console::router::Route;
use account_console::services::{
    HttpMethod, HttpRequest, HttpResponse, MemoryNavigator, MockAuthApi, Navigator, Transport,
};
use account_console::utils::{KeyValueStorage, MemoryStorage, STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REMEMBERED_EMAIL};
use account_console::{AdminConsole, ApiError, ClientConfig};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

/// Backend falso: guarda cuentas, filtra por substring y exige Bearer
struct FakeBackend {
    accounts: RefCell<Vec<Account>>,
    next_id: Cell<u32>,
    sessions_valid: Cell<bool>,
    list_calls: Cell<usize>,
}

impl FakeBackend {
    fn with(accounts: Vec<Account>) -> Self {
        Self {
            next_id: Cell::new(accounts.len() as u32 + 1),
            accounts: RefCell::new(accounts),
            sessions_valid: Cell::new(true),
            list_calls: Cell::new(0),
        }
    }

    fn filtered(&self, query: &[(String, String)]) -> Vec<Account> {
        self.accounts
            .borrow()
            .iter()
            .filter(|a| {
                query.iter().all(|(key, value)| match key.as_str() {
                    "name" => a.name.contains(value.as_str()),
                    "email" => a.email.contains(value.as_str()),
                    _ => true,
                })
            })
            .cloned()
            .collect()
    }

    fn json(status: u16, value: impl serde::Serialize) -> HttpResponse {
        HttpResponse::new(status, serde_json::to_string(&value).unwrap())
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if request.header("interviewerName") != Some("tester") {
            return Ok(HttpResponse::new(400, r#"{"message":"missing interviewerName","statusCode":400}"#));
        }
        let authorized = request
            .header("Authorization")
            .is_some_and(|h| h.starts_with("Bearer "));
        if !authorized || !self.sessions_valid.get() {
            return Ok(HttpResponse::new(401, ""));
        }

        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        let response = match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["accounts"]) => {
                self.list_calls.set(self.list_calls.get() + 1);
                Self::json(200, self.filtered(&request.query))
            }
            (HttpMethod::Get, ["account", id]) => {
                match self.accounts.borrow().iter().find(|a| a.id == *id) {
                    Some(account) => Self::json(200, account),
                    None => HttpResponse::new(404, ""),
                }
            }
            (HttpMethod::Post, ["create-account"]) => {
                let dto: AccountFormDto = serde_json::from_value(request.body.clone().unwrap()).unwrap();
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                let account = Account {
                    id: id.to_string(),
                    name: dto.name,
                    email: dto.email,
                    role_level: dto.role_level,
                    status: dto.status,
                    created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
                };
                // El servidor decide el orden: lo nuevo va primero
                self.accounts.borrow_mut().insert(0, account.clone());
                Self::json(201, account)
            }
            (HttpMethod::Patch, ["update-account", id]) => {
                let dto: AccountFormDto = serde_json::from_value(request.body.clone().unwrap()).unwrap();
                let mut accounts = self.accounts.borrow_mut();
                match accounts.iter_mut().find(|a| a.id == *id) {
                    Some(account) => {
                        account.name = dto.name;
                        account.email = dto.email;
                        account.role_level = dto.role_level;
                        account.status = dto.status;
                        Self::json(200, account.clone())
                    }
                    None => HttpResponse::new(404, ""),
                }
            }
            (HttpMethod::Delete, ["delete-account", id]) => {
                let mut accounts = self.accounts.borrow_mut();
                let before = accounts.len();
                accounts.retain(|a| a.id != *id);
                if accounts.len() < before {
                    HttpResponse::new(204, "")
                } else {
                    HttpResponse::new(404, "")
                }
            }
            _ => HttpResponse::new(404, ""),
        };
        Ok(response)
    }
}

fn account(id: &str, name: &str, status: AccountStatus) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        role_level: RoleLevel::User,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

struct Harness {
    backend: Rc<FakeBackend>,
    storage: MemoryStorage,
    navigator: Rc<MemoryNavigator>,
    console: AdminConsole,
}

fn harness(accounts: Vec<Account>) -> Harness {
    let config = ClientConfig {
        interviewer_name: "tester".to_string(),
        mock_login_latency_ms: 0,
        search_debounce_ms: 300,
        ..ClientConfig::default()
    };
    let backend = Rc::new(FakeBackend::with(accounts));
    let storage = MemoryStorage::new();
    let navigator = Rc::new(MemoryNavigator::new());
    let console = AdminConsole::new(
        config,
        Rc::new(storage.clone()),
        backend.clone(),
        navigator.clone(),
        Rc::new(MockAuthApi::new(0)),
    );
    Harness {
        backend,
        storage,
        navigator,
        console,
    }
}

async fn login(h: &Harness) {
    h.console
        .session()
        .login(&LoginForm {
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            remember_me: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn login_fetch_remove_scenario() {
    let h = harness(vec![
        account("1", "John", AccountStatus::On),
        account("2", "Mary", AccountStatus::Off),
    ]);

    assert_eq!(h.console.router().navigate("/"), Route::Login);

    login(&h).await;
    let session = h.console.session();
    assert!(session.is_logged_in());
    assert!(h.storage.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap().is_some());
    assert_eq!(
        h.storage.get_item(STORAGE_KEY_REMEMBERED_EMAIL).unwrap().as_deref(),
        Some("a@x.com")
    );
    assert_eq!(h.console.router().navigate("/login"), Route::Dashboard);

    let accounts = h.console.accounts();
    accounts.fetch_accounts(Some(AccountQuery::by_name("Jo"))).await;
    assert_eq!(accounts.accounts().len(), 1);
    assert_eq!(accounts.accounts()[0].id, "1");
    assert_eq!(accounts.total_count(), 1);
    assert_eq!(accounts.active_count(), 1);
    assert_eq!(accounts.inactive_count(), 0);

    accounts.remove_account("1").await.unwrap();
    assert_eq!(accounts.total_count(), 0);
    assert_eq!(accounts.last_query(), Some(AccountQuery::by_name("Jo")));
    assert!(!accounts.is_loading());
}

#[tokio::test]
async fn add_matches_independent_refetch() {
    let h = harness(vec![
        account("1", "John", AccountStatus::On),
        account("2", "Joan", AccountStatus::Off),
        account("3", "Mary", AccountStatus::On),
    ]);
    login(&h).await;

    let accounts = h.console.accounts();
    accounts.fetch_accounts(Some(AccountQuery::by_name("Jo"))).await;

    accounts
        .add_account(&AccountFormDto {
            name: "Jordan".to_string(),
            email: "jordan@x.com".to_string(),
            role_level: RoleLevel::Editor,
            status: AccountStatus::Off,
        })
        .await
        .unwrap();

    let independent = h.backend.filtered(&AccountQuery::by_name("Jo").to_params());
    assert_eq!(accounts.accounts(), independent);
    assert_eq!(accounts.accounts()[0].name, "Jordan");
    assert_eq!(accounts.total_count(), 3);
    assert_eq!(accounts.inactive_count(), 2);
}

#[tokio::test]
async fn edit_refreshes_with_server_state() {
    let h = harness(vec![account("1", "John", AccountStatus::On)]);
    login(&h).await;

    let accounts = h.console.accounts();
    accounts.fetch_accounts(None).await;

    let mut dto = AccountFormDto::from(&accounts.accounts()[0]);
    dto.status = AccountStatus::Off;
    accounts.edit_account("1", &dto).await.unwrap();

    assert_eq!(accounts.accounts()[0].status, AccountStatus::Off);
    assert_eq!(accounts.active_count(), 0);
    assert_eq!(h.backend.list_calls.get(), 2);
}

#[tokio::test]
async fn expired_session_forces_logout_from_any_store() {
    let h = harness(vec![account("1", "John", AccountStatus::On)]);
    login(&h).await;

    let accounts = h.console.accounts();
    accounts.fetch_accounts(None).await;
    h.navigator.redirect("/");

    h.backend.sessions_valid.set(false);
    let result = accounts.remove_account("1").await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert!(!h.console.session().is_logged_in());
    assert_eq!(h.storage.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap(), None);
    assert_eq!(h.navigator.current_path(), "/login");
    // El listado cacheado no se toca
    assert_eq!(accounts.total_count(), 1);
    assert_eq!(accounts.error_message(), "");
    assert_eq!(h.console.router().navigate("/"), Route::Login);
}

#[tokio::test]
async fn fetch_without_session_is_rejected_by_backend() {
    let h = harness(vec![account("1", "John", AccountStatus::On)]);

    let accounts = h.console.accounts();
    accounts.fetch_accounts(None).await;

    assert!(accounts.accounts().is_empty());
    // Expiración de sesión: redirect global, sin mensaje del store
    assert_eq!(accounts.error_message(), "");
    assert_eq!(h.navigator.current_path(), "/login");
}

#[tokio::test(start_paused = true)]
async fn debounced_search_fetches_last_term_only() {
    let h = harness(vec![
        account("1", "John", AccountStatus::On),
        account("2", "Mary", AccountStatus::Off),
    ]);
    login(&h).await;
    let before = h.backend.list_calls.get();

    h.console
        .run_until(async {
            h.console.search().input("J".to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
            h.console.search().input("Ma".to_string());

            tokio::time::sleep(Duration::from_millis(450)).await;
            tokio::time::sleep(Duration::from_millis(10)).await;
        })
        .await;

    let accounts = h.console.accounts();
    assert_eq!(h.backend.list_calls.get(), before + 1);
    assert_eq!(accounts.last_query(), Some(AccountQuery::by_name("Ma")));
    assert_eq!(accounts.accounts().len(), 1);
    assert_eq!(accounts.accounts()[0].name, "Mary");
}
