// ============================================================================
// ACCOUNT STORE - listado de cuentas + CRUD
// ============================================================================
// El backend es la única fuente de verdad: después de cada mutación exitosa
// se vuelve a pedir el listado con el último filtro usado, nunca se parchea
// la copia local.
//
// Dos fetch solapados no se serializan: gana la respuesta que llega última.
// ============================================================================

use crate::error::ApiError;
use crate::models::{Account, AccountFormDto, AccountQuery, AccountStats};
use crate::services::AccountApi;
use crate::state::{LoadingGuard, ReactiveState};
use crate::utils::t;

pub struct AccountStore {
    api: AccountApi,
    language: String,
    accounts: ReactiveState<Vec<Account>>,
    is_loading: ReactiveState<bool>,
    error_message: ReactiveState<String>,
    last_query: ReactiveState<Option<AccountQuery>>,
}

impl AccountStore {
    pub fn new(api: AccountApi, language: impl Into<String>) -> Self {
        Self {
            api,
            language: language.into(),
            accounts: ReactiveState::new(Vec::new()),
            is_loading: ReactiveState::new(false),
            error_message: ReactiveState::new(String::new()),
            last_query: ReactiveState::new(None),
        }
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.get()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn error_message(&self) -> String {
        self.error_message.get()
    }

    pub fn last_query(&self) -> Option<AccountQuery> {
        self.last_query.get()
    }

    pub fn stats(&self) -> AccountStats {
        self.accounts.with(|accounts| AccountStats::from_accounts(accounts))
    }

    pub fn total_count(&self) -> usize {
        self.stats().total
    }

    pub fn active_count(&self) -> usize {
        self.stats().active
    }

    pub fn inactive_count(&self) -> usize {
        self.stats().inactive
    }

    /// Notificar cualquier cambio de listado, carga o error
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = std::rc::Rc::new(callback);
        {
            let callback = std::rc::Rc::clone(&callback);
            self.accounts.subscribe(move || callback());
        }
        {
            let callback = std::rc::Rc::clone(&callback);
            self.is_loading.subscribe(move || callback());
        }
        self.error_message.subscribe(move || callback());
    }

    /// Cargar el listado. `query` queda como último filtro antes del request,
    /// aunque falle. En error conserva el listado anterior y NO devuelve error.
    pub async fn fetch_accounts(&self, query: Option<AccountQuery>) {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());
        self.load(query).await;
    }

    async fn load(&self, query: Option<AccountQuery>) {
        self.last_query.set(query.clone());

        match self.api.list_accounts(query.as_ref()).await {
            Ok(accounts) => {
                log::info!("📋 {} cuentas cargadas", accounts.len());
                self.accounts.set(accounts);
            }
            Err(e) => {
                self.report("fetch_accounts_failed", "fetch_accounts", &e);
            }
        }
    }

    /// Crear cuenta y re-sincronizar
    pub async fn add_account(&self, data: &AccountFormDto) -> Result<(), ApiError> {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());

        match self.api.create_account(data).await {
            Ok(created) => {
                log::info!("✅ Cuenta creada: {}", created.id);
                self.resync().await;
                Ok(())
            }
            Err(e) => Err(self.fail("create_account_failed", "add_account", e)),
        }
    }

    /// Actualizar cuenta y re-sincronizar
    pub async fn edit_account(&self, id: &str, data: &AccountFormDto) -> Result<(), ApiError> {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());

        match self.api.update_account(id, data).await {
            Ok(_) => {
                log::info!("✅ Cuenta actualizada: {}", id);
                self.resync().await;
                Ok(())
            }
            Err(e) => Err(self.fail("update_account_failed", "edit_account", e)),
        }
    }

    /// Eliminar cuenta y re-sincronizar
    pub async fn remove_account(&self, id: &str) -> Result<(), ApiError> {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());

        match self.api.delete_account(id).await {
            Ok(()) => {
                log::info!("🗑️ Cuenta eliminada: {}", id);
                self.resync().await;
                Ok(())
            }
            Err(e) => Err(self.fail("delete_account_failed", "remove_account", e)),
        }
    }

    /// Vuelve a pedir el listado con el último filtro (aunque el usuario haya
    /// cambiado el input sin enviarlo), dentro del loading de la mutación.
    /// Un fallo aquí queda en `error_message` y no convierte la mutación en error.
    async fn resync(&self) {
        let query = self.last_query();
        self.load(query).await;
    }

    fn fail(&self, message_key: &str, action: &str, error: ApiError) -> ApiError {
        self.report(message_key, action, &error);
        error
    }

    /// Sesión expirada: el adapter ya cerró la sesión y redirigió, el store
    /// no muestra mensaje propio
    fn report(&self, message_key: &str, action: &str, error: &ApiError) {
        if matches!(error, ApiError::Unauthorized) {
            log::warn!("🔒 [account_store] {}: sesión expirada", action);
            return;
        }
        log::error!("❌ [account_store] {} error: {}", action, error);
        self.error_message.set(t(message_key, &self.language));
    }
}
