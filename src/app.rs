// ============================================================================
// APP - raíz de composición
// ============================================================================
// Un solo SessionState compartido entre el SessionStore y el HttpClient.
// ============================================================================

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::models::AccountQuery;
use crate::services::{AccountApi, AuthApi, HttpClient, MockAuthApi, Navigator, Transport};
use crate::state::SessionState;
use crate::stores::{AccountStore, SessionStore};
use crate::router::Router;
use crate::utils::{runtime, Debouncer, KeyValueStorage};

pub struct AdminConsole {
    config: ClientConfig,
    session_store: Rc<SessionStore>,
    account_store: Rc<AccountStore>,
    router: Router,
    search: Debouncer<String>,
}

impl AdminConsole {
    /// Construir con dependencias explícitas (tests, otros hosts)
    pub fn new(
        config: ClientConfig,
        storage: Rc<dyn KeyValueStorage>,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
        auth: Rc<dyn AuthApi>,
    ) -> Self {
        let session = Rc::new(SessionState::restore(Rc::clone(&storage)));
        let http = Rc::new(HttpClient::new(
            transport,
            Rc::clone(&session),
            Rc::clone(&navigator),
            config.interviewer_name.clone(),
        ));

        let session_store = Rc::new(SessionStore::new(
            session,
            auth,
            config.language.clone(),
        ));
        let account_store = Rc::new(AccountStore::new(
            AccountApi::new(http),
            config.language.clone(),
        ));
        let router = Router::new(storage, navigator);
        let search = Debouncer::new(String::new(), config.search_debounce_ms);
        connect_search(&search, Rc::clone(&account_store));

        Self {
            config,
            session_store,
            account_store,
            router,
            search,
        }
    }

    /// Navegador: localStorage + fetch + window.location
    #[cfg(target_arch = "wasm32")]
    pub fn for_browser(config: ClientConfig) -> Self {
        use crate::services::{BrowserNavigator, GlooTransport};
        use crate::utils::LocalStorage;

        let transport = GlooTransport::new(
            config.base_url(),
            std::time::Duration::from_secs(config.network_timeout_seconds),
        );
        let auth = MockAuthApi::new(config.mock_login_latency_ms);
        Self::new(
            config,
            Rc::new(LocalStorage::new()),
            Rc::new(transport),
            Rc::new(BrowserNavigator),
            Rc::new(auth),
        )
    }

    /// Nativo: storage en archivo + reqwest; la navegación queda en memoria.
    /// Las búsquedas debounced corren mientras el host esté dentro de
    /// [`AdminConsole::run_until`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(
        config: ClientConfig,
        storage_path: impl Into<std::path::PathBuf>,
    ) -> Result<Self, crate::error::ApiError> {
        use crate::services::{MemoryNavigator, ReqwestTransport};
        use crate::utils::FileStorage;

        let storage = FileStorage::open(storage_path)?;
        let transport = ReqwestTransport::new(
            config.base_url(),
            std::time::Duration::from_secs(config.network_timeout_seconds),
        )?;
        let auth = MockAuthApi::new(config.mock_login_latency_ms);

        Ok(Self::new(
            config,
            Rc::new(storage),
            Rc::new(transport),
            Rc::new(MemoryNavigator::new()),
            Rc::new(auth),
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> Rc<SessionStore> {
        Rc::clone(&self.session_store)
    }

    pub fn accounts(&self) -> Rc<AccountStore> {
        Rc::clone(&self.account_store)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Input de búsqueda (debounced)
    pub fn search(&self) -> &Debouncer<String> {
        &self.search
    }

    /// Maneja las tareas de fondo (búsqueda debounced y su fetch) hasta que
    /// `future` termine
    pub async fn run_until<F: std::future::Future>(&self, future: F) -> F::Output {
        runtime::run_until(future).await
    }
}

/// Cada término debounced dispara un fetch filtrado por nombre; vacío = sin filtro
fn connect_search(search: &Debouncer<String>, accounts: Rc<AccountStore>) {
    let output = search.output();
    let source = Rc::downgrade(&output);
    output.subscribe(move || {
        let Some(source) = source.upgrade() else {
            return;
        };
        let term = source.get();
        let term = term.trim();
        let query = if term.is_empty() {
            None
        } else {
            Some(AccountQuery::by_name(term))
        };

        let accounts = Rc::clone(&accounts);
        runtime::spawn_local(async move {
            accounts.fetch_accounts(query).await;
        });
    });
}
