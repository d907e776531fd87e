// ============================================================================
// SESSION STORE - login / registro / logout
// ============================================================================
// El token vive en SessionState (compartido con HttpClient). `is_logged_in`
// se deriva del token en cada lectura.
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{LoginForm, RegisterForm};
use crate::services::AuthApi;
use crate::state::{LoadingGuard, ReactiveState, SessionState};
use crate::utils::{t, STORAGE_KEY_REMEMBERED_EMAIL};

pub struct SessionStore {
    session: Rc<SessionState>,
    auth: Rc<dyn AuthApi>,
    language: String,
    is_loading: ReactiveState<bool>,
    error_message: ReactiveState<String>,
}

impl SessionStore {
    pub fn new(session: Rc<SessionState>, auth: Rc<dyn AuthApi>, language: impl Into<String>) -> Self {
        Self {
            session,
            auth,
            language: language.into(),
            is_loading: ReactiveState::new(false),
            error_message: ReactiveState::new(String::new()),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn error_message(&self) -> String {
        self.error_message.get()
    }

    /// Email guardado con "recordarme", para pre-llenar el formulario
    pub fn remembered_email(&self) -> Option<String> {
        self.session
            .storage()
            .get_item(STORAGE_KEY_REMEMBERED_EMAIL)
            .unwrap_or_else(|e| {
                log::warn!("⚠️ No se pudo leer el email recordado: {}", e);
                None
            })
    }

    /// Notificar cualquier cambio de token, carga o error
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        {
            let callback = Rc::clone(&callback);
            self.session.subscribe(move || callback());
        }
        {
            let callback = Rc::clone(&callback);
            self.is_loading.subscribe(move || callback());
        }
        self.error_message.subscribe(move || callback());
    }

    /// Login: guarda el token y el email recordado. En error deja un mensaje
    /// fijo y devuelve el error al llamador.
    pub async fn login(&self, form: &LoginForm) -> Result<(), ApiError> {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());

        match self.start_session(form).await {
            Ok(()) => {
                log::info!("✅ Login exitoso: {}", form.email);
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Error en login: {}", e);
                self.error_message.set(t("login_failed", &self.language));
                Err(e)
            }
        }
    }

    async fn start_session(&self, form: &LoginForm) -> Result<(), ApiError> {
        let token = self.auth.login(form).await?;
        self.session.store_token(&token)?;
        self.remember_email(form);
        Ok(())
    }

    fn remember_email(&self, form: &LoginForm) {
        let storage = self.session.storage();
        let result = if form.remember_me {
            storage.set_item(STORAGE_KEY_REMEMBERED_EMAIL, &form.email)
        } else {
            storage.remove_item(STORAGE_KEY_REMEMBERED_EMAIL)
        };
        if let Err(e) = result {
            log::warn!("⚠️ No se pudo actualizar el email recordado: {}", e);
        }
    }

    /// Registro: mismo contrato que login, devuelve el token emitido
    pub async fn register(&self, form: &RegisterForm) -> Result<String, ApiError> {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        self.error_message.set(String::new());

        let result = match self.auth.register(form).await {
            Ok(token) => self.session.store_token(&token).map(|_| token).map_err(ApiError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(token) => {
                log::info!("✅ Registro exitoso: {}", form.email);
                Ok(token)
            }
            Err(e) => {
                log::error!("❌ Error en registro: {}", e);
                self.error_message.set(t("register_failed", &self.language));
                Err(e)
            }
        }
    }

    /// Logout síncrono; llamarlo sin sesión no hace nada más que limpiar
    pub fn logout(&self) {
        log::info!("👋 Logout");
        self.session.clear_token();
        self.error_message.set(String::new());
    }

    pub fn clear_error(&self) {
        self.error_message.set(String::new());
    }
}
