// ============================================================================
// SESSION STATE - dueño único del token de sesión
// ============================================================================
// Lo comparten el SessionStore y el HttpClient (Rc), así el adapter puede
// invalidar la sesión en un 401 sin depender del store.
// ============================================================================

use std::rc::Rc;

use crate::error::StorageError;
use crate::state::ReactiveState;
use crate::utils::{KeyValueStorage, STORAGE_KEY_ACCESS_TOKEN};

pub struct SessionState {
    storage: Rc<dyn KeyValueStorage>,
    token: ReactiveState<Option<String>>,
}

impl SessionState {
    /// Crear el estado leyendo el token persistido (sobrevive recargas)
    pub fn restore(storage: Rc<dyn KeyValueStorage>) -> Self {
        let token = match storage.get_item(STORAGE_KEY_ACCESS_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️ No se pudo leer el token guardado: {}", e);
                None
            }
        };

        if token.is_some() {
            log::info!("🔑 Token restaurado desde storage");
        }

        Self {
            storage,
            token: ReactiveState::new(token),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    /// Derivado: hay sesión sii el token no está vacío
    pub fn is_logged_in(&self) -> bool {
        self.token.with(|t| t.as_deref().is_some_and(|t| !t.is_empty()))
    }

    /// Persistir y activar un token nuevo. Si el storage falla, el token en
    /// memoria no cambia.
    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(STORAGE_KEY_ACCESS_TOKEN, token)?;
        self.token.set(Some(token.to_string()));
        Ok(())
    }

    /// Borrar el token de memoria y de storage
    pub fn clear_token(&self) {
        if let Err(e) = self.storage.remove_item(STORAGE_KEY_ACCESS_TOKEN) {
            log::error!("❌ Error eliminando token de storage: {}", e);
        }
        self.token.set(None);
    }

    pub fn storage(&self) -> &Rc<dyn KeyValueStorage> {
        &self.storage
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.token.subscribe(callback);
    }
}
