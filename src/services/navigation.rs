use std::cell::RefCell;

use crate::utils::HOME_PATH;

/// Navegación a nivel de aplicación
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Navegador en memoria: guarda el historial de redirecciones
#[derive(Debug)]
pub struct MemoryNavigator {
    history: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::starting_at(HOME_PATH)
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            history: RefCell::new(vec![path.to_string()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    fn redirect(&self, path: &str) {
        log::info!("🧭 Navegando a {}", path);
        self.history.borrow_mut().push(path.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Navigator;
    use crate::utils::HOME_PATH;

    /// `window.location`: una redirección recarga la página completa
    #[derive(Clone, Debug, Default)]
    pub struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn current_path(&self) -> String {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| HOME_PATH.to_string())
        }

        fn redirect(&self, path: &str) {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(path) {
                    log::error!("❌ Error redirigiendo a {}: {:?}", path, e);
                }
            }
        }
    }
}
