// ============================================================================
// ACCOUNT CONSOLE - núcleo de sesión + sincronización de cuentas (RUST + WASM)
// ============================================================================
// - Services: SOLO comunicación (transporte, adapter HTTP, API tipada, auth)
// - State: SessionState compartido + ReactiveState con Rc<RefCell>
// - Stores: SessionStore (login/logout) y AccountStore (CRUD + re-sync)
// - Router: tabla de rutas + guard de sesión
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::AdminConsole;
pub use config::{ClientConfig, CONFIG};
pub use error::{ApiError, StorageError};

/// Aplica `ENABLE_LOGGING`: con logging desactivado silencia el facade `log`.
/// En nativo el logger concreto lo instala el host.
pub fn apply_log_level(config: &ClientConfig) {
    if config.is_logging_enabled() {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Off);
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::AdminConsole;
    use crate::config::CONFIG;
    use crate::services::{BrowserNavigator, Navigator};

    // Instancia global de la app
    thread_local! {
        static APP: RefCell<Option<AdminConsole>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        crate::apply_log_level(&CONFIG);
        log::info!("🚀 Account Console - Rust + WASM");

        let app = AdminConsole::for_browser(CONFIG.clone());
        let route = app.router().navigate(&BrowserNavigator.current_path());
        log::info!("🧭 Ruta inicial: {}", route.path());

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });

        Ok(())
    }

    /// Navegación desde JavaScript (links internos)
    #[wasm_bindgen]
    pub fn navigate(path: &str) -> String {
        APP.with(|cell| match *cell.borrow() {
            Some(ref app) => app.router().navigate(path).path().to_string(),
            None => {
                log::warn!("⚠️ App no está inicializada");
                path.to_string()
            }
        })
    }

    /// Input del buscador desde JavaScript
    #[wasm_bindgen]
    pub fn search_input(term: String) {
        APP.with(|cell| {
            if let Some(ref app) = *cell.borrow() {
                app.search().input(term);
            }
        });
    }
}
