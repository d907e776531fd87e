// ============================================================================
// ROUTER - tabla de rutas + guard de sesión
// ============================================================================
// El guard lee el token persistido directamente del storage, igual que lo
// haría una recarga de página.
// ============================================================================

use std::rc::Rc;

use crate::services::Navigator;
use crate::utils::{KeyValueStorage, HOME_PATH, LOGIN_PATH, REGISTER_PATH, STORAGE_KEY_ACCESS_TOKEN};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Register => REGISTER_PATH,
            Route::Dashboard => HOME_PATH,
        }
    }

    pub fn meta(&self) -> RouteMeta {
        match self {
            Route::Login | Route::Register => RouteMeta {
                requires_auth: false,
                guest_only: true,
            },
            Route::Dashboard => RouteMeta {
                requires_auth: true,
                guest_only: false,
            },
        }
    }

    /// Ruta exacta, o `None` para rutas desconocidas
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// `requires_auth` sin sesión → /login; `guest_only` con sesión → /
pub fn check_access(meta: RouteMeta, storage: &dyn KeyValueStorage) -> GuardDecision {
    let is_logged_in = match storage.get_item(STORAGE_KEY_ACCESS_TOKEN) {
        Ok(token) => token.is_some_and(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("⚠️ Guard: no se pudo leer el token: {}", e);
            false
        }
    };

    if meta.requires_auth && !is_logged_in {
        GuardDecision::Redirect(LOGIN_PATH)
    } else if meta.guest_only && is_logged_in {
        GuardDecision::Redirect(HOME_PATH)
    } else {
        GuardDecision::Allow
    }
}

pub struct Router {
    storage: Rc<dyn KeyValueStorage>,
    navigator: Rc<dyn Navigator>,
}

impl Router {
    pub fn new(storage: Rc<dyn KeyValueStorage>, navigator: Rc<dyn Navigator>) -> Self {
        Self { storage, navigator }
    }

    /// Resolver y proteger una navegación; devuelve la ruta donde termina
    pub fn navigate(&self, path: &str) -> Route {
        let mut route = match Route::from_path(path) {
            Some(route) => route,
            None => {
                log::info!("🧭 Ruta desconocida {}, redirigiendo a {}", path, HOME_PATH);
                Route::Dashboard
            }
        };

        // Un redirect del guard siempre cae en una ruta que el guard acepta,
        // dos pasos alcanzan
        for _ in 0..2 {
            match check_access(route.meta(), self.storage.as_ref()) {
                GuardDecision::Allow => break,
                GuardDecision::Redirect(target) => {
                    log::info!("🔒 Guard: {} → {}", route.path(), target);
                    route = Route::from_path(target).unwrap_or(Route::Login);
                }
            }
        }

        if self.navigator.current_path() != route.path() {
            self.navigator.redirect(route.path());
        }
        route
    }
}
