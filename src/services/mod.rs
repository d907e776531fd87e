pub mod account_api;
pub mod auth_service;
pub mod http_client;
pub mod navigation;
pub mod transport;

pub use account_api::AccountApi;
pub use auth_service::{AuthApi, MockAuthApi};
pub use http_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use navigation::{MemoryNavigator, Navigator};

#[cfg(target_arch = "wasm32")]
pub use navigation::BrowserNavigator;

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;

#[cfg(target_arch = "wasm32")]
pub use transport::GlooTransport;
