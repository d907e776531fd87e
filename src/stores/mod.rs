pub mod account_store;
pub mod session_store;

pub use account_store::AccountStore;
pub use session_store::SessionStore;
