// Utils compartidos

pub mod constants;
pub mod debounce;
pub mod i18n;
pub mod runtime;
pub mod storage;

pub use constants::*;
pub use debounce::Debouncer;
pub use i18n::t;
pub use storage::{KeyValueStorage, MemoryStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
