// ============================================================================
// STORAGE - almacenamiento clave/valor persistente
// ============================================================================
// localStorage en el navegador, archivo JSON en nativo, memoria en tests.
// Último en escribir gana: no hay transacciones.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Almacenamiento clave/valor con la semántica de `localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Almacenamiento en memoria. Los clones comparten el mismo mapa, así un
/// "reload" se simula creando stores nuevos sobre un clon.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::KeyValueStorage;
    use crate::error::StorageError;

    /// Almacenamiento en un archivo JSON; sobrevive reinicios del proceso.
    /// Cada escritura reescribe el archivo completo.
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        items: RefCell<HashMap<String, String>>,
    }

    impl FileStorage {
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let items = if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                if contents.trim().is_empty() {
                    HashMap::new()
                } else {
                    serde_json::from_str(&contents)?
                }
            } else {
                HashMap::new()
            };

            log::info!("📂 Storage abierto: {} ({} claves)", path.display(), items.len());

            Ok(Self {
                path,
                items: RefCell::new(items),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let json = serde_json::to_string_pretty(&*self.items.borrow())?;
            std::fs::write(&self.path, json)?;
            Ok(())
        }
    }

    impl KeyValueStorage for FileStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            self.flush()
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            let removed = self.items.borrow_mut().remove(key);
            if removed.is_some() {
                self.flush()?;
            }
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use web_sys::{window, Storage};

    use super::KeyValueStorage;
    use crate::error::StorageError;

    /// `window.localStorage`
    #[derive(Clone, Debug, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        pub fn new() -> Self {
            Self
        }

        fn storage(&self) -> Result<Storage, StorageError> {
            window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)
        }
    }

    impl KeyValueStorage for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage()?
                .get_item(key)
                .map_err(|_| StorageError::Unavailable)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Write {
                    key: key.to_string(),
                })
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.storage()?
                .remove_item(key)
                .map_err(|_| StorageError::Write {
                    key: key.to_string(),
                })
        }
    }
}
