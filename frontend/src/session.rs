// The token is opaque. The remote service decides whether it is still good.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};

use crate::error::SessionError;

pub const TOKEN_KEY: &str = "token";

pub trait TokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn store(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Shared handle to the persisted session. Clones see the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new<S: TokenStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Rc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Current token, if any. An unreadable store counts as logged out.
    pub fn get_token(&self) -> Option<String> {
        match self.storage.load(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read session token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.storage.store(TOKEN_KEY, token)?;
        info!("Session token stored");
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), SessionError> {
        self.storage.remove(TOKEN_KEY)?;
        info!("Session token cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl TokenStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::HashMap;
    use std::fs::{self, OpenOptions};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use log::warn;

    use super::TokenStorage;
    use crate::error::SessionError;

    /// JSON object file standing in for browser local storage, so a token
    /// survives restarts of the terminal client.
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<HashMap<String, String>, SessionError> {
            match fs::read_to_string(&self.path) {
                Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
                Ok(raw) => Ok(serde_json::from_str(&raw)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        // A corrupt file must not block a fresh login or a logout.
        fn read_for_write(&self) -> Result<HashMap<String, String>, SessionError> {
            match self.read_all() {
                Err(SessionError::Corrupt(e)) => {
                    warn!(
                        "Discarding unreadable session file {}: {}",
                        self.path.display(),
                        e
                    );
                    Ok(HashMap::new())
                }
                other => other,
            }
        }

        fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let raw = serde_json::to_string_pretty(entries)?;
            let mut file = open_private(&self.path)?;
            file.write_all(raw.as_bytes())?;
            Ok(())
        }
    }

    #[cfg(unix)]
    fn open_private(path: &Path) -> std::io::Result<fs::File> {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // mode() only applies on creation
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        Ok(file)
    }

    #[cfg(not(unix))]
    fn open_private(path: &Path) -> std::io::Result<fs::File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }

    impl TokenStorage for FileStorage {
        fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
            Ok(self.read_all()?.remove(key))
        }

        fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
            let mut entries = self.read_for_write()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&self, key: &str) -> Result<(), SessionError> {
            match self.read_all() {
                Ok(mut entries) => {
                    if entries.remove(key).is_some() {
                        self.write_all(&entries)?;
                    }
                    Ok(())
                }
                Err(SessionError::Corrupt(_)) => {
                    let entries = self.read_for_write()?;
                    self.write_all(&entries)
                }
                Err(e) => Err(e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local {
    use std::cell::RefCell;

    use yew::format::Text;
    use yew::services::storage::{Area, StorageService};

    use super::TokenStorage;
    use crate::error::SessionError;

    pub struct LocalStorage {
        service: RefCell<StorageService>,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, SessionError> {
            let service = StorageService::new(Area::Local)
                .map_err(|e| SessionError::Unavailable(e.to_string()))?;
            Ok(Self {
                service: RefCell::new(service),
            })
        }
    }

    impl TokenStorage for LocalStorage {
        fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
            let text: Text = self.service.borrow().restore(key);
            Ok(text.ok())
        }

        fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
            let text: Text = Ok(value.to_string());
            self.service.borrow_mut().store(key, text);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.service.borrow_mut().remove(key);
            Ok(())
        }
    }
}
