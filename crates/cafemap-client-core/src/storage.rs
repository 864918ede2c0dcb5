//! Durable home for the auth token between runs. Only the token is ever
//! persisted; user info is re-derived from the backend each startup.

use std::fmt::Debug;
use std::sync::Mutex;

use cafemap_shared::token::AuthToken;

pub trait TokenStore: Debug + Send + Sync + 'static {
    fn load(&self) -> Option<AuthToken>;
    fn save(&self, token: &AuthToken);
    fn clear(&self);
}

/// Keeps the token for the lifetime of the process only (web shell, tests)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AuthToken> {
        self.token.lock().expect("mutex poisoned").clone()
    }

    fn save(&self, token: &AuthToken) {
        *self.token.lock().expect("mutex poisoned") = Some(token.clone());
    }

    fn clear(&self) {
        *self.token.lock().expect("mutex poisoned") = None;
    }
}

/// Stores the token as a file named after the storage key inside the given
/// directory, surviving restarts
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileTokenStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileTokenStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        use cafemap_shared::const_config::client::STORAGE_KEY_AUTH_TOKEN;
        Self {
            path: dir.into().join(STORAGE_KEY_AUTH_TOKEN),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<AuthToken> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.into())
    }

    fn save(&self, token: &AuthToken) {
        if let Some(parent) = self.path.parent() {
            cafemap_shared::log_err_as_warn!(std::fs::create_dir_all(parent));
        }
        cafemap_shared::log_err_as_warn!(std::fs::write(&self.path, token.as_str()));
    }

    fn clear(&self) {
        if self.path.exists() {
            cafemap_shared::log_err_as_warn!(std::fs::remove_file(&self.path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);

        store.save(&"tok".into());
        assert_eq!(store.load(), Some("tok".into()));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("cafemap-store-{}", std::process::id()));
        let store = FileTokenStore::new(&dir);
        store.clear();
        assert_eq!(store.load(), None);

        store.save(&"tok-file".into());
        assert_eq!(store.load(), Some("tok-file".into()));

        // A second store over the same directory sees the token (restart)
        let restarted = FileTokenStore::new(&dir);
        assert_eq!(restarted.load(), Some("tok-file".into()));

        store.clear();
        assert_eq!(restarted.load(), None);
        let _ = std::fs::remove_dir(dir);
    }
}
