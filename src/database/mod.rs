use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::User;
use crate::utils::AppError;

pub const CORRUPT_STORE_MESSAGE: &str = "使用者資料檔格式錯誤";

/// Whole-collection storage for user accounts.
///
/// `load` returns `Ok(None)` when no store exists yet,
/// `Err(AppError::DataCorrupt)` when it is not a JSON array, and
/// `Err(AppError::IncompatibleStore)` when it is an array holding entries that
/// are not account objects. Callers decide how to treat each case.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn load(&self) -> Result<Option<Vec<User>>, AppError>;
    async fn save(&self, users: &[User]) -> Result<(), AppError>;
}

/// Users stored as one pretty-printed JSON array on disk.
#[derive(Clone)]
pub struct JsonFileUserRepository {
    path: PathBuf,
}

impl JsonFileUserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn load(&self) -> Result<Option<Vec<User>>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                log::error!("❌ Failed to read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        let records = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                log::warn!("⚠️  User store {} is not a JSON array", self.path.display());
                return Err(AppError::DataCorrupt(CORRUPT_STORE_MESSAGE.to_string()));
            }
            Err(e) => {
                log::warn!("⚠️  Unparsable user store {}: {}", self.path.display(), e);
                return Err(AppError::DataCorrupt(CORRUPT_STORE_MESSAGE.to_string()));
            }
        };

        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                serde_json::from_value::<User>(record).map_err(|e| {
                    log::warn!("⚠️  Unreadable record #{} in {}: {}", i, self.path.display(), e);
                    AppError::IncompatibleStore(CORRUPT_STORE_MESSAGE.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    async fn save(&self, users: &[User]) -> Result<(), AppError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        users
            .serialize(&mut serializer)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        // Stage then rename so readers never see a half-written document.
        let staging = self.staging_path();
        tokio::fs::write(&staging, &buf).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        log::debug!("💾 Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store for tests. `corrupt` mimics an unparsable document.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryUserRepository {
    pub users: tokio::sync::Mutex<Option<Vec<User>>>,
    pub corrupt: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: tokio::sync::Mutex::new(Some(users)),
            ..Default::default()
        }
    }

    pub fn corrupted() -> Self {
        let repo = Self::with_users(Vec::new());
        repo.corrupt.store(true, std::sync::atomic::Ordering::SeqCst);
        repo
    }

    pub async fn snapshot(&self) -> Option<Vec<User>> {
        self.users.lock().await.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn load(&self) -> Result<Option<Vec<User>>, AppError> {
        if self.corrupt.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AppError::DataCorrupt(CORRUPT_STORE_MESSAGE.to_string()));
        }
        Ok(self.users.lock().await.clone())
    }

    async fn save(&self, users: &[User]) -> Result<(), AppError> {
        self.corrupt.store(false, std::sync::atomic::Ordering::SeqCst);
        *self.users.lock().await = Some(users.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{temp_path, write_temp};

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let repo = JsonFileUserRepository::new(temp_path("users.json"));
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unparsable_file_is_corrupt() {
        for contents in ["", "{not json", r#"{"username":"a"}"#] {
            let repo = JsonFileUserRepository::new(write_temp("users.json", contents));
            assert_eq!(
                repo.load().await,
                Err(AppError::DataCorrupt(CORRUPT_STORE_MESSAGE.to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_path("users.json");
        let repo = JsonFileUserRepository::new(&path);
        let mut bob = User::new("bob", "x");
        bob.set_cans(12);
        let users = vec![User::new("小明", "pw"), bob];

        repo.save(&users).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(users));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    {\n        \"username\": \"小明\""));
        assert!(!repo.staging_path().exists());
    }

    #[tokio::test]
    async fn test_record_without_cans_loads_as_zero() {
        let path = write_temp(
            "users.json",
            r#"[{"username": "amy", "password": "pw"}]"#,
        );
        let users = JsonFileUserRepository::new(path).load().await.unwrap().unwrap();
        assert_eq!(users[0].cans(), 0);
    }

    #[tokio::test]
    async fn test_loose_records_survive_a_rewrite() {
        let original = serde_json::json!([
            {"username": "alice", "password": "pw", "cans": 5},
            {"username": "bob", "password": "pw", "cans": 2.5},
            {"username": "cid", "cans": "7", "avatar": "cat.png"}
        ]);
        let path = write_temp("users.json", &original.to_string());
        let repo = JsonFileUserRepository::new(&path);

        let users = repo.load().await.unwrap().unwrap();
        assert_eq!(users.iter().map(User::cans).collect::<Vec<_>>(), vec![5, 0, 7]);

        repo.save(&users).await.unwrap();
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, original);
    }

    #[tokio::test]
    async fn test_non_account_entries_are_incompatible() {
        for contents in [r#"[1, 2]"#, r#"[{"password": "pw"}]"#, r#"[{"username": 5}]"#] {
            let repo = JsonFileUserRepository::new(write_temp("users.json", contents));
            assert_eq!(
                repo.load().await,
                Err(AppError::IncompatibleStore(CORRUPT_STORE_MESSAGE.to_string()))
            );
        }
    }
}
