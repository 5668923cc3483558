use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    database::UserRepository,
    models::{User, MAX_USERNAME_CHARS},
    utils::AppError,
};

pub const MSG_EMPTY_CREDENTIALS: &str = "帳號或密碼不可為空";
pub const MSG_USERNAME_TOO_LONG: &str = "暱稱不可以超過10個字";
pub const MSG_USERNAME_TAKEN: &str = "帳號已存在";
pub const MSG_NO_SUCH_USER: &str = "帳號不存在";
pub const MSG_UPDATE_FAILED: &str = "更新失敗";
pub const MSG_NO_USER_DATA: &str = "使用者資料不存在";
pub const MSG_NO_USER_FILE: &str = "找不到使用者資料檔";
pub const MSG_BAD_CREDENTIALS: &str = "帳號不存在或密碼錯誤";

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub username: String,
    pub cans: u64,
}

/// Account ledger over a whole-collection `UserRepository`.
///
/// Every mutation reads the full collection, edits it and writes it back.
/// Mutations inside this process are serialized by `write_lock`; another
/// process writing the same store can still overwrite our changes.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    write_lock: Mutex<()>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(MSG_EMPTY_CREDENTIALS.to_string()));
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(AppError::Validation(MSG_USERNAME_TOO_LONG.to_string()));
        }

        let _guard = self.write_lock.lock().await;

        // An unparsable store is discarded here and replaced on save. A store
        // holding records we cannot read is left alone.
        let mut users = match self.repo.load().await {
            Ok(users) => users.unwrap_or_default(),
            Err(AppError::DataCorrupt(_)) => {
                log::warn!("⚠️  Discarding unparsable user store during registration");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(MSG_USERNAME_TAKEN.to_string()));
        }

        users.push(User::new(username, password));
        self.repo.save(&users).await?;

        Ok(username.to_string())
    }

    pub async fn get_balance(&self, username: &str) -> Result<u64, AppError> {
        if username.is_empty() {
            return Err(AppError::NotFound(MSG_NO_SUCH_USER.to_string()));
        }

        let users = self
            .repo
            .load()
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_NO_SUCH_USER.to_string()))?;

        users
            .iter()
            .find(|u| u.username == username)
            .map(User::cans)
            .ok_or_else(|| AppError::NotFound(MSG_NO_SUCH_USER.to_string()))
    }

    pub async fn set_balance(&self, username: &str, new_value: Option<u64>) -> Result<u64, AppError> {
        let cans = match new_value {
            Some(cans) if !username.is_empty() => cans,
            _ => return Err(AppError::Validation(MSG_UPDATE_FAILED.to_string())),
        };

        let _guard = self.write_lock.lock().await;

        let mut users = self
            .repo
            .load()
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_NO_USER_DATA.to_string()))?;

        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::NotFound(MSG_NO_SUCH_USER.to_string()))?;
        user.set_cans(cans);

        self.repo.save(&users).await?;
        Ok(cans)
    }

    /// Same failure for unknown user and wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AccountSummary, AppError> {
        let users = self
            .repo
            .load()
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_NO_USER_FILE.to_string()))?;

        users
            .into_iter()
            .find(|u| u.username == username && u.password_matches(password))
            .map(|u| AccountSummary {
                cans: u.cans(),
                username: u.username,
            })
            .ok_or_else(|| AppError::InvalidCredentials(MSG_BAD_CREDENTIALS.to_string()))
    }
}
