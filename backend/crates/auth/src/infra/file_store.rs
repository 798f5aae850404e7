//! File-backed Repository Implementation
//!
//! Durable storage with no in-memory cache: every operation reads or writes
//! the filesystem directly.
//!
//! Layout under the data directory:
//! - `accounts.jsonl` - the account table, one JSON record per line, keyed
//!   by username. Mutations rewrite or append the table as a whole; there
//!   are no partial-row updates.
//! - `sessions/<id>.json` - one record per active session. The id is the
//!   file name, so creation with `create_new` doubles as the collision
//!   check.
//!
//! Each store is serialized by its own `RwLock`: readers run concurrently,
//! writers are exclusive, and the check-then-write sequences (duplicate
//! check + append, collision check + create) run entirely inside the write
//! lock.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use platform::password::PasswordDigest;

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::{session_id::SessionId, username::Username};
use crate::error::{AuthError, AuthResult};

/// Account table file name
const ACCOUNTS_FILE: &str = "accounts.jsonl";

/// Session directory name
const SESSIONS_DIR: &str = "sessions";

/// File-backed auth repository
#[derive(Clone)]
pub struct FileAuthRepository {
    accounts_path: PathBuf,
    sessions_dir: PathBuf,
    accounts_lock: Arc<RwLock<()>>,
    sessions_lock: Arc<RwLock<()>>,
}

impl FileAuthRepository {
    /// Create a repository rooted at the given data directory
    ///
    /// Call [`Self::bootstrap`] once at startup to create the layout.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            accounts_path: data_dir.join(ACCOUNTS_FILE),
            sessions_dir: data_dir.join(SESSIONS_DIR),
            accounts_lock: Arc::new(RwLock::new(())),
            sessions_lock: Arc::new(RwLock::new(())),
        }
    }

    /// Create the storage layout on first run
    ///
    /// Creates the session directory and an empty account table if they do
    /// not exist yet; an already-populated layout is left untouched.
    pub async fn bootstrap(&self) -> AuthResult<()> {
        fs::create_dir_all(&self.sessions_dir).await?;

        match fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&self.accounts_path)
            .await
        {
            Ok(_) => {
                tracing::info!(path = %self.accounts_path.display(), "Created account table");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the whole account table. Caller must hold the accounts lock.
    async fn load_accounts(&self) -> AuthResult<Vec<AccountRecord>> {
        let contents = fs::read_to_string(&self.accounts_path).await?;

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<AccountRecord>(line).map_err(AuthError::from))
            .collect()
    }

    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", id.as_str()))
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for FileAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let _guard = self.accounts_lock.write().await;

        // Re-check uniqueness under the write lock
        let records = self.load_accounts().await?;
        if records.iter().any(|r| r.username == account.username) {
            return Err(AuthError::DuplicateAccount);
        }

        let mut line = serde_json::to_string(&AccountRecord::from(account))?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.accounts_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>> {
        let _guard = self.accounts_lock.read().await;

        let records = self.load_accounts().await?;
        Ok(records
            .into_iter()
            .find(|r| r.username == *username)
            .map(AccountRecord::into_account))
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let _guard = self.accounts_lock.read().await;

        let records = self.load_accounts().await?;
        Ok(records.iter().any(|r| r.username == *username))
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        let _guard = self.accounts_lock.write().await;

        let mut records = self.load_accounts().await?;
        let record = records
            .iter_mut()
            .find(|r| r.username == account.username)
            .ok_or(AuthError::AccountNotFound)?;
        *record = AccountRecord::from(account);

        // The table is rewritten as a whole
        let mut contents = String::new();
        for record in &records {
            contents.push_str(&serde_json::to_string(record)?);
            contents.push('\n');
        }
        fs::write(&self.accounts_path, contents).await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for FileAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let _guard = self.sessions_lock.write().await;

        let record = serde_json::to_vec(&SessionRecord::from(session))?;

        // create_new is the collision check: an existing slot fails creation
        let mut file = match fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(self.session_path(&session.id))
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(AuthError::SessionIdCollision);
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(&record).await?;
        file.flush().await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> AuthResult<Option<Session>> {
        let _guard = self.sessions_lock.read().await;

        let contents = match fs::read_to_string(self.session_path(id)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: SessionRecord = serde_json::from_str(&contents)?;
        Ok(Some(record.into_session(id.clone())))
    }

    async fn delete(&self, id: &SessionId) -> AuthResult<()> {
        let _guard = self.sessions_lock.write().await;

        match fs::remove_file(self.session_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AuthError::SessionNotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let _guard = self.sessions_lock.write().await;

        let mut deleted = 0u64;
        let mut entries = fs::read_dir(&self.sessions_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(id) = SessionId::parse(stem) else {
                continue;
            };

            let contents = match fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            let session = match serde_json::from_str::<SessionRecord>(&contents) {
                Ok(record) => record.into_session(id),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable session record");
                    continue;
                }
            };

            if session.is_expired() {
                fs::remove_file(&path).await?;
                deleted += 1;
            }
        }

        if deleted > 0 {
            tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");
        }

        Ok(deleted)
    }
}

// ============================================================================
// Storage Records
// ============================================================================

/// One line of the account table
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    username: Username,
    password_hash: PasswordDigest,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRecord {
    fn into_account(self) -> Account {
        Account {
            username: self.username,
            password_digest: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            password_hash: account.password_digest.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// One session file; the id is the file name, not part of the record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    username: Username,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    fn into_session(self, id: SessionId) -> Session {
        Session::from_parts(id, self.username, self.expires_at_ms, self.created_at)
    }
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            expires_at_ms: session.expires_at_ms,
            created_at: session.created_at,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
