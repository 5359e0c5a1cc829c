use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, error, info, trace, warn};
use tokio::sync::Mutex;

use crate::account_directory::{AccountDirectory, AccountError};
use crate::kv_store::{FileKeyValueStore, KeyValueStore, KeyValueStoreExt, KvStoreError};
use crate::lib_constants::{ACCOUNTS_KEY, CURRENT_USER_KEY};
use crate::read_outcome::ReadOutcome;
use crate::username_string::{UsernameStr, UsernameString};

pub(crate) use account::Account;

mod account;

pub type ProductionAccountDirectory = AccountDirectoryImpl<FileKeyValueStore>;

pub struct AccountDirectoryImpl<S: KeyValueStore> {
    store: Arc<S>,
    // serializes the account list read-modify-write
    accounts_lock: Mutex<()>,
}

impl<S: KeyValueStore> AccountDirectoryImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        AccountDirectoryImpl {
            store,
            accounts_lock: Mutex::new(()),
        }
    }

    pub(crate) async fn load_accounts(&self) -> ReadOutcome<Vec<Account>> {
        trace!("loading account list");
        self.store.get_json(ACCOUNTS_KEY).await
    }

    pub async fn load_session(&self) -> ReadOutcome<UsernameString> {
        trace!("loading session pointer");
        match self.store.get(CURRENT_USER_KEY).await {
            Ok(None) => ReadOutcome::Absent,
            Ok(Some(username)) => match UsernameString::from_str(&username) {
                Ok(username) => ReadOutcome::Found(username),
                Err(_) => {
                    warn!("session pointer holds an empty username");
                    ReadOutcome::Absent
                },
            },
            Err(e) => ReadOutcome::Fault(e),
        }
    }

    pub async fn try_end_session(&self) -> Result<(), KvStoreError> {
        self.store.remove(CURRENT_USER_KEY).await
    }

    async fn load_accounts_strict(&self) -> Result<Vec<Account>, AccountError> {
        Ok(
            self.load_accounts()
                .await
                .into_result()
                .map_err(AccountError::StorageUnavailable)?
                .unwrap_or_default()
        )
    }

    async fn set_session(&self, username: &UsernameStr) -> Result<(), AccountError> {
        self.store
            .set(CURRENT_USER_KEY, username)
            .await
            .map_err(AccountError::StorageUnavailable)
    }
}

#[async_trait]
impl<S: KeyValueStore> AccountDirectory for AccountDirectoryImpl<S> {
    async fn register(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> Result<(), AccountError> {
        debug!("registering user \"{username}\"");
        let _guard = self.accounts_lock.lock().await;
        let mut accounts = self.load_accounts_strict().await?;
        if accounts.iter().any(|a| *a.username == *username) {
            info!("refusing to register \"{username}\": username taken");
            return Err(AccountError::DuplicateUsername);
        }
        accounts.push(
            Account {
                username: username.to_owned(),
                password: password.to_owned(),
            }
        );
        self.store
            .set_json(ACCOUNTS_KEY, &accounts)
            .await
            .map_err(AccountError::StorageUnavailable)?;
        info!("registered user \"{username}\"");
        Ok(())
    }

    async fn authenticate(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> Result<(), AccountError> {
        debug!("authenticating user \"{username}\"");
        let accounts = self.load_accounts_strict().await?;
        if !accounts.iter().any(|a| a.matches(username, password)) {
            info!("failed login attempt for \"{username}\"");
            return Err(AccountError::InvalidCredentials);
        }
        self.set_session(username).await?;
        info!("user \"{username}\" logged in");
        Ok(())
    }

    async fn verify_credentials(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> bool {
        debug!("verifying credentials of \"{username}\"");
        self.load_accounts()
            .await
            .unwrap_or_degraded("account list")
            .iter()
            .any(|a| a.matches(username, password))
    }

    async fn switch_session(
        &self,
        username: &UsernameStr,
    ) -> Result<(), AccountError> {
        info!("switching session to \"{username}\"");
        self.set_session(username).await
    }

    async fn current_session(&self) -> Option<UsernameString> {
        self.load_session()
            .await
            .found_or_log("session pointer")
    }

    async fn list_usernames(&self) -> Vec<UsernameString> {
        self.load_accounts()
            .await
            .unwrap_or_degraded("account list")
            .into_iter()
            .map(|a| a.username)
            .collect()
    }

    async fn end_session(&self) {
        info!("ending session");
        if let Err(e) = self.try_end_session().await {
            error!("failed to clear session pointer: {e}");
        }
    }
}
