// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Logged-in user state.
//!
//! The current [`Session`] is an immutable value held by [`SessionContext`]
//! and replaced only through [`SessionContext::update`]. Persistence goes
//! through a [`KeyValueStore`], mirroring the browser's local storage: one
//! JSON value under the `user` key.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{ContaApi, ProfileUpdate};
use crate::error::{ApiError, ValidationError};
use crate::utils::validate_email;

const SESSION_KEY: &str = "user";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "isAuthenticated")]
    pub authenticated: bool,
    pub token: Option<String>,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Keys and values kept in one JSON object on disk. Single writer assumed.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        FileStore { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Read session file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Parse session file {}", self.path.display()))
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create session dir")?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)
            .with_context(|| format!("Write session file {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value.to_string());
        self.write_all(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    map: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

/// Requested profile change. The password pair is only checked when a new
/// password was given.
#[derive(Debug, Clone, Default)]
pub struct ProfileChange {
    pub name: String,
    pub email: String,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ProfileChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("nome"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email"));
        }
        validate_email(&self.email)?;
        if let Some(pw) = self.new_password.as_deref().filter(|p| !p.is_empty()) {
            if self.confirm_password.as_deref() != Some(pw) {
                return Err(ValidationError::PasswordMismatch);
            }
        }
        Ok(())
    }
}

pub struct SessionContext<S: KeyValueStore> {
    store: S,
    current: Session,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Reads the persisted session. A missing or unreadable entry starts
    /// logged out.
    pub fn open(store: S) -> Result<Self> {
        let current = match store.get(SESSION_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable session: {}", e);
                Session::default()
            }),
            None => Session::default(),
        };
        Ok(SessionContext { store, current })
    }

    pub fn session(&self) -> &Session {
        &self.current
    }

    pub fn token(&self) -> Option<&str> {
        self.current
            .token
            .as_deref()
            .filter(|_| self.current.authenticated)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The only way the session changes. Persists the new value, or removes
    /// it when the result is not authenticated.
    pub fn update(&mut self, f: impl FnOnce(&Session) -> Session) -> Result<()> {
        let next = f(&self.current);
        if next.authenticated {
            self.store.set(SESSION_KEY, &serde_json::to_string(&next)?)?;
        } else {
            self.store.remove(SESSION_KEY)?;
        }
        self.current = next;
        Ok(())
    }

    pub fn login<A: ContaApi>(&mut self, api: &A, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email").into());
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyField("senha").into());
        }
        let reply = api.login(email.trim(), password)?;
        tracing::info!("logged in as {}", reply.user.email);
        self.update(|_| Session {
            id: reply.user.id,
            email: reply.user.email,
            name: reply.user.name,
            authenticated: true,
            token: Some(reply.token),
        })
    }

    pub fn logout(&mut self) -> Result<()> {
        self.update(|_| Session::default())
    }

    pub fn update_profile<A: ContaApi>(&mut self, api: &A, change: &ProfileChange) -> Result<()> {
        if !self.current.authenticated {
            return Err(ApiError::Unauthenticated.into());
        }
        change.validate()?;
        api.update_profile(&ProfileUpdate {
            id: self.current.id,
            name: change.name.trim().to_string(),
            email: change.email.trim().to_string(),
            password: change.new_password.clone().filter(|p| !p.is_empty()),
        })?;
        self.update(|s| Session {
            name: change.name.trim().to_string(),
            email: change.email.trim().to_string(),
            ..s.clone()
        })
    }
}
