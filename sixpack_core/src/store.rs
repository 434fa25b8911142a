//! Progress store: the per-user record of completed days.
//!
//! `ProgressStore` mirrors the operations the backend service exposes.
//! `LocalStore` implements it over a JSON file. Every write holds an
//! exclusive lock on a sidecar `progress.json.lock` from load to rename, so
//! overlapping CLI invocations apply their changes one after another.

use crate::program::{day_workout, program_overview};
use crate::types::*;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Operations offered by the progress service
///
/// Content accessors have default implementations backed by the generated
/// program so every store agrees structurally with it.
pub trait ProgressStore {
    /// Register an identity, returning the role it holds
    fn register(&mut self, user: &UserId) -> Result<UserRole>;

    /// Role of a caller; `None` is an anonymous guest
    fn role(&self, user: Option<&UserId>) -> Result<UserRole>;

    /// Completed days with the time each was first marked
    fn completion_log(&self, user: &UserId) -> Result<BTreeMap<u32, DateTime<Utc>>>;

    /// Mark a day complete; marking it again changes nothing
    fn mark_day_complete(&mut self, user: &UserId, day: u32) -> Result<()>;

    /// Clear every completed day
    fn reset_progress(&mut self, user: &UserId) -> Result<()>;

    fn profile(&self, user: &UserId) -> Result<Option<UserProfile>>;

    fn save_profile(&mut self, user: &UserId, profile: UserProfile) -> Result<()>;

    fn completed_days(&self, user: &UserId) -> Result<BTreeSet<u32>> {
        Ok(self.completion_log(user)?.into_keys().collect())
    }

    fn day_progress(&self, user: &UserId, day: u32) -> Result<DayProgress> {
        ensure_day(day)?;
        Ok(DayProgress {
            day_number: day,
            completed: self.completion_log(user)?.contains_key(&day),
        })
    }

    fn program_stats(&self, user: &UserId) -> Result<ProgramStats> {
        let completed_count = self.completed_days(user)?.len() as u32;
        Ok(ProgramStats {
            total_days: PROGRAM_DAYS,
            completed_count,
            remaining_count: PROGRAM_DAYS.saturating_sub(completed_count),
        })
    }

    fn program(&self) -> Result<ProgramOverview> {
        Ok(program_overview())
    }

    fn day(&self, day: u32) -> Result<Day> {
        day_workout(day).map(Day::from).ok_or(Error::InvalidDay(day))
    }

    fn days_range(&self, start: u32, end: u32) -> Result<Vec<Day>> {
        if start > end || !is_valid_day(start) || !is_valid_day(end) {
            return Err(Error::InvalidRange { start, end });
        }
        (start..=end).map(|day| self.day(day)).collect()
    }
}

fn ensure_day(day: u32) -> Result<()> {
    if is_valid_day(day) {
        Ok(())
    } else {
        Err(Error::InvalidDay(day))
    }
}

/// Persisted record for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub role: UserRole,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub completed: BTreeMap<u32, DateTime<Utc>>,
}

/// Everything the local store keeps on disk
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct StoreState {
    #[serde(default)]
    pub users: BTreeMap<UserId, UserRecord>,
}

impl StoreState {
    /// Load store state from a file with shared locking
    ///
    /// Returns empty state if the file doesn't exist. A file that exists but
    /// cannot be parsed is an error, so that a later write never replaces
    /// progress we failed to read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No store file at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let state = serde_json::from_str::<StoreState>(&contents).map_err(|e| {
            tracing::warn!("Failed to parse store file {:?}: {}", path, e);
            Error::Store(format!("corrupt store file {}: {}", path.display(), e))
        })?;

        tracing::debug!("Loaded store with {} users from {:?}", state.users.len(), path);
        Ok(state)
    }

    /// Save store state
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    ///
    /// Callers that loaded the state first must hold the store's write lock.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Store(format!("store path {} has no parent", path.display())))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved store to {:?}", path);
        Ok(())
    }

    fn user_mut(&mut self, user: &UserId) -> Result<&mut UserRecord> {
        self.users.get_mut(user).ok_or(Error::NotAuthenticated)
    }
}

/// File-backed progress store
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub const FILE_NAME: &'static str = "progress.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store living in `progress.json` under a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file that writers lock
    ///
    /// The data file is replaced on every save, so a lock held on it would
    /// not be seen by a writer that opens the new file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Run `f` while holding the exclusive write lock
    fn with_write_lock<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        lock.lock_exclusive()?;
        tracing::debug!("Acquired write lock {:?}", lock_path);

        let result = f();
        let unlocked = lock.unlock();
        let value = result?;
        unlocked?;
        Ok(value)
    }

    /// Load, modify and save back under the write lock
    ///
    /// Nothing is written if `f` fails.
    fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreState) -> Result<T>,
    {
        self.with_write_lock(|| {
            let mut state = StoreState::load(&self.path)?;
            let value = f(&mut state)?;
            state.save(&self.path)?;
            Ok(value)
        })
    }
}

impl ProgressStore for LocalStore {
    fn register(&mut self, user: &UserId) -> Result<UserRole> {
        self.with_write_lock(|| {
            let mut state = StoreState::load(&self.path)?;
            if let Some(record) = state.users.get(user) {
                return Ok(record.role);
            }

            // first identity to register administers the store
            let role = if state.users.is_empty() {
                UserRole::Admin
            } else {
                UserRole::User
            };
            state.users.insert(
                *user,
                UserRecord {
                    role,
                    registered_at: Utc::now(),
                    profile: None,
                    completed: BTreeMap::new(),
                },
            );
            state.save(&self.path)?;

            tracing::info!("Registered user {} as {:?}", user, role);
            Ok(role)
        })
    }

    fn role(&self, user: Option<&UserId>) -> Result<UserRole> {
        let Some(user) = user else {
            return Ok(UserRole::Guest);
        };
        let state = StoreState::load(&self.path)?;
        Ok(state
            .users
            .get(user)
            .map(|record| record.role)
            .unwrap_or(UserRole::Guest))
    }

    fn completion_log(&self, user: &UserId) -> Result<BTreeMap<u32, DateTime<Utc>>> {
        let state = StoreState::load(&self.path)?;
        let Some(record) = state.users.get(user) else {
            return Ok(BTreeMap::new());
        };

        // hand-edited files may carry days outside the program
        Ok(record
            .completed
            .iter()
            .filter(|(day, _)| {
                let valid = is_valid_day(**day);
                if !valid {
                    tracing::warn!(
                        "Ignoring stored day {} for {}: outside the program",
                        day,
                        user
                    );
                }
                valid
            })
            .map(|(day, at)| (*day, *at))
            .collect())
    }

    fn mark_day_complete(&mut self, user: &UserId, day: u32) -> Result<()> {
        ensure_day(day)?;
        self.update(|state| {
            let record = state.user_mut(user)?;
            if record.completed.contains_key(&day) {
                tracing::debug!("Day {} already complete for {}", day, user);
            } else {
                record.completed.insert(day, Utc::now());
                tracing::info!("Marked day {} complete for {}", day, user);
            }
            Ok(())
        })
    }

    fn reset_progress(&mut self, user: &UserId) -> Result<()> {
        self.update(|state| {
            let record = state.user_mut(user)?;
            let cleared = record.completed.len();
            record.completed.clear();
            tracing::info!("Reset progress for {} ({} days cleared)", user, cleared);
            Ok(())
        })
    }

    fn profile(&self, user: &UserId) -> Result<Option<UserProfile>> {
        let state = StoreState::load(&self.path)?;
        Ok(state.users.get(user).and_then(|record| record.profile.clone()))
    }

    fn save_profile(&mut self, user: &UserId, profile: UserProfile) -> Result<()> {
        let name = profile.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidProfile("name must not be empty".into()));
        }
        let profile = UserProfile { name: name.into() };

        self.update(|state| {
            state.user_mut(user)?.profile = Some(profile);
            tracing::info!("Saved profile for {}", user);
            Ok(())
        })
    }
}
