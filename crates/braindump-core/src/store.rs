//! Single-document JSON store for entries and per-user category profiles.
//!
//! The whole store lives in one `data.json` under the base directory, the
//! same shape the bot kept on disk. Every mutation is a read-modify-write of
//! the full document, so all writes are funneled through one mutex: two
//! concurrent webhook deliveries can otherwise lose an update at the file
//! level. Reads are served from the in-memory copy under the same lock.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::CategoryDef;
use crate::error::{BrainDumpError, Result};

const STORE_FILENAME: &str = "data.json";

/// One stored, categorized piece of submitted text.
///
/// Entries are never deleted by the core; only `category` is ever mutated,
/// and only through reassignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub owner: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub category: String,
}

/// Per-user custom categories, created lazily on first definition.
///
/// `categories` is a Vec, not a map: classification iterates custom
/// categories in insertion order, which a map would not preserve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner: String,
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default)]
    profiles: Vec<UserProfile>,
}

/// File-backed document store with write-through persistence.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl Store {
    /// Open (or create) the store under `base_dir`.
    pub fn open(base_dir: &Path) -> Result<Self> {
        Self::at_path(base_dir.join(STORE_FILENAME))
    }

    /// Open the store at an explicit file path.
    pub fn at_path(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|_| BrainDumpError::CorruptStore { path: path.clone() })?
        } else {
            StoreData::default()
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file (used by export).
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, StoreData> {
        // A poisoned lock only means another thread panicked mid-write; the
        // in-memory data is still a full document, so keep going with it.
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Insert a new entry. The returned id is unique and stable.
    pub fn insert_entry(
        &self,
        owner: &str,
        text: &str,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Entry> {
        let entry = Entry {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            text: text.to_string(),
            created_at,
            category: category.to_string(),
        };
        let mut data = self.lock();
        data.entries.push(entry.clone());
        self.persist(&data)?;
        Ok(entry)
    }

    pub fn get_entry(&self, id: Uuid) -> Option<Entry> {
        self.lock().entries.iter().find(|e| e.id == id).cloned()
    }

    /// Update an entry's category. Ownership checks belong to the caller.
    pub fn set_category(&self, id: Uuid, category: &str) -> Result<()> {
        let mut data = self.lock();
        let entry = data
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(BrainDumpError::EntryNotFound { id })?;
        entry.category = category.to_string();
        self.persist(&data)
    }

    /// All entries of one owner, in creation order.
    pub fn entries_for(&self, owner: &str) -> Vec<Entry> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.owner == owner)
            .cloned()
            .collect()
    }

    /// The owner's custom categories in insertion order; empty if no profile.
    pub fn custom_categories(&self, owner: &str) -> Vec<CategoryDef> {
        self.lock()
            .profiles
            .iter()
            .find(|p| p.owner == owner)
            .map(|p| p.categories.clone())
            .unwrap_or_default()
    }

    /// Insert or replace one custom category for `owner`.
    ///
    /// Redefinition keeps the category's original position and replaces its
    /// keyword list entirely (last-write-wins, no keyword merge).
    pub fn upsert_category(&self, owner: &str, def: CategoryDef) -> Result<()> {
        let mut data = self.lock();
        let idx = match data.profiles.iter().position(|p| p.owner == owner) {
            Some(idx) => idx,
            None => {
                data.profiles.push(UserProfile {
                    owner: owner.to_string(),
                    categories: Vec::new(),
                });
                data.profiles.len() - 1
            }
        };
        let profile = &mut data.profiles[idx];
        match profile.categories.iter().position(|c| c.name == def.name) {
            Some(i) => profile.categories[i] = def,
            None => profile.categories.push(def),
        }
        self.persist(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_insert_and_get_entry() {
        let (_dir, store) = temp_store();
        let entry = store
            .insert_entry("alice", "todo buy milk", "Tasks", Utc::now())
            .unwrap();

        let loaded = store.get_entry(entry.id).unwrap();
        assert_eq!(loaded.owner, "alice");
        assert_eq!(loaded.text, "todo buy milk");
        assert_eq!(loaded.category, "Tasks");
    }

    #[test]
    fn test_get_missing_entry() {
        let (_dir, store) = temp_store();
        assert!(store.get_entry(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_set_category() {
        let (_dir, store) = temp_store();
        let entry = store
            .insert_entry("alice", "todo buy milk", "Tasks", Utc::now())
            .unwrap();

        store.set_category(entry.id, "Ideas").unwrap();
        assert_eq!(store.get_entry(entry.id).unwrap().category, "Ideas");
    }

    #[test]
    fn test_set_category_missing_entry() {
        let (_dir, store) = temp_store();
        let err = store.set_category(Uuid::new_v4(), "Ideas").unwrap_err();
        assert!(matches!(err, BrainDumpError::EntryNotFound { .. }));
    }

    #[test]
    fn test_entries_for_keeps_creation_order() {
        let (_dir, store) = temp_store();
        store.insert_entry("alice", "first", "Unsorted", Utc::now()).unwrap();
        store.insert_entry("bob", "other user", "Unsorted", Utc::now()).unwrap();
        store.insert_entry("alice", "second", "Unsorted", Utc::now()).unwrap();

        let texts: Vec<_> = store
            .entries_for("alice")
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_upsert_category_replaces_in_place() {
        let (_dir, store) = temp_store();
        store
            .upsert_category(
                "alice",
                CategoryDef {
                    name: "Recipes".to_string(),
                    keywords: vec!["cook".to_string()],
                },
            )
            .unwrap();
        store
            .upsert_category(
                "alice",
                CategoryDef {
                    name: "Books".to_string(),
                    keywords: vec!["read".to_string()],
                },
            )
            .unwrap();
        store
            .upsert_category(
                "alice",
                CategoryDef {
                    name: "Recipes".to_string(),
                    keywords: vec!["bake".to_string()],
                },
            )
            .unwrap();

        let cats = store.custom_categories("alice");
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "Recipes");
        assert_eq!(cats[0].keywords, vec!["bake"]);
        assert_eq!(cats[1].name, "Books");
    }

    #[test]
    fn test_profiles_are_per_user() {
        let (_dir, store) = temp_store();
        store
            .upsert_category(
                "alice",
                CategoryDef {
                    name: "Recipes".to_string(),
                    keywords: vec!["cook".to_string()],
                },
            )
            .unwrap();

        assert!(store.custom_categories("bob").is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let id = {
            let store = Store::open(dir.path()).unwrap();
            store
                .insert_entry("alice", "todo buy milk", "Tasks", Utc::now())
                .unwrap()
                .id
        };

        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.get_entry(id).unwrap().category, "Tasks");
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILENAME);
        fs::write(&path, "not json").unwrap();

        let err = Store::at_path(path).unwrap_err();
        assert!(matches!(err, BrainDumpError::CorruptStore { .. }));
    }
}
