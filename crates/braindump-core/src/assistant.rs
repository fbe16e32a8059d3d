//! The operations surface the command router calls.
//!
//! `Assistant` wires the registry, classifier, store, and reassignment flow
//! over one shared store. It holds no other state, so it can be constructed
//! fresh against any base directory (one per test, one per process).
//!
//! Transport concerns stay outside: the caller supplies a stable opaque user
//! identity and raw text, and ships the action tokens back and forth.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::category::{CategoryRegistry, Classifier};
use crate::error::{BrainDumpError, Result};
use crate::reassign::{ActionToken, Choice, Outcome, ReassignmentFlow, ReassignmentPrompt};
use crate::store::{Entry, Store};

pub struct Assistant {
    store: Arc<Store>,
    registry: Arc<CategoryRegistry>,
    classifier: Classifier,
    flow: ReassignmentFlow,
}

impl Assistant {
    pub fn new(store: Arc<Store>) -> Self {
        let registry = Arc::new(CategoryRegistry::new(store.clone()));
        let classifier = Classifier::new(registry.clone());
        let flow = ReassignmentFlow::new(store.clone(), registry.clone());
        Self {
            store,
            registry,
            classifier,
            flow,
        }
    }

    /// Open the assistant over the store under `base_dir`.
    pub fn open(base_dir: &Path) -> Result<Self> {
        Ok(Self::new(Arc::new(Store::open(base_dir)?)))
    }

    /// Classify `text` for `owner` and store it as a new entry.
    pub fn classify_and_store(
        &self,
        owner: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Entry> {
        let category = self.classifier.classify(owner, text);
        self.store.insert_entry(owner, text, &category, timestamp)
    }

    /// Default and custom category names, for display.
    pub fn list_categories_for(&self, owner: &str) -> (Vec<String>, Vec<String>) {
        self.registry.list(owner)
    }

    /// Define (or redefine) a custom category from a comma-separated keyword
    /// list, the shape the chat command delivers it in.
    pub fn define_category(&self, owner: &str, name: &str, keywords_csv: &str) -> Result<()> {
        let keywords: Vec<String> = keywords_csv.split(',').map(|k| k.to_string()).collect();
        self.registry.define(owner, name, &keywords)
    }

    /// The owner's entries in creation order.
    pub fn list_entries(&self, owner: &str) -> Vec<Entry> {
        self.store.entries_for(owner)
    }

    pub fn begin_reassignment(&self, owner: &str, entry_id: Uuid) -> Result<ReassignmentPrompt> {
        self.flow.begin(owner, entry_id)
    }

    /// Decode and resolve an action token (selection or cancel).
    pub fn apply_reassignment(&self, owner: &str, raw_token: &str) -> Result<Outcome> {
        let token = ActionToken::decode(raw_token)?;
        self.flow.resolve(owner, &token)
    }

    /// Acknowledge a cancel token. A selection token is rejected here so a
    /// misrouted press can never mutate an entry through the cancel path.
    pub fn cancel_reassignment(&self, owner: &str, raw_token: &str) -> Result<()> {
        let token = ActionToken::decode(raw_token)?;
        if token.choice != Choice::Cancel {
            return Err(BrainDumpError::BadToken {
                token: raw_token.to_string(),
            });
        }
        self.flow.resolve(owner, &token)?;
        Ok(())
    }

    /// Backing store file, for the export command.
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}
