//! Reassignment flow: move a stored entry into a different category.
//!
//! There is no server-held session. The whole interaction state lives in the
//! action token round-tripped through the transport (the bot carried it as
//! callback data on inline buttons), so every step is idempotent and
//! replay-safe. The price is that ownership must be re-verified on every
//! step: the embedded entry id alone is never trusted.

use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use crate::category::CategoryRegistry;
use crate::error::{BrainDumpError, Result};
use crate::store::Store;

const TOKEN_PREFIX: &str = "recat";
const PICK_TAG: &str = "pick";
const CANCEL_TAG: &str = "cancel";

// ============================================================================
// Action Token
// ============================================================================

/// What a button press refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Select(String),
    Cancel,
}

/// Opaque reference encoding `(entry_id, choice)`.
///
/// Wire format: `recat:<uuid>:pick:<category>` or `recat:<uuid>:cancel`.
/// Category names may contain any character including `:`; the name is
/// always the final, greedy segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionToken {
    pub entry_id: Uuid,
    pub choice: Choice,
}

impl ActionToken {
    pub fn select(entry_id: Uuid, category: &str) -> Self {
        Self {
            entry_id,
            choice: Choice::Select(category.to_string()),
        }
    }

    pub fn cancel(entry_id: Uuid) -> Self {
        Self {
            entry_id,
            choice: Choice::Cancel,
        }
    }

    pub fn encode(&self) -> String {
        match &self.choice {
            Choice::Select(name) => {
                format!("{TOKEN_PREFIX}:{}:{PICK_TAG}:{name}", self.entry_id)
            }
            Choice::Cancel => format!("{TOKEN_PREFIX}:{}:{CANCEL_TAG}", self.entry_id),
        }
    }

    pub fn decode(raw: &str) -> Result<Self> {
        let bad = || BrainDumpError::BadToken {
            token: raw.to_string(),
        };

        let mut parts = raw.splitn(4, ':');
        if parts.next() != Some(TOKEN_PREFIX) {
            return Err(bad());
        }
        let entry_id = parts
            .next()
            .and_then(|s| Uuid::from_str(s).ok())
            .ok_or_else(bad)?;
        let choice = match (parts.next(), parts.next()) {
            (Some(PICK_TAG), Some(name)) if !name.is_empty() => Choice::Select(name.to_string()),
            (Some(CANCEL_TAG), None) => Choice::Cancel,
            _ => return Err(bad()),
        };
        Ok(Self { entry_id, choice })
    }
}

// ============================================================================
// Flow
// ============================================================================

/// The category choices offered for one entry.
#[derive(Debug, Clone)]
pub struct ReassignmentPrompt {
    pub entry_id: Uuid,
    /// `(category name, select token)` in merged-view order.
    pub options: Vec<(String, ActionToken)>,
    pub cancel: ActionToken,
}

/// Terminal result of resolving a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reassigned(String),
    Cancelled,
}

/// Drives the pick-a-new-category interaction over the shared store.
pub struct ReassignmentFlow {
    store: Arc<Store>,
    registry: Arc<CategoryRegistry>,
}

impl ReassignmentFlow {
    pub fn new(store: Arc<Store>, registry: Arc<CategoryRegistry>) -> Self {
        Self { store, registry }
    }

    /// Start the flow for one entry: list the requester's categories, each
    /// paired with a ready-to-send token.
    ///
    /// Fails with `EntryNotFound`/`NotEntryOwner` when the entry is gone or
    /// belongs to someone else; the boundary turns both into silence.
    pub fn begin(&self, requester: &str, entry_id: Uuid) -> Result<ReassignmentPrompt> {
        self.owned_entry(requester, entry_id)?;

        let options = self
            .registry
            .merged(requester)
            .into_iter()
            .map(|cat| {
                let token = ActionToken::select(entry_id, &cat.name);
                (cat.name, token)
            })
            .collect();

        Ok(ReassignmentPrompt {
            entry_id,
            options,
            cancel: ActionToken::cancel(entry_id),
        })
    }

    /// Resolve a token: apply the selection or acknowledge the cancel.
    ///
    /// Ownership is checked again here, not assumed from `begin`; no state
    /// connects the two calls. A replayed token re-applies the same category
    /// and is harmless. Categories are never deleted, so a selected name
    /// failing the registry check should be unreachable; it is still
    /// rejected rather than written through.
    pub fn resolve(&self, requester: &str, token: &ActionToken) -> Result<Outcome> {
        self.owned_entry(requester, token.entry_id)?;

        match &token.choice {
            Choice::Cancel => Ok(Outcome::Cancelled),
            Choice::Select(name) => {
                if !self.registry.contains(requester, name) {
                    return Err(BrainDumpError::CategoryNotFound { name: name.clone() });
                }
                self.store.set_category(token.entry_id, name)?;
                Ok(Outcome::Reassigned(name.clone()))
            }
        }
    }

    fn owned_entry(&self, requester: &str, entry_id: Uuid) -> Result<()> {
        let entry = self
            .store
            .get_entry(entry_id)
            .ok_or(BrainDumpError::EntryNotFound { id: entry_id })?;
        if entry.owner != requester {
            return Err(BrainDumpError::NotEntryOwner);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn flow() -> (TempDir, Arc<Store>, Arc<CategoryRegistry>, ReassignmentFlow) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(Store::open(dir.path()).unwrap());
        let registry = Arc::new(CategoryRegistry::new(store.clone()));
        let f = ReassignmentFlow::new(store.clone(), registry.clone());
        (dir, store, registry, f)
    }

    fn seed_entry(store: &Store, owner: &str) -> Uuid {
        store
            .insert_entry(owner, "todo buy milk", "Tasks", Utc::now())
            .unwrap()
            .id
    }

    #[test]
    fn test_token_roundtrip_select() {
        let id = Uuid::new_v4();
        let token = ActionToken::select(id, "Tasks");
        assert_eq!(ActionToken::decode(&token.encode()).unwrap(), token);
    }

    #[test]
    fn test_token_roundtrip_awkward_names() {
        let id = Uuid::new_v4();
        for name in ["My Todo", "a:b:c", "日記", "-"] {
            let token = ActionToken::select(id, name);
            assert_eq!(ActionToken::decode(&token.encode()).unwrap(), token);
        }
    }

    #[test]
    fn test_token_roundtrip_cancel() {
        let id = Uuid::new_v4();
        let token = ActionToken::cancel(id);
        assert_eq!(ActionToken::decode(&token.encode()).unwrap(), token);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for raw in [
            "",
            "recat",
            "recat:",
            "recat:not-a-uuid:cancel",
            "other:6a0f2ad9-5f0c-4e57-9a2f-000000000000:cancel",
            "recat:6a0f2ad9-5f0c-4e57-9a2f-000000000000",
            "recat:6a0f2ad9-5f0c-4e57-9a2f-000000000000:pick:",
            "recat:6a0f2ad9-5f0c-4e57-9a2f-000000000000:nonsense",
        ] {
            assert!(
                matches!(
                    ActionToken::decode(raw),
                    Err(BrainDumpError::BadToken { .. })
                ),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_begin_lists_merged_categories_in_order() {
        let (_dir, store, registry, flow) = flow();
        let id = seed_entry(&store, "alice");
        registry.define("alice", "Recipes", &["cook".to_string()]).unwrap();

        let prompt = flow.begin("alice", id).unwrap();
        let names: Vec<_> = prompt.options.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Tasks", "Ideas", "Journal", "Quotes", "Recipes"]);
        assert_eq!(prompt.cancel, ActionToken::cancel(id));
    }

    #[test]
    fn test_begin_missing_entry() {
        let (_dir, _store, _registry, flow) = flow();
        let err = flow.begin("alice", Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, BrainDumpError::EntryNotFound { .. }));
    }

    #[test]
    fn test_begin_foreign_entry() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");
        let err = flow.begin("mallory", id).unwrap_err();
        assert!(matches!(err, BrainDumpError::NotEntryOwner));
    }

    #[test]
    fn test_resolve_select_updates_category() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");

        let outcome = flow
            .resolve("alice", &ActionToken::select(id, "Ideas"))
            .unwrap();
        assert_eq!(outcome, Outcome::Reassigned("Ideas".to_string()));
        assert_eq!(store.get_entry(id).unwrap().category, "Ideas");
    }

    #[test]
    fn test_resolve_by_non_owner_leaves_entry_unchanged() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");

        let err = flow
            .resolve("mallory", &ActionToken::select(id, "Ideas"))
            .unwrap_err();
        assert!(matches!(err, BrainDumpError::NotEntryOwner));
        assert_eq!(store.get_entry(id).unwrap().category, "Tasks");
    }

    #[test]
    fn test_resolve_cancel_mutates_nothing() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");

        let outcome = flow.resolve("alice", &ActionToken::cancel(id)).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(store.get_entry(id).unwrap().category, "Tasks");
    }

    #[test]
    fn test_resolve_unknown_category_is_rejected() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");

        let err = flow
            .resolve("alice", &ActionToken::select(id, "Nope"))
            .unwrap_err();
        assert!(matches!(err, BrainDumpError::CategoryNotFound { .. }));
        assert_eq!(store.get_entry(id).unwrap().category, "Tasks");
    }

    #[test]
    fn test_replayed_token_is_harmless() {
        let (_dir, store, _registry, flow) = flow();
        let id = seed_entry(&store, "alice");
        let token = ActionToken::select(id, "Ideas");

        flow.resolve("alice", &token).unwrap();
        flow.resolve("alice", &token).unwrap();
        assert_eq!(store.get_entry(id).unwrap().category, "Ideas");
    }

    #[test]
    fn test_stale_prompt_still_works_later() {
        // No timeout: a token minted before other activity still resolves.
        let (_dir, store, registry, flow) = flow();
        let id = seed_entry(&store, "alice");
        let prompt = flow.begin("alice", id).unwrap();

        registry.define("alice", "Recipes", &["cook".to_string()]).unwrap();
        seed_entry(&store, "alice");

        let (_, token) = &prompt.options[1];
        assert_eq!(
            flow.resolve("alice", token).unwrap(),
            Outcome::Reassigned("Ideas".to_string())
        );
    }
}
