//! Optimistic menu editing against the remote store.
//!
//! The editor holds one business's one menu as an ordered sequence. Every
//! mutating command applies locally first, then persists the ENTIRE
//! sequence in a single whole-list PUT; there is no incremental patch.
//! Entry ids are assigned once at insert and re-used on every later edit.

use uuid::Uuid;

use tablepin_client::{PinStoreClient, StoreError};
use tablepin_core::{MenuEntry, MenuKind};
use thiserror::Error;

use crate::command::{InsertPosition, ItemDraft, MenuCommand};

#[derive(Debug, Error)]
pub enum MenuError {
    /// The fetch or persist failed. The local sequence is restored
    /// (Rollback) or kept (KeepLocal) per the editor's recovery policy.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Client-side validation failed; the operation was blocked before any
    /// local mutation or network call.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("index {index} is out of bounds for a menu of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("entry at index {index} is a {found}, expected a {expected}")]
    WrongEntryKind {
        index: usize,
        found: &'static str,
        expected: &'static str,
    },
}

/// What happens to the optimistic local mutation when the persist fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Restore the pre-mutation sequence. The default: the visible list
    /// never drifts from what the store last confirmed.
    #[default]
    Rollback,
    /// Keep the local mutation despite the failed persist. Matches the
    /// historical client behavior; the list is then ahead of the store
    /// until a later persist succeeds.
    KeepLocal,
}

/// Editor over one business's one menu.
///
/// Mutations take `&mut self`, so one editor can never overlap two persists:
/// each command runs optimistic-apply → persist → recover to completion
/// before the next starts. Writers in other sessions race under the store's
/// last-writer-wins; nothing here reconciles that.
pub struct MenuEditor<'a> {
    store: &'a PinStoreClient,
    business_id: String,
    kind: MenuKind,
    entries: Vec<MenuEntry>,
    recovery: RecoveryPolicy,
}

impl<'a> MenuEditor<'a> {
    /// Fetches the named menu of one business and wraps it for editing.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Store`] when the record cannot be fetched; the
    /// caller decides how to surface the empty state.
    pub async fn load(
        store: &'a PinStoreClient,
        business_id: &str,
        kind: MenuKind,
    ) -> Result<Self, MenuError> {
        let record = store.get_pin(business_id).await?;
        Ok(Self {
            store,
            business_id: business_id.to_string(),
            kind,
            entries: record.menu(kind).to_vec(),
            recovery: RecoveryPolicy::default(),
        })
    }

    /// Wraps an already-fetched record for editing — for callers that
    /// fetched the record anyway, e.g. to evaluate the permission gate.
    #[must_use]
    pub fn from_record(
        store: &'a PinStoreClient,
        record: &tablepin_core::BusinessRecord,
        kind: MenuKind,
    ) -> Self {
        Self {
            store,
            business_id: record.id.clone(),
            kind,
            entries: record.menu(kind).to_vec(),
            recovery: RecoveryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    /// The current local sequence, in display order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    /// Applies one mutating command: validate, splice the local sequence,
    /// then persist the whole list.
    ///
    /// # Errors
    ///
    /// - [`MenuError::Validation`] / [`MenuError::IndexOutOfBounds`] /
    ///   [`MenuError::WrongEntryKind`] — rejected before any mutation or
    ///   network call.
    /// - [`MenuError::Store`] — the persist failed; the local sequence was
    ///   recovered per [`RecoveryPolicy`].
    pub async fn apply(&mut self, command: MenuCommand) -> Result<(), MenuError> {
        let snapshot = self.entries.clone();
        self.apply_local(command)?;

        match self
            .store
            .replace_menu(&self.business_id, self.kind, &self.entries)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(
                    business = %self.business_id,
                    menu = %self.kind,
                    error = %e,
                    policy = ?self.recovery,
                    "menu persist failed"
                );
                if self.recovery == RecoveryPolicy::Rollback {
                    self.entries = snapshot;
                }
                Err(MenuError::Store(e))
            }
        }
    }

    /// The optimistic half: validates and splices without touching the
    /// network.
    fn apply_local(&mut self, command: MenuCommand) -> Result<(), MenuError> {
        match command {
            MenuCommand::InsertItem { draft, at } => {
                let valid = draft.validate()?;
                let entry = MenuEntry::Item {
                    id: fresh_id(),
                    name: valid.name,
                    price: valid.price,
                    description: valid.description,
                };
                self.insert(entry, at);
            }
            MenuCommand::InsertHeader { title, at } => {
                let title = validated_title(&title)?;
                let entry = MenuEntry::Header {
                    id: fresh_id(),
                    title,
                };
                self.insert(entry, at);
            }
            MenuCommand::EditItem { index, fields } => {
                let valid = fields.validate()?;
                let entry = self.entry_mut(index)?;
                match entry {
                    MenuEntry::Item { id, .. } => {
                        // The id survives the edit untouched.
                        let id = id.clone();
                        *entry = MenuEntry::Item {
                            id,
                            name: valid.name,
                            price: valid.price,
                            description: valid.description,
                        };
                    }
                    MenuEntry::Header { .. } => {
                        return Err(MenuError::WrongEntryKind {
                            index,
                            found: "header",
                            expected: "item",
                        });
                    }
                }
            }
            MenuCommand::EditHeader { index, title } => {
                let new_title = validated_title(&title)?;
                let entry = self.entry_mut(index)?;
                match entry {
                    MenuEntry::Header { title, .. } => *title = new_title,
                    MenuEntry::Item { .. } => {
                        return Err(MenuError::WrongEntryKind {
                            index,
                            found: "item",
                            expected: "header",
                        });
                    }
                }
            }
            MenuCommand::Delete { index } => {
                if index >= self.entries.len() {
                    return Err(MenuError::IndexOutOfBounds {
                        index,
                        len: self.entries.len(),
                    });
                }
                self.entries.remove(index);
            }
        }
        Ok(())
    }

    fn insert(&mut self, entry: MenuEntry, at: InsertPosition) {
        let index = at.resolve(self.entries.len());
        self.entries.insert(index, entry);
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut MenuEntry, MenuError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(MenuError::IndexOutOfBounds { index, len })
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn validated_title(title: &str) -> Result<String, MenuError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(MenuError::Validation(
            "header title must not be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

// Convenience constructors for the common operations, mirroring the
// command union one-to-one.
impl MenuEditor<'_> {
    /// # Errors
    ///
    /// See [`MenuEditor::apply`].
    pub async fn insert_item(
        &mut self,
        draft: ItemDraft,
        at: InsertPosition,
    ) -> Result<(), MenuError> {
        self.apply(MenuCommand::InsertItem { draft, at }).await
    }

    /// # Errors
    ///
    /// See [`MenuEditor::apply`].
    pub async fn insert_header(
        &mut self,
        title: impl Into<String>,
        at: InsertPosition,
    ) -> Result<(), MenuError> {
        self.apply(MenuCommand::InsertHeader {
            title: title.into(),
            at,
        })
        .await
    }

    /// # Errors
    ///
    /// See [`MenuEditor::apply`].
    pub async fn edit_item(&mut self, index: usize, fields: ItemDraft) -> Result<(), MenuError> {
        self.apply(MenuCommand::EditItem { index, fields }).await
    }

    /// # Errors
    ///
    /// See [`MenuEditor::apply`].
    pub async fn edit_header(
        &mut self,
        index: usize,
        title: impl Into<String>,
    ) -> Result<(), MenuError> {
        self.apply(MenuCommand::EditHeader {
            index,
            title: title.into(),
        })
        .await
    }

    /// # Errors
    ///
    /// See [`MenuEditor::apply`].
    pub async fn delete_entry(&mut self, index: usize) -> Result<(), MenuError> {
        self.apply(MenuCommand::Delete { index }).await
    }
}
