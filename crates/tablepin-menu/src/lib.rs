//! Optimistic menu-editing state machine for one business's menu.

mod command;
mod editor;

pub use command::{InsertPosition, ItemDraft, MenuCommand};
pub use editor::{MenuEditor, MenuError, RecoveryPolicy};
