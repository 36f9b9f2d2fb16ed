//! Menu-edit operations as a discriminated union.
//!
//! Callers name the operation and its target explicitly; there is no
//! mutable "current handler" anywhere.

use rust_decimal::Decimal;

use crate::MenuError;

/// Where an insert lands in the ordered sequence.
///
/// `Above(i)` resolves to `i`, `Below(i)` to `i + 1` — the two relative
/// policies offered by the contextual action on an existing entry. Any
/// resolved index past the current end appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Append,
    At(usize),
    Above(usize),
    Below(usize),
}

impl InsertPosition {
    #[must_use]
    pub(crate) fn resolve(self, len: usize) -> usize {
        let index = match self {
            InsertPosition::Append => len,
            InsertPosition::At(i) | InsertPosition::Above(i) => i,
            InsertPosition::Below(i) => i + 1,
        };
        index.min(len)
    }
}

/// User-supplied fields for a new or edited line item, as entered in the
/// form: the price arrives as text and is validated before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
}

/// An `ItemDraft` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidItem {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

impl ItemDraft {
    /// Validates the draft: non-blank name, price parseable as a
    /// non-negative decimal. Runs BEFORE any local mutation or network
    /// call; a failure blocks the whole operation.
    pub(crate) fn validate(&self) -> Result<ValidItem, MenuError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MenuError::Validation(
                "item name must not be empty".to_string(),
            ));
        }

        let raw_price = self.price.trim();
        let price: Decimal = raw_price.parse().map_err(|_| {
            MenuError::Validation(format!("price '{raw_price}' is not a number"))
        })?;
        if price.is_sign_negative() {
            return Err(MenuError::Validation(format!(
                "price '{raw_price}' must not be negative"
            )));
        }

        Ok(ValidItem {
            name: name.to_string(),
            price,
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(ToOwned::to_owned),
        })
    }
}

/// One mutating menu operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    InsertItem {
        draft: ItemDraft,
        at: InsertPosition,
    },
    InsertHeader {
        title: String,
        at: InsertPosition,
    },
    EditItem {
        index: usize,
        fields: ItemDraft,
    },
    EditHeader {
        index: usize,
        title: String,
    },
    /// Removal of the entry at `index`. Interactive callers confirm with
    /// the user before issuing this command.
    Delete {
        index: usize,
    },
}
