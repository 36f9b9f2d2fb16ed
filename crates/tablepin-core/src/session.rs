//! Per-session context passed explicitly into components.
//!
//! Created at session start and handed by reference to whatever needs it;
//! there is no ambient global user state.

use crate::business::BusinessRecord;
use crate::geo::Coordinates;
use crate::users::Role;

/// The acting user's identity and location for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub user_id: Option<String>,
    pub role: Role,
    pub location: Option<Coordinates>,
}

impl SessionContext {
    /// A signed-out session: no identity, no location, base role.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: Role::User,
            location: None,
        }
    }

    #[must_use]
    pub fn signed_in(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: Some(user_id.into()),
            role,
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }

    /// Menu-edit permission gate: the acting user must be the business's
    /// creator, or hold the admin role. Reads are unrestricted; callers
    /// MUST check this before exposing any mutating menu operation.
    #[must_use]
    pub fn can_edit_menu(&self, record: &BusinessRecord) -> bool {
        if self.role == Role::Admin {
            return true;
        }
        match (&self.user_id, &record.creator) {
            (Some(user), Some(creator)) => user == creator,
            _ => false,
        }
    }
}
