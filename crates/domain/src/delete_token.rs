//! Self-describing delete-button tokens.
//!
//! The button's custom id carries the ids allowed to press it:
//! `AUTHOR_DELETE_BUTTON:111,222`. Checking a press needs nothing but the
//! token itself, so delete buttons keep working after a restart has wiped
//! every live session.

use std::fmt;

use crate::error::MalformedTokenError;
use crate::ids::PrincipalId;
use crate::principals::{AuthorizedPrincipals, Requester};

/// Namespace prefix of every delete-button custom id.
pub const DELETE_CUSTOM_ID: &str = "AUTHOR_DELETE_BUTTON:";

/// Decoded delete-button token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteButtonToken {
    principals: AuthorizedPrincipals,
}

impl DeleteButtonToken {
    pub fn new(principals: AuthorizedPrincipals) -> Self {
        Self { principals }
    }

    /// Decode a component custom id.
    ///
    /// Returns `Ok(None)` when the id is not in our namespace, so callers can
    /// route it elsewhere.
    pub fn parse(raw: &str) -> Result<Option<Self>, MalformedTokenError> {
        let Some(list) = raw.strip_prefix(DELETE_CUSTOM_ID) else {
            return Ok(None);
        };

        let mut ids = Vec::new();
        for part in list.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id = part
                .parse::<PrincipalId>()
                .map_err(|e| MalformedTokenError::new(format!("'{part}' is not an id: {e}")))?;
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(MalformedTokenError::new("no principal ids"));
        }

        Ok(Some(Self::new(AuthorizedPrincipals::new(ids))))
    }

    pub fn principals(&self) -> &AuthorizedPrincipals {
        &self.principals
    }

    pub fn is_authorized(&self, requester_id: PrincipalId, role_ids: &[PrincipalId]) -> bool {
        self.principals.permits(requester_id, role_ids)
    }

    pub fn authorizes(&self, requester: &Requester) -> bool {
        self.principals.permits_requester(requester)
    }

    /// The custom id to attach to the button.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeleteButtonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = self
            .principals
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{DELETE_CUSTOM_ID}{ids}")
    }
}
