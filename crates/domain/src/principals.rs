//! Principals and the ownership check shared by sessions and delete buttons.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::PrincipalId;

/// The user behind an interaction, plus the roles they hold in the guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: PrincipalId,
    #[serde(default)]
    pub role_ids: Vec<PrincipalId>,
}

impl Requester {
    pub fn new(user_id: PrincipalId, role_ids: Vec<PrincipalId>) -> Self {
        Self { user_id, role_ids }
    }

    /// A requester acting without any role grants (e.g. in a DM).
    pub fn user(user_id: PrincipalId) -> Self {
        Self {
            user_id,
            role_ids: Vec::new(),
        }
    }
}

/// Set of user or role ids allowed to drive a message.
///
/// Ordered so the encoded token form is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedPrincipals(BTreeSet<PrincipalId>);

impl AuthorizedPrincipals {
    pub fn new(ids: impl IntoIterator<Item = PrincipalId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn single(id: PrincipalId) -> Self {
        Self::new([id])
    }

    pub fn contains(&self, id: PrincipalId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PrincipalId> + '_ {
        self.0.iter().copied()
    }

    /// True when the user id is listed or any of their roles is.
    pub fn permits(&self, user_id: PrincipalId, role_ids: &[PrincipalId]) -> bool {
        self.contains(user_id) || role_ids.iter().any(|role| self.contains(*role))
    }

    pub fn permits_requester(&self, requester: &Requester) -> bool {
        self.permits(requester.user_id, &requester.role_ids)
    }
}
