// In-process session registry. Tokens are opaque UUIDs handed out at
// sign-in (admin) or lookup (freelancer); freelancer identities are
// read-scoped and never accepted by mutation handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Who a session token belongs to
#[derive(Debug, Clone)]
pub enum Identity {
    Admin {
        account_id: String,
    },

    /// Read-scoped: established by the cross-account lookup, without a
    /// password
    Freelancer {
        admin_id: String,
        freelancer_name: String,
    },
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, Identity>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for the identity.
    pub fn issue(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .insert(token.clone(), identity);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    /// Drop a session. Revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .remove(token);
    }
}
