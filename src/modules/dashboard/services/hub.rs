// Session hub: live views keyed by session token. An admin session
// lazily gets a dashboard coordinator; a freelancer session gets its
// portal opened eagerly at lookup time so notifications accumulate
// while the report is open. Closing a session drops the view and with
// it the underlying subscriptions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::modules::dashboard::services::coordinator::DashboardCoordinator;
use crate::modules::dashboard::services::portal::PortalSession;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct SessionHub {
    store: Arc<dyn DocumentStore>,
    rollup_size: usize,
    dashboards: Arc<Mutex<HashMap<String, Arc<DashboardCoordinator>>>>,
    portals: Arc<Mutex<HashMap<String, Arc<PortalSession>>>>,
}

impl SessionHub {
    pub fn new(store: Arc<dyn DocumentStore>, rollup_size: usize) -> Self {
        Self {
            store,
            rollup_size,
            dashboards: Arc::new(Mutex::new(HashMap::new())),
            portals: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get or open the live dashboard for an admin session.
    pub fn dashboard(&self, token: &str, admin_id: &str) -> Arc<DashboardCoordinator> {
        let mut dashboards = self.dashboards.lock().expect("hub lock poisoned");
        Arc::clone(dashboards.entry(token.to_string()).or_insert_with(|| {
            Arc::new(DashboardCoordinator::open(
                Arc::clone(&self.store),
                admin_id,
                self.rollup_size,
            ))
        }))
    }

    /// Open the live portal for a freelancer session.
    pub fn open_portal(&self, token: &str, admin_id: &str, freelancer_name: &str) {
        let portal = Arc::new(PortalSession::open(
            Arc::clone(&self.store),
            admin_id,
            freelancer_name,
            self.rollup_size,
        ));
        self.portals
            .lock()
            .expect("hub lock poisoned")
            .insert(token.to_string(), portal);
    }

    pub fn portal(&self, token: &str) -> Option<Arc<PortalSession>> {
        self.portals
            .lock()
            .expect("hub lock poisoned")
            .get(token)
            .cloned()
    }

    /// Drop any live view attached to the token.
    pub fn close(&self, token: &str) {
        self.dashboards
            .lock()
            .expect("hub lock poisoned")
            .remove(token);
        self.portals.lock().expect("hub lock poisoned").remove(token);
    }
}
