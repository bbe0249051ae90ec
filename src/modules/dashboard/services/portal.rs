// Freelancer portal session: one live query over the owning admin's
// sales for this freelancer, feeding the change detector and the
// report summary. Opened by the cross-account lookup; read-only.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::modules::notifications::ChangeDetector;
use crate::modules::reports::models::FreelancerSummary;
use crate::modules::reports::services::ReportService;
use crate::modules::sales::models::Sale;
use crate::modules::sales::repositories::SaleRepository;
use crate::store::{DocumentStore, Subscription};

#[derive(Default)]
struct PortalState {
    sales: Vec<Sale>,
    detector: ChangeDetector,
    sync_error: Option<String>,
}

pub struct PortalSession {
    state: Arc<Mutex<PortalState>>,
    report: ReportService,
    _subscription: Subscription,
}

impl PortalSession {
    pub fn open(
        store: Arc<dyn DocumentStore>,
        admin_id: &str,
        freelancer_name: &str,
        rollup_size: usize,
    ) -> Self {
        let state = Arc::new(Mutex::new(PortalState::default()));

        let on_change = {
            let state = Arc::clone(&state);
            move |snapshot: Vec<Sale>| {
                let mut state = state.lock().expect("portal lock poisoned");
                state.detector.observe(snapshot.clone());
                state.sales = snapshot;
            }
        };

        let on_error = {
            let state = Arc::clone(&state);
            move |err: crate::core::AppError| {
                warn!("portal stream error: {}", err);
                let mut state = state.lock().expect("portal lock poisoned");
                state.sync_error = Some(err.to_string());
            }
        };

        let subscription = SaleRepository::new(store).subscribe_for_freelancer(
            admin_id,
            freelancer_name,
            on_change,
            on_error,
        );

        Self {
            state,
            report: ReportService::new(rollup_size),
            _subscription: subscription,
        }
    }

    /// The freelancer's sales, newest first.
    pub fn sales(&self) -> Vec<Sale> {
        self.state.lock().expect("portal lock poisoned").sales.clone()
    }

    /// Earnings summary over the current snapshot.
    pub fn summary(&self) -> FreelancerSummary {
        let state = self.state.lock().expect("portal lock poisoned");
        self.report.freelancer_summary(&state.sales)
    }

    /// Accumulated notifications, newest first.
    pub fn notifications(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("portal lock poisoned")
            .detector
            .notifications()
            .to_vec()
    }

    pub fn sync_error(&self) -> Option<String> {
        self.state
            .lock()
            .expect("portal lock poisoned")
            .sync_error
            .clone()
    }
}
