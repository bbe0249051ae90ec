// Dashboard coordinator: merges the four live collection streams into
// one derived view.
//
// Each stream owns its own last-known snapshot; there is no shared
// cache and no ordering guarantee between streams. Every tick (any
// stream delivering, or a filter change) recomputes the filtered view
// from the owned snapshots, so a sale referencing a client that has not
// arrived yet simply resolves to an empty category until it does.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::modules::clients::models::{Category, Client};
use crate::modules::clients::repositories::{CategoryRepository, ClientRepository};
use crate::modules::freelancers::models::Freelancer;
use crate::modules::freelancers::repositories::FreelancerRepository;
use crate::modules::reports::models::DashboardKpis;
use crate::modules::reports::services::ReportService;
use crate::modules::sales::models::Sale;
use crate::modules::sales::repositories::SaleRepository;
use crate::modules::sales::services::commission::{totals_of, SaleTotals};
use crate::modules::sales::services::SaleFilter;
use crate::store::{DocumentStore, Subscription};

/// The derived view the dashboard renders from
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Sales passing the current filter, newest first
    pub sales: Vec<Sale>,

    /// Table-footer totals over the filtered set
    pub totals: SaleTotals,

    pub kpis: DashboardKpis,

    /// Last subscription failure, if any; streams are not retried
    pub sync_error: Option<String>,
}

#[derive(Default)]
struct CoordinatorState {
    sales: Vec<Sale>,
    clients: Vec<Client>,
    freelancers: Vec<Freelancer>,
    categories: Vec<Category>,
    filter: SaleFilter,
    view: DashboardView,
}

impl CoordinatorState {
    fn recompute(&mut self, report: &ReportService) {
        let filtered = self.filter.apply(&self.sales, &self.clients);
        self.view.totals = totals_of(&filtered);
        self.view.kpis = report.kpis(&filtered);
        self.view.sales = filtered;
    }
}

/// Per-admin-session live dashboard. Dropping the coordinator
/// unsubscribes all four streams.
pub struct DashboardCoordinator {
    state: Arc<Mutex<CoordinatorState>>,
    report: ReportService,
    _subscriptions: Vec<Subscription>,
}

impl DashboardCoordinator {
    pub fn open(store: Arc<dyn DocumentStore>, admin_id: &str, rollup_size: usize) -> Self {
        let state = Arc::new(Mutex::new(CoordinatorState::default()));
        let report = ReportService::new(rollup_size);

        let sales_repo = SaleRepository::new(Arc::clone(&store));
        let client_repo = ClientRepository::new(Arc::clone(&store));
        let freelancer_repo = FreelancerRepository::new(Arc::clone(&store));
        let category_repo = CategoryRepository::new(Arc::clone(&store));

        let subscriptions = vec![
            sales_repo.subscribe(
                admin_id,
                Self::on_tick(&state, &report, |s, sales| s.sales = sales),
                Self::on_stream_error(&state, "sales"),
            ),
            client_repo.subscribe(
                admin_id,
                Self::on_tick(&state, &report, |s, clients| s.clients = clients),
                Self::on_stream_error(&state, "clients"),
            ),
            freelancer_repo.subscribe_for_admin(
                admin_id,
                Self::on_tick(&state, &report, |s, freelancers| {
                    s.freelancers = freelancers
                }),
                Self::on_stream_error(&state, "freelancers"),
            ),
            category_repo.subscribe(
                admin_id,
                Self::on_tick(&state, &report, |s, categories| {
                    s.categories = categories
                }),
                Self::on_stream_error(&state, "categories"),
            ),
        ];

        Self {
            state,
            report,
            _subscriptions: subscriptions,
        }
    }

    /// Build a snapshot callback that replaces one stream's snapshot and
    /// recomputes the derived view.
    fn on_tick<T>(
        state: &Arc<Mutex<CoordinatorState>>,
        report: &ReportService,
        assign: impl Fn(&mut CoordinatorState, Vec<T>) + Send + Sync + 'static,
    ) -> impl Fn(Vec<T>) + Send + Sync + 'static {
        let state = Arc::clone(state);
        let report = report.clone();
        move |snapshot| {
            let mut state = state.lock().expect("coordinator lock poisoned");
            assign(&mut state, snapshot);
            state.recompute(&report);
        }
    }

    /// A failing stream is surfaced on the view; the other streams keep
    /// delivering.
    fn on_stream_error(
        state: &Arc<Mutex<CoordinatorState>>,
        stream: &'static str,
    ) -> impl Fn(crate::core::AppError) + Send + Sync + 'static {
        let state = Arc::clone(state);
        move |err| {
            warn!(stream, "dashboard stream error: {}", err);
            let mut state = state.lock().expect("coordinator lock poisoned");
            state.view.sync_error = Some(format!("{}: {}", stream, err));
        }
    }

    /// Replace the filter and recompute immediately from the owned
    /// snapshots.
    pub fn set_filter(&self, filter: SaleFilter) {
        let mut state = self.state.lock().expect("coordinator lock poisoned");
        state.filter = filter;
        state.recompute(&self.report);
    }

    pub fn view(&self) -> DashboardView {
        self.state
            .lock()
            .expect("coordinator lock poisoned")
            .view
            .clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.state
            .lock()
            .expect("coordinator lock poisoned")
            .clients
            .clone()
    }

    pub fn freelancers(&self) -> Vec<Freelancer> {
        self.state
            .lock()
            .expect("coordinator lock poisoned")
            .freelancers
            .clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state
            .lock()
            .expect("coordinator lock poisoned")
            .categories
            .clone()
    }
}
