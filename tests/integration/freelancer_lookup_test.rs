// Cross-account lookup: the two distinct not-found causes and the
// trim/case rules on the happy path.

use std::sync::Arc;

use rust_decimal_macros::dec;

use reeltally::modules::freelancers::models::Freelancer;
use reeltally::modules::freelancers::repositories::FreelancerRepository;
use reeltally::modules::freelancers::services::{LookupFailure, LookupService};
use reeltally::store::{DocumentStore, MemoryStore};

async fn seed(repo: &FreelancerRepository, first: &str, last: &str, admin: &str) -> String {
    let freelancer = Freelancer::new(
        first.to_string(),
        last.to_string(),
        format!("{}@example.com", first.to_lowercase()),
        dec!(15),
        admin.to_string(),
    )
    .unwrap();
    let token = freelancer.freelancer_id.clone();
    repo.create(&freelancer).await.unwrap();
    token
}

fn service(store: &Arc<dyn DocumentStore>) -> (FreelancerRepository, LookupService) {
    let repo = FreelancerRepository::new(Arc::clone(store));
    let lookup = LookupService::new(FreelancerRepository::new(Arc::clone(store)));
    (repo, lookup)
}

#[tokio::test]
async fn test_unknown_token_is_id_not_found() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (repo, lookup) = service(&store);
    seed(&repo, "Jane", "Doe", "admin-1").await;

    let result = lookup.resolve("Jane Doe", "no-such-token").await;
    assert_eq!(result.unwrap_err(), LookupFailure::IdNotFound);
}

#[tokio::test]
async fn test_valid_token_with_wrong_name_is_name_mismatch() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (repo, lookup) = service(&store);
    let token = seed(&repo, "Jane", "Doe", "admin-1").await;

    let result = lookup.resolve("John Doe", &token).await;
    assert_eq!(result.unwrap_err(), LookupFailure::NameMismatch);
}

#[tokio::test]
async fn test_matching_pair_resolves_the_owning_admin() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (repo, lookup) = service(&store);
    seed(&repo, "Ben", "Ook", "admin-2").await;
    let token = seed(&repo, "Jane", "Doe", "admin-1").await;

    let session = lookup.resolve("Jane Doe", &token).await.unwrap();
    assert_eq!(session.admin_id, "admin-1");
    assert_eq!(session.freelancer_name, "Jane Doe");
}

#[tokio::test]
async fn test_lookup_is_case_insensitive_and_trims_whitespace() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (repo, lookup) = service(&store);
    let token = seed(&repo, "Jane", "Doe", "admin-1").await;

    let padded_token = format!("  {}  ", token);
    let session = lookup.resolve("  jAnE dOe ", &padded_token).await.unwrap();
    assert_eq!(session.admin_id, "admin-1");
    // The session carries the canonical stored name, not the typed one.
    assert_eq!(session.freelancer_name, "Jane Doe");
}
