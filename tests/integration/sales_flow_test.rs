// End-to-end ledger flow over the in-process store: client and
// freelancer setup, sale entry with defaulted amount/rate, paid-status
// toggling, and atomic bulk entry.

use std::sync::Arc;

use rust_decimal_macros::dec;

use reeltally::modules::clients::repositories::{CategoryRepository, ClientRepository};
use reeltally::modules::clients::services::{ClientDraft, ClientService};
use reeltally::modules::freelancers::repositories::FreelancerRepository;
use reeltally::modules::freelancers::services::{FreelancerDraft, FreelancerService};
use reeltally::modules::sales::models::SaleStatus;
use reeltally::modules::sales::repositories::SaleRepository;
use reeltally::modules::sales::services::commission::{commission, profit};
use reeltally::modules::sales::services::sale_service::{
    BulkSaleDraft, BulkSaleRow, SaleDraft, SaleService,
};
use reeltally::store::{DocumentStore, MemoryStore};

const ADMIN: &str = "admin-1";

struct Fixture {
    store: Arc<dyn DocumentStore>,
    sales: SaleService,
    clients: ClientService,
    freelancers: FreelancerService,
}

fn fixture() -> Fixture {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    Fixture {
        sales: SaleService::new(
            SaleRepository::new(Arc::clone(&store)),
            ClientRepository::new(Arc::clone(&store)),
            FreelancerRepository::new(Arc::clone(&store)),
        ),
        clients: ClientService::new(
            ClientRepository::new(Arc::clone(&store)),
            CategoryRepository::new(Arc::clone(&store)),
        ),
        freelancers: FreelancerService::new(FreelancerRepository::new(Arc::clone(&store))),
        store,
    }
}

async fn setup_acme_and_jane(fx: &Fixture) -> (String, String) {
    fx.clients
        .add_category(ADMIN, "Corporate".to_string())
        .await
        .unwrap();

    let client_id = fx
        .clients
        .add(
            ADMIN,
            ClientDraft {
                name: "Acme".to_string(),
                price: dec!(500),
                category: Some("Corporate".to_string()),
            },
        )
        .await
        .unwrap();

    let freelancer_id = fx
        .freelancers
        .add(
            ADMIN,
            FreelancerDraft {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                commission: dec!(15),
            },
        )
        .await
        .unwrap();

    (client_id, freelancer_id)
}

#[tokio::test]
async fn test_sale_defaults_copy_from_client_and_freelancer() {
    let fx = fixture();
    let (client_id, freelancer_id) = setup_acme_and_jane(&fx).await;

    fx.sales
        .record(
            ADMIN,
            SaleDraft {
                video_title: "Launch Promo".to_string(),
                client_id,
                freelancer_id,
                sale_amount: None,
                sale_date: "2024-03-15".parse().unwrap(),
            },
        )
        .await
        .unwrap();

    let sales = SaleRepository::new(Arc::clone(&fx.store))
        .list(ADMIN)
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);

    let sale = &sales[0];
    assert_eq!(sale.client_name, "Acme");
    assert_eq!(sale.freelancer_name, "Jane Doe");
    assert_eq!(sale.sale_amount, Some(dec!(500)));
    assert_eq!(sale.commission_rate, Some(dec!(15)));
    assert_eq!(commission(sale), dec!(75.00));
    assert_eq!(profit(sale), dec!(425.00));
    assert_eq!(sale.status, SaleStatus::Unpaid);
    assert!(sale.paid_date.is_none());
}

#[tokio::test]
async fn test_paid_toggle_round_trip() {
    let fx = fixture();
    let (client_id, freelancer_id) = setup_acme_and_jane(&fx).await;

    let sale_id = fx
        .sales
        .record(
            ADMIN,
            SaleDraft {
                video_title: "Launch Promo".to_string(),
                client_id,
                freelancer_id,
                sale_amount: Some(dec!(400)),
                sale_date: "2024-03-15".parse().unwrap(),
            },
        )
        .await
        .unwrap();

    let repo = SaleRepository::new(Arc::clone(&fx.store));

    fx.sales
        .mark_paid(ADMIN, &sale_id, "2024-04-02".parse().unwrap())
        .await
        .unwrap();
    let sale = repo.list(ADMIN).await.unwrap().remove(0);
    assert_eq!(sale.status, SaleStatus::Paid);
    assert_eq!(sale.paid_date, Some("2024-04-02".parse().unwrap()));

    fx.sales.mark_unpaid(ADMIN, &sale_id).await.unwrap();
    let sale = repo.list(ADMIN).await.unwrap().remove(0);
    assert_eq!(sale.status, SaleStatus::Unpaid);
    assert!(sale.paid_date.is_none());
}

#[tokio::test]
async fn test_sale_edit_preserves_paid_status() {
    let fx = fixture();
    let (client_id, freelancer_id) = setup_acme_and_jane(&fx).await;

    let sale_id = fx
        .sales
        .record(
            ADMIN,
            SaleDraft {
                video_title: "Launch Promo".to_string(),
                client_id: client_id.clone(),
                freelancer_id: freelancer_id.clone(),
                sale_amount: None,
                sale_date: "2024-03-15".parse().unwrap(),
            },
        )
        .await
        .unwrap();
    fx.sales
        .mark_paid(ADMIN, &sale_id, "2024-04-02".parse().unwrap())
        .await
        .unwrap();

    fx.sales
        .update(
            ADMIN,
            &sale_id,
            SaleDraft {
                video_title: "Launch Promo (final)".to_string(),
                client_id,
                freelancer_id,
                sale_amount: Some(dec!(650)),
                sale_date: "2024-03-16".parse().unwrap(),
            },
        )
        .await
        .unwrap();

    let sale = SaleRepository::new(Arc::clone(&fx.store))
        .list(ADMIN)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(sale.video_title, "Launch Promo (final)");
    assert_eq!(sale.sale_amount, Some(dec!(650)));
    assert_eq!(sale.status, SaleStatus::Paid);
    assert_eq!(sale.paid_date, Some("2024-04-02".parse().unwrap()));
}

#[tokio::test]
async fn test_bulk_entry_copies_defaults_per_row() {
    let fx = fixture();
    let (client_id, freelancer_id) = setup_acme_and_jane(&fx).await;

    let second_client = fx
        .clients
        .add(
            ADMIN,
            ClientDraft {
                name: "Borealis".to_string(),
                price: dec!(300),
                category: None,
            },
        )
        .await
        .unwrap();

    let ids = fx
        .sales
        .record_bulk(
            ADMIN,
            BulkSaleDraft {
                freelancer_id,
                sale_date: "2024-03-20".parse().unwrap(),
                rows: vec![
                    BulkSaleRow {
                        video_title: "Promo A".to_string(),
                        client_id: client_id.clone(),
                    },
                    BulkSaleRow {
                        video_title: "Promo B".to_string(),
                        client_id: second_client,
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);

    let sales = SaleRepository::new(Arc::clone(&fx.store))
        .list(ADMIN)
        .await
        .unwrap();
    assert_eq!(sales.len(), 2);
    assert!(sales
        .iter()
        .all(|s| s.commission_rate == Some(dec!(15)) && s.status == SaleStatus::Unpaid));

    let acme = sales.iter().find(|s| s.client_name == "Acme").unwrap();
    let borealis = sales.iter().find(|s| s.client_name == "Borealis").unwrap();
    assert_eq!(acme.sale_amount, Some(dec!(500)));
    assert_eq!(borealis.sale_amount, Some(dec!(300)));
}

#[tokio::test]
async fn test_bulk_entry_with_unknown_client_writes_nothing() {
    let fx = fixture();
    let (client_id, freelancer_id) = setup_acme_and_jane(&fx).await;

    let result = fx
        .sales
        .record_bulk(
            ADMIN,
            BulkSaleDraft {
                freelancer_id,
                sale_date: "2024-03-20".parse().unwrap(),
                rows: vec![
                    BulkSaleRow {
                        video_title: "Promo A".to_string(),
                        client_id,
                    },
                    BulkSaleRow {
                        video_title: "Promo B".to_string(),
                        client_id: "missing-client".to_string(),
                    },
                ],
            },
        )
        .await;
    assert!(result.is_err());

    let sales = SaleRepository::new(Arc::clone(&fx.store))
        .list(ADMIN)
        .await
        .unwrap();
    assert!(sales.is_empty());
}

#[tokio::test]
async fn test_duplicate_client_name_is_rejected() {
    let fx = fixture();
    setup_acme_and_jane(&fx).await;

    let result = fx
        .clients
        .add(
            ADMIN,
            ClientDraft {
                name: "Acme".to_string(),
                price: dec!(100),
                category: None,
            },
        )
        .await;
    assert!(result.is_err());
}
