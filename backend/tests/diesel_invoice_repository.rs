//! Integration tests for the Diesel invoice adapters against embedded
//! PostgreSQL.
//!
//! Each test gets its own database cloned from a migrated template and loaded
//! with the placeholder data through `DieselSeedRepository`, so the raw search
//! SQL, the status totals and the seed transaction all run for real.
//!
//! # Runtime Strategy
//!
//! Tests stay synchronous and drive a Tokio runtime owned by the context, the
//! same way the other embedded-cluster suites do.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use pagination::{PageNumber, PageWindow, total_pages};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use invoice_dashboard::domain::invoice_form::{FormAction, InvoiceFormInput, validate_invoice};
use invoice_dashboard::domain::ports::{
    CustomerRepository, DashboardQuery, InvoiceRepository, SeedCounts,
};
use invoice_dashboard::domain::seeding::placeholder_invoices;
use invoice_dashboard::domain::{
    DashboardService, INVOICES_PER_PAGE, InvoiceForm, InvoiceId, InvoiceStatus, InvoiceTableRow,
    NewInvoice, Seeder,
};
use invoice_dashboard::outbound::persistence::{
    DbPool, DieselCustomerRepository, DieselInvoiceRepository, DieselRevenueRepository,
    DieselSeedRepository, PoolConfig,
};

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

const DELBA: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
/// Low bcrypt cost keeps seeding fast; the hash format is unchanged.
const TEST_BCRYPT_COST: u32 = 4;

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    invoices: Arc<DieselInvoiceRepository>,
    seeded: SeedCounts,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn seed_again(&self) -> SeedCounts {
        let seeder = Seeder::new(Arc::new(DieselSeedRepository::new(self.pool.clone())))
            .with_bcrypt_cost(TEST_BCRYPT_COST);
        self.runtime
            .block_on(seeder.seed_placeholders())
            .expect("reseed succeeds")
    }

    fn dashboard(
        &self,
    ) -> DashboardService<DieselInvoiceRepository, DieselCustomerRepository, DieselRevenueRepository>
    {
        DashboardService::new(
            self.invoices.clone(),
            Arc::new(DieselCustomerRepository::new(self.pool.clone())),
            Arc::new(DieselRevenueRepository::new(self.pool.clone())),
        )
    }

    /// Every page for `query`, in page order.
    fn all_pages(&self, query: &str) -> Vec<Vec<InvoiceTableRow>> {
        let total = self
            .runtime
            .block_on(self.invoices.count_matching(query))
            .expect("count succeeds");
        let pages = u32::try_from(total_pages(total, INVOICES_PER_PAGE)).expect("page count fits");
        (1..=pages)
            .map(|page| {
                let window =
                    PageWindow::new(PageNumber::new(page).expect("page"), INVOICES_PER_PAGE);
                self.runtime
                    .block_on(self.invoices.search(query, window))
                    .expect("search succeeds")
            })
            .collect()
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;

    let config = PoolConfig::new(database.url())
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let seeder = Seeder::new(Arc::new(DieselSeedRepository::new(pool.clone())))
        .with_bcrypt_cost(TEST_BCRYPT_COST);
    let seeded = runtime
        .block_on(seeder.seed_placeholders())
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        invoices: Arc::new(DieselInvoiceRepository::new(pool.clone())),
        pool,
        seeded,
        _database: database,
    })
}

#[fixture]
fn seeded_db() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn seeding_fills_every_table_once(seeded_db: Option<TestContext>) {
    let Some(ctx) = seeded_db else {
        eprintln!("SKIP-TEST-CLUSTER: seeding_fills_every_table_once skipped");
        return;
    };

    assert_eq!(
        ctx.seeded,
        SeedCounts {
            users: 1,
            customers: 6,
            invoices: 13,
            revenue: 12,
        }
    );
    assert_eq!(ctx.seed_again(), SeedCounts::default());
}

#[rstest]
#[case("", 13, 3)]
#[case("paid", 8, 2)]
#[case("PENDING", 5, 1)]
#[case("lee", 2, 1)]
#[case("2023-06", 5, 1)]
#[case("robinson.com", 2, 1)]
#[case("no such invoice", 0, 0)]
fn pages_partition_the_filtered_set(
    seeded_db: Option<TestContext>,
    #[case] query: &str,
    #[case] expected_total: u64,
    #[case] expected_pages: u64,
) {
    let Some(ctx) = seeded_db else {
        eprintln!("SKIP-TEST-CLUSTER: pages_partition_the_filtered_set skipped");
        return;
    };

    let total = ctx
        .runtime
        .block_on(ctx.invoices.count_matching(query))
        .expect("count succeeds");
    assert_eq!(total, expected_total);
    assert_eq!(total_pages(total, INVOICES_PER_PAGE), expected_pages);

    let pages = ctx.all_pages(query);
    assert!(pages.iter().all(|page| !page.is_empty() && page.len() <= 6));
    let rows: Vec<InvoiceTableRow> = pages.into_iter().flatten().collect();
    assert_eq!(u64::try_from(rows.len()).expect("row count fits"), total);

    let ids: HashSet<InvoiceId> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids.len(), rows.len(), "pages must not overlap");
    assert!(
        rows.windows(2).all(|pair| match pair {
            [newer, older] => newer.date >= older.date,
            _ => true,
        }),
        "rows must be newest first across pages"
    );
}

#[rstest]
fn unfiltered_pages_cover_every_seeded_invoice(seeded_db: Option<TestContext>) {
    let Some(ctx) = seeded_db else {
        eprintln!("SKIP-TEST-CLUSTER: unfiltered_pages_cover_every_seeded_invoice skipped");
        return;
    };

    let listed: HashSet<InvoiceId> = ctx
        .all_pages("")
        .into_iter()
        .flatten()
        .map(|row| row.id)
        .collect();
    let seeded: HashSet<InvoiceId> = placeholder_invoices()
        .expect("placeholders are valid")
        .into_iter()
        .map(|invoice| invoice.id)
        .collect();
    assert_eq!(listed, seeded);

    let past_the_end = PageWindow::new(PageNumber::new(4).expect("page"), INVOICES_PER_PAGE);
    let rows = ctx
        .runtime
        .block_on(ctx.invoices.search("", past_the_end))
        .expect("search succeeds");
    assert!(rows.is_empty());
}

#[rstest]
fn dollar_amounts_survive_storage_and_deletes_are_idempotent(seeded_db: Option<TestContext>) {
    let Some(ctx) = seeded_db else {
        eprintln!(
            "SKIP-TEST-CLUSTER: dollar_amounts_survive_storage_and_deletes_are_idempotent skipped"
        );
        return;
    };

    let input = InvoiceFormInput {
        customer_id: Some(DELBA.to_owned()),
        amount: Some("12.34".to_owned()),
        status: Some("pending".to_owned()),
    };
    let draft = validate_invoice(&input, FormAction::Create).expect("form is valid");
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let repo = ctx.invoices.clone();

    ctx.runtime.block_on(async move {
        let id = repo
            .insert(&NewInvoice::issued_on(draft, date))
            .await
            .expect("insert succeeds");

        let stored = repo
            .find_by_id(&id)
            .await
            .expect("find succeeds")
            .expect("invoice exists");
        assert_eq!(stored.amount.get(), 1_234);
        assert_eq!(stored.date, date);
        let form = InvoiceForm::from(stored);
        assert!((form.amount - 12.34).abs() < 1e-9);

        let newest = repo.latest(1).await.expect("latest succeeds");
        assert_eq!(newest.first().map(|row| row.id), Some(id));

        let paid = validate_invoice(
            &InvoiceFormInput {
                status: Some("paid".to_owned()),
                ..input
            },
            FormAction::Update,
        )
        .expect("form is valid");
        assert!(repo.update(&id, &paid).await.expect("update succeeds"));
        let updated = repo
            .find_by_id(&id)
            .await
            .expect("find succeeds")
            .expect("invoice exists");
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert_eq!(updated.date, date, "updates keep the issue date");

        assert!(repo.delete(&id).await.expect("delete succeeds"));
        assert!(!repo.delete(&id).await.expect("second delete succeeds"));
        assert!(repo.find_by_id(&id).await.expect("find succeeds").is_none());
        assert!(!repo.update(&id, &paid).await.expect("update succeeds"));
    });
}

#[rstest]
fn dashboard_reads_aggregate_the_seeded_data(seeded_db: Option<TestContext>) {
    let Some(ctx) = seeded_db else {
        eprintln!("SKIP-TEST-CLUSTER: dashboard_reads_aggregate_the_seeded_data skipped");
        return;
    };

    let dashboard = ctx.dashboard();
    let (cards, revenue, latest) = ctx.runtime.block_on(async {
        (
            dashboard.card_data().await.expect("cards load"),
            dashboard.revenue().await.expect("revenue loads"),
            dashboard.latest_invoices().await.expect("latest loads"),
        )
    });

    assert_eq!(cards.number_of_invoices, 13);
    assert_eq!(cards.number_of_customers, 6);
    assert_eq!(cards.total_paid_cents, 100_626);
    assert_eq!(cards.total_pending_cents, 125_632);
    assert_eq!(cards.total_paid_invoices, "$1,006.26");
    assert_eq!(cards.total_pending_invoices, "$1,256.32");

    assert_eq!(revenue.len(), 12);
    assert!(
        revenue
            .iter()
            .any(|month| month.month == "Dec" && month.revenue == 4_800)
    );

    let customers = ctx
        .runtime
        .block_on(DieselCustomerRepository::new(ctx.pool.clone()).list_fields())
        .expect("customers load");
    let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Amy Burns",
            "Balazs Orban",
            "Delba de Oliveira",
            "Evil Rabbit",
            "Lee Robinson",
            "Michael Novotny",
        ]
    );

    assert_eq!(latest.len(), 5);
    assert_eq!(
        latest.first().map(|row| row.amount.as_str()),
        Some("$448.00")
    );
}
