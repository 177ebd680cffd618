//! Tests for the invoice services.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use pagination::PageNumber;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    InvoiceRepositoryError, MockCustomerRepository, MockInvoiceRepository,
    MockListingRevalidator,
};
use crate::domain::{
    Cents, CustomerId, ErrorCode, InvoiceDraft, InvoiceRecord, InvoiceStatus, InvoiceTotals,
};

const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

/// In-memory store mirroring the search semantics of the SQL adapter.
#[derive(Default)]
struct MemoryInvoices {
    rows: Mutex<Vec<InvoiceRecord>>,
}

impl MemoryInvoices {
    fn seeded(count: u32) -> Self {
        let customer_id = CustomerId::from_uuid(Uuid::parse_str(CUSTOMER).expect("uuid"));
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        let rows = (0..count)
            .map(|index| InvoiceRecord {
                id: InvoiceId::from_uuid(Uuid::from_u128(u128::from(index) + 1)),
                customer_id,
                amount: Cents::new(i32::try_from(index).expect("small index") * 100 + 1),
                status: if index % 2 == 0 {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::Pending
                },
                // Pairs of invoices share a date to exercise the tiebreaker.
                date: start + chrono::Days::new(u64::from(index / 2)),
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn matching(&self, query: &str) -> Vec<InvoiceRecord> {
        let needle = query.to_lowercase();
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .copied()
            .filter(|row| {
                [
                    "Delba de Oliveira".to_owned(),
                    "delba@oliveira.com".to_owned(),
                    row.amount.get().to_string(),
                    row.date.to_string(),
                    row.status.to_string(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.as_uuid().cmp(a.id.as_uuid())));
        rows
    }

    fn to_row(record: InvoiceRecord) -> InvoiceTableRow {
        InvoiceTableRow {
            id: record.id,
            customer_id: record.customer_id,
            name: "Delba de Oliveira".to_owned(),
            email: "delba@oliveira.com".to_owned(),
            image_url: "/customers/delba-de-oliveira.png".to_owned(),
            date: record.date,
            amount: record.amount.get(),
            status: record.status,
        }
    }
}

#[async_trait]
impl InvoiceRepository for MemoryInvoices {
    async fn insert(&self, invoice: &NewInvoice) -> Result<InvoiceId, InvoiceRepositoryError> {
        let id = InvoiceId::from_uuid(Uuid::new_v4());
        self.rows.lock().expect("rows lock").push(InvoiceRecord {
            id,
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let Some(row) = rows.iter_mut().find(|row| row.id == *id) else {
            return Ok(false);
        };
        row.customer_id = draft.customer_id;
        row.amount = draft.amount;
        row.status = draft.status;
        Ok(true)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<bool, InvoiceRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let before = rows.len();
        rows.retain(|row| row.id != *id);
        Ok(rows.len() != before)
    }

    async fn find_by_id(
        &self,
        id: &InvoiceId,
    ) -> Result<Option<InvoiceRecord>, InvoiceRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|row| row.id == *id).copied())
    }

    async fn latest(&self, limit: i64) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError> {
        let limit = usize::try_from(limit).expect("non-negative limit");
        Ok(self
            .matching("")
            .into_iter()
            .take(limit)
            .map(Self::to_row)
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError> {
        let offset = usize::try_from(window.offset()).expect("offset fits");
        let limit = usize::try_from(window.limit()).expect("limit fits");
        Ok(self
            .matching(query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(Self::to_row)
            .collect())
    }

    async fn count_matching(&self, query: &str) -> Result<u64, InvoiceRepositoryError> {
        Ok(u64::try_from(self.matching(query).len()).expect("count fits"))
    }

    async fn count(&self) -> Result<i64, InvoiceRepositoryError> {
        Ok(i64::try_from(self.rows.lock().expect("rows lock").len()).expect("count fits"))
    }

    async fn totals_by_status(&self) -> Result<InvoiceTotals, InvoiceRepositoryError> {
        Ok(InvoiceTotals::default())
    }
}

fn valid_input(amount: &str, status: &str) -> InvoiceFormInput {
    InvoiceFormInput {
        customer_id: Some(CUSTOMER.to_owned()),
        amount: Some(amount.to_owned()),
        status: Some(status.to_owned()),
    }
}

fn revalidator_expecting(times: usize) -> MockListingRevalidator {
    let mut revalidator = MockListingRevalidator::new();
    revalidator
        .expect_revalidate()
        .withf(|path| path.to_string() == INVOICES_LISTING_PATH)
        .times(times)
        .return_const(());
    revalidator
}

fn command_service<R: InvoiceRepository>(
    invoices: Arc<R>,
    revalidator: MockListingRevalidator,
) -> InvoiceCommandService<R, MockListingRevalidator> {
    InvoiceCommandService::new(invoices, Arc::new(revalidator), Arc::new(FixtureClock))
}

#[fixture]
fn store() -> Arc<MemoryInvoices> {
    Arc::new(MemoryInvoices::default())
}

#[rstest]
#[tokio::test]
async fn create_stores_cents_and_todays_utc_date(store: Arc<MemoryInvoices>) {
    let service = command_service(store.clone(), revalidator_expecting(1));

    let id = service
        .create(&valid_input("12.34", "pending"))
        .await
        .expect("create succeeds");

    let stored = store
        .find_by_id(&id)
        .await
        .expect("lookup succeeds")
        .expect("invoice stored");
    assert_eq!(stored.amount, Cents::new(1_234));
    assert_eq!(stored.status, InvoiceStatus::Pending);
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"));
}

#[rstest]
#[tokio::test]
async fn stored_amount_round_trips_through_the_edit_form(store: Arc<MemoryInvoices>) {
    let commands = command_service(store.clone(), revalidator_expecting(1));
    let id = commands
        .create(&valid_input("12.34", "paid"))
        .await
        .expect("create succeeds");

    let queries = InvoiceQueryService::new(store, Arc::new(MockCustomerRepository::new()));
    let form = queries
        .invoice_by_id(&id)
        .await
        .expect("fetch succeeds")
        .expect("invoice exists");
    assert!((form.amount - 12.34).abs() < f64::EPSILON);
    assert_eq!(form.status, InvoiceStatus::Paid);
}

#[rstest]
#[tokio::test]
async fn invalid_forms_never_reach_the_repository() {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_insert().never();
    repo.expect_update().never();
    let service = command_service(Arc::new(repo), revalidator_expecting(0));

    let err = service
        .create(&valid_input("0", "pending"))
        .await
        .expect_err("zero amount is rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Missing Fields. Failed to Create Invoice.");

    let id = InvoiceId::from_uuid(Uuid::nil());
    let err = service
        .update(&id, &valid_input("5", "overdue"))
        .await
        .expect_err("unknown status is rejected");
    assert_eq!(err.message(), "Missing Fields. Failed to Update Invoice.");
}

#[rstest]
#[tokio::test]
async fn update_keeps_the_original_date(store: Arc<MemoryInvoices>) {
    let service = command_service(store.clone(), revalidator_expecting(2));
    let id = service
        .create(&valid_input("1", "pending"))
        .await
        .expect("create succeeds");

    service
        .update(&id, &valid_input("2.50", "paid"))
        .await
        .expect("update succeeds");

    let stored = store
        .find_by_id(&id)
        .await
        .expect("lookup succeeds")
        .expect("invoice stored");
    assert_eq!(stored.amount, Cents::new(250));
    assert_eq!(stored.status, InvoiceStatus::Paid);
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"));
}

#[rstest]
#[tokio::test]
async fn delete_is_idempotent(store: Arc<MemoryInvoices>) {
    let service = command_service(store.clone(), revalidator_expecting(3));
    let id = service
        .create(&valid_input("1", "pending"))
        .await
        .expect("create succeeds");

    service.delete(&id).await.expect("first delete succeeds");
    assert!(store.find_by_id(&id).await.expect("lookup succeeds").is_none());
    service.delete(&id).await.expect("second delete is a no-op");
}

#[rstest]
#[case::connection(InvoiceRepositoryError::connection("refused"))]
#[case::query(InvoiceRepositoryError::query("constraint violated"))]
#[tokio::test]
async fn write_failures_surface_a_generic_message(#[case] failure: InvoiceRepositoryError) {
    let mut repo = MockInvoiceRepository::new();
    let insert_failure = failure.clone();
    repo.expect_insert()
        .return_once(move |_| Err(insert_failure));
    repo.expect_delete().return_once(move |_| Err(failure));
    let service = command_service(Arc::new(repo), revalidator_expecting(0));

    let err = service
        .create(&valid_input("1", "paid"))
        .await
        .expect_err("insert fails");
    assert_eq!(err.code(), ErrorCode::PersistenceFailed);
    assert_eq!(err.message(), "Database Error: Failed to Create Invoice.");

    let err = service
        .delete(&InvoiceId::from_uuid(Uuid::nil()))
        .await
        .expect_err("delete fails");
    assert_eq!(err.message(), "Database Error: Failed to Delete Invoice.");
}

#[rstest]
#[case("", 13, 3)]
#[case("pending", 13, 1)]
#[case("paid", 13, 2)]
#[case("2023-01-0", 13, 3)]
#[case("no such customer", 13, 0)]
#[case("", 0, 0)]
#[case("", 6, 1)]
#[tokio::test]
async fn page_count_rounds_up_matches(
    #[case] query: &str,
    #[case] seeded: u32,
    #[case] expected_pages: u64,
) {
    let service = InvoiceQueryService::new(
        Arc::new(MemoryInvoices::seeded(seeded)),
        Arc::new(MockCustomerRepository::new()),
    );
    let pages = service.invoice_pages(query).await.expect("count succeeds");
    assert_eq!(pages, expected_pages);
}

#[rstest]
#[case("")]
#[case("PAID")]
#[case("delba")]
#[tokio::test]
async fn pages_partition_the_filtered_set_in_date_order(#[case] query: &str) {
    let store = Arc::new(MemoryInvoices::seeded(17));
    let expected = store.matching(query);
    let service = InvoiceQueryService::new(store, Arc::new(MockCustomerRepository::new()));

    let pages = service.invoice_pages(query).await.expect("count succeeds");
    let mut seen = Vec::new();
    for page in 1..=pages {
        let page = PageNumber::new(u32::try_from(page).expect("page fits")).expect("non-zero");
        let rows = service
            .filtered_invoices(&InvoiceSearch::new(query, page))
            .await
            .expect("search succeeds");
        assert!(rows.len() <= 6);
        seen.extend(rows);
    }

    let unique: HashSet<_> = seen.iter().map(|row| row.id).collect();
    assert_eq!(unique.len(), seen.len(), "pages must not overlap");
    assert_eq!(
        seen.iter().map(|row| row.id).collect::<Vec<_>>(),
        expected.iter().map(|row| row.id).collect::<Vec<_>>()
    );
    assert!(seen.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

#[rstest]
#[tokio::test]
async fn read_failures_name_the_operation() {
    let mut invoices = MockInvoiceRepository::new();
    invoices
        .expect_search()
        .return_once(|_, _| Err(InvoiceRepositoryError::query("syntax error")));
    invoices
        .expect_count_matching()
        .return_once(|_| Err(InvoiceRepositoryError::connection("refused")));
    invoices
        .expect_find_by_id()
        .return_once(|_| Err(InvoiceRepositoryError::query("boom")));
    let mut customers = MockCustomerRepository::new();
    customers.expect_list_fields().return_once(|| {
        Err(crate::domain::ports::CustomerRepositoryError::query("boom"))
    });
    let service = InvoiceQueryService::new(Arc::new(invoices), Arc::new(customers));

    let search = InvoiceSearch::default();
    let cases = [
        (
            service.filtered_invoices(&search).await.map(|_| ()),
            "Failed to fetch invoices.",
        ),
        (
            service.invoice_pages("").await.map(|_| ()),
            "Failed to fetch total number of invoices.",
        ),
        (
            service
                .invoice_by_id(&InvoiceId::from_uuid(Uuid::nil()))
                .await
                .map(|_| ()),
            "Failed to fetch invoice.",
        ),
        (
            service.customers().await.map(|_| ()),
            "Failed to fetch all customers.",
        ),
    ];
    for (result, message) in cases {
        let err = result.expect_err("read fails");
        assert_eq!(err.code(), ErrorCode::FetchFailed);
        assert_eq!(err.message(), message);
    }
}
