//! Placeholder data and the seeding orchestration.
//!
//! Seeding hashes the placeholder passwords with bcrypt and hands every row to
//! the seed repository in one batch. Invoice identifiers are derived from the
//! invoice's content, so running the seeder twice inserts nothing new.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;
use uuid::{Uuid, uuid};

use crate::domain::ports::{SeedCounts, SeedData, SeedRepository, SeedRepositoryError, SeedUser};
use crate::domain::{
    Cents, Customer, CustomerId, InvoiceId, InvoiceRecord, InvoiceStatus, PasswordHash, Revenue,
    UserId,
};

/// bcrypt work factor used for seeded passwords.
pub const SEED_BCRYPT_COST: u32 = 10;

const INVOICE_NAMESPACE: Uuid = uuid!("6f1d2c9a-4b53-5e0e-9b7a-3c1f0e2d8a41");

struct PlaceholderUser {
    id: Uuid,
    name: &'static str,
    email: &'static str,
    password: &'static str,
}

static USERS: [PlaceholderUser; 1] = [PlaceholderUser {
    id: uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

static CUSTOMERS: [(Uuid, &str, &str, &str); 6] = [
    (
        uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa"),
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a"),
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a"),
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2"),
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9"),
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb"),
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

/// (customer index, cents, status, date)
static INVOICES: [(usize, i32, &str, &str); 13] = [
    (0, 15_795, "pending", "2022-12-06"),
    (1, 20_348, "pending", "2022-11-14"),
    (4, 3_040, "paid", "2022-10-29"),
    (3, 44_800, "paid", "2023-09-10"),
    (5, 34_577, "pending", "2023-08-05"),
    (2, 54_246, "pending", "2023-07-16"),
    (0, 666, "pending", "2023-06-27"),
    (3, 32_545, "paid", "2023-06-09"),
    (4, 1_250, "paid", "2023-06-17"),
    (5, 8_546, "paid", "2023-06-07"),
    (1, 500, "paid", "2023-08-19"),
    (5, 8_945, "paid", "2023-06-03"),
    (2, 1_000, "paid", "2022-06-05"),
];

static REVENUE: [(&str, i32); 12] = [
    ("Jan", 2_000),
    ("Feb", 1_800),
    ("Mar", 2_200),
    ("Apr", 2_500),
    ("May", 2_300),
    ("Jun", 3_200),
    ("Jul", 3_500),
    ("Aug", 3_700),
    ("Sep", 2_500),
    ("Oct", 2_800),
    ("Nov", 3_000),
    ("Dec", 4_800),
];

/// Errors raised while preparing or applying placeholder data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A placeholder row failed to convert into a domain record.
    #[error("invalid placeholder data: {0}")]
    Placeholder(String),
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    /// The blocking hashing task panicked or was cancelled.
    #[error("password hashing task failed: {0}")]
    HashTask(String),
    /// Persistence adapter failed while seeding.
    #[error("seed persistence error: {0}")]
    Persistence(#[from] SeedRepositoryError),
}

/// Placeholder customers.
#[must_use]
pub fn placeholder_customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|(id, name, email, image_url)| Customer {
            id: CustomerId::from_uuid(*id),
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            image_url: (*image_url).to_owned(),
        })
        .collect()
}

/// Placeholder invoices with content-derived identifiers.
///
/// # Errors
///
/// Returns [`SeedError::Placeholder`] if a placeholder row is malformed.
pub fn placeholder_invoices() -> Result<Vec<InvoiceRecord>, SeedError> {
    INVOICES
        .iter()
        .map(|(customer, cents, status, date)| {
            let (customer_id, ..) = CUSTOMERS
                .get(*customer)
                .ok_or_else(|| SeedError::Placeholder(format!("no customer #{customer}")))?;
            let status: InvoiceStatus = status
                .parse()
                .map_err(|err| SeedError::Placeholder(format!("{err}")))?;
            let date = date
                .parse::<NaiveDate>()
                .map_err(|err| SeedError::Placeholder(format!("bad date {date}: {err}")))?;
            let key = format!("{customer_id}|{cents}|{status}|{date}");
            Ok(InvoiceRecord {
                id: InvoiceId::from_uuid(Uuid::new_v5(&INVOICE_NAMESPACE, key.as_bytes())),
                customer_id: CustomerId::from_uuid(*customer_id),
                amount: Cents::new(*cents),
                status,
                date,
            })
        })
        .collect()
}

/// Placeholder monthly revenue.
#[must_use]
pub fn placeholder_revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|(month, revenue)| Revenue {
            month: (*month).to_owned(),
            revenue: *revenue,
        })
        .collect()
}

/// Service that loads the placeholder data set.
#[derive(Clone)]
pub struct Seeder<R> {
    repository: Arc<R>,
    bcrypt_cost: u32,
}

impl<R> Seeder<R> {
    /// Create a seeder hashing passwords at [`SEED_BCRYPT_COST`].
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            bcrypt_cost: SEED_BCRYPT_COST,
        }
    }

    /// Override the bcrypt work factor.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl<R> Seeder<R>
where
    R: SeedRepository,
{
    /// Build the placeholder data set and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when placeholder conversion, hashing, or
    /// persistence fails.
    pub async fn seed_placeholders(&self) -> Result<SeedCounts, SeedError> {
        let data = SeedData {
            users: self.hash_users().await?,
            customers: placeholder_customers(),
            invoices: placeholder_invoices()?,
            revenue: placeholder_revenue(),
        };

        let counts = self.repository.seed(&data).await?;
        info!(
            users = counts.users,
            customers = counts.customers,
            invoices = counts.invoices,
            revenue = counts.revenue,
            "placeholder data seeded"
        );
        Ok(counts)
    }

    async fn hash_users(&self) -> Result<Vec<SeedUser>, SeedError> {
        let cost = self.bcrypt_cost;
        let hashes = tokio::task::spawn_blocking(move || {
            USERS
                .iter()
                .map(|user| bcrypt::hash(user.password, cost))
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|err| SeedError::HashTask(err.to_string()))??;

        Ok(USERS
            .iter()
            .zip(hashes)
            .map(|(user, hash)| SeedUser {
                id: UserId::from_uuid(user.id),
                name: user.name.to_owned(),
                email: user.email.to_owned(),
                password_hash: PasswordHash::new(hash),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockSeedRepository;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn invoice_ids_are_stable_and_unique() {
        let first = placeholder_invoices().expect("placeholders are valid");
        let second = placeholder_invoices().expect("placeholders are valid");
        assert_eq!(first, second);

        let ids: HashSet<_> = first.iter().map(|invoice| invoice.id).collect();
        assert_eq!(ids.len(), INVOICES.len());
    }

    #[rstest]
    fn invoices_reference_placeholder_customers() {
        let customers: HashSet<_> = placeholder_customers().into_iter().map(|c| c.id).collect();
        let invoices = placeholder_invoices().expect("placeholders are valid");
        assert!(invoices.iter().all(|invoice| customers.contains(&invoice.customer_id)));
    }

    #[rstest]
    fn revenue_months_are_unique_short_labels() {
        let revenue = placeholder_revenue();
        let months: HashSet<_> = revenue.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months.len(), 12);
        assert!(revenue.iter().all(|r| r.month.len() <= 4));
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_hashes_passwords_before_persisting() {
        let mut repository = MockSeedRepository::new();
        repository
            .expect_seed()
            .withf(|data| {
                data.users.len() == 1
                    && data.customers.len() == 6
                    && data.invoices.len() == 13
                    && data.revenue.len() == 12
                    && data.users.iter().all(|user| {
                        bcrypt::verify("123456", user.password_hash.as_str()).unwrap_or(false)
                    })
            })
            .times(1)
            .return_once(|_| {
                Ok(SeedCounts {
                    users: 1,
                    customers: 6,
                    invoices: 13,
                    revenue: 12,
                })
            });

        let seeder = Seeder::new(Arc::new(repository)).with_bcrypt_cost(4);
        let counts = seeder.seed_placeholders().await.expect("seeding succeeds");
        assert_eq!(counts.invoices, 13);
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_failures_are_reported() {
        let mut repository = MockSeedRepository::new();
        repository
            .expect_seed()
            .return_once(|_| Err(SeedRepositoryError::connection("refused")));

        let seeder = Seeder::new(Arc::new(repository)).with_bcrypt_cost(4);
        let err = seeder.seed_placeholders().await.expect_err("seeding fails");
        assert!(matches!(err, SeedError::Persistence(_)));
    }
}
