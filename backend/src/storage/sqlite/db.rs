use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::storage::sqlite::repositories::{
    ClientRepository, InvoiceRepository, JournalRepository, ProductRepository, SettingsRepository,
};
use crate::storage::traits::Connection;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:facturador.db";

// Bumped whenever a migration step is added below
const SCHEMA_VERSION: i64 = 2;

/// DbConnection manages the SQLite pool and the schema migration
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::migrate(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring the schema up to SCHEMA_VERSION, keyed on PRAGMA user_version.
    /// v1 creates the tables and seeds the settings singleton; v2 adds the
    /// journal's document reference columns.
    async fn migrate(pool: &SqlitePool) -> Result<()> {
        let version: i64 = sqlx::query("PRAGMA user_version")
            .fetch_one(pool)
            .await?
            .get(0);

        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        info!("Migrating database schema from version {version} to {SCHEMA_VERSION}");

        if version < 1 {
            sqlx::query("PRAGMA journal_mode = 'wal'").execute(pool).await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    company_name TEXT,
                    nuit TEXT,
                    address TEXT,
                    email TEXT,
                    phone TEXT,
                    logo_uri TEXT,
                    locale TEXT DEFAULT 'pt-MZ',
                    currency TEXT DEFAULT 'MZN',
                    tax_percentage REAL DEFAULT 16
                );
                "#,
            )
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS clients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    nuit TEXT,
                    email TEXT,
                    phone TEXT,
                    address TEXT,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
                );
                "#,
            )
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS products (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    code TEXT,
                    price REAL NOT NULL,
                    tax_rate REAL DEFAULT 0,
                    description TEXT,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
                );
                "#,
            )
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS invoices (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    type TEXT NOT NULL,
                    client_id INTEGER,
                    date DATETIME DEFAULT CURRENT_TIMESTAMP,
                    due_date DATETIME,
                    subtotal REAL NOT NULL,
                    tax_total REAL NOT NULL,
                    discount_total REAL DEFAULT 0,
                    total REAL NOT NULL,
                    status TEXT DEFAULT 'DRAFT',
                    invoice_number TEXT,
                    FOREIGN KEY (client_id) REFERENCES clients (id)
                );
                "#,
            )
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS invoice_items (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    invoice_id INTEGER NOT NULL,
                    product_id INTEGER,
                    description TEXT NOT NULL,
                    quantity REAL NOT NULL,
                    unit_price REAL NOT NULL,
                    tax_rate REAL DEFAULT 0,
                    total REAL NOT NULL,
                    FOREIGN KEY (invoice_id) REFERENCES invoices (id),
                    FOREIGN KEY (product_id) REFERENCES products (id)
                );
                "#,
            )
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS journal_entries (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    type TEXT NOT NULL,
                    amount REAL NOT NULL,
                    description TEXT NOT NULL,
                    date DATETIME DEFAULT CURRENT_TIMESTAMP,
                    category TEXT
                );
                "#,
            )
            .execute(pool)
            .await?;

            // Insert default settings if empty
            let count: i64 = sqlx::query("SELECT count(*) AS count FROM settings")
                .fetch_one(pool)
                .await?
                .get("count");
            if count == 0 {
                sqlx::query("INSERT INTO settings (company_name, locale, currency) VALUES (?, ?, ?)")
                    .bind("Minha Empresa")
                    .bind("pt-MZ")
                    .bind("MZN")
                    .execute(pool)
                    .await?;
            }
        }

        if version < 2 {
            // The weak document reference on journal entries arrived later
            sqlx::query("ALTER TABLE journal_entries ADD COLUMN document_type TEXT")
                .execute(pool)
                .await?;
            sqlx::query("ALTER TABLE journal_entries ADD COLUMN invoice_id INTEGER")
                .execute(pool)
                .await?;
        }

        sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .execute(pool)
            .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type Invoices = InvoiceRepository;
    type Journal = JournalRepository;
    type Clients = ClientRepository;
    type Products = ProductRepository;
    type Settings = SettingsRepository;

    fn create_invoice_repository(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.clone())
    }

    fn create_journal_repository(&self) -> JournalRepository {
        JournalRepository::new(self.clone())
    }

    fn create_client_repository(&self) -> ClientRepository {
        ClientRepository::new(self.clone())
    }

    fn create_product_repository(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> SettingsRepository {
        SettingsRepository::new(self.clone())
    }
}
