//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use sscatalog::db::{DbPool, establish_connection_pool};
use sscatalog::domain::category::NewCategory;
use sscatalog::domain::product::NewProduct;
use sscatalog::repository::{CategoryWriter, DieselRepository, ProductWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Number of products created by [`seed_catalog`].
pub const SEEDED_PRODUCTS: i32 = 25;

/// Temporary database used in integration tests.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    // Dropped last so the pool releases the files first.
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);

        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            path,
            pool,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn base_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 10, 20)
        .and_then(|date| date.and_hms_opt(3, 0, 0))
        .expect("valid date")
}

/// Seeds categories 1 "Electronics", 2 "Books" and 3 "Computers" and
/// products 1 to 25. Every product belongs to "Electronics"; every fifth one
/// also belongs to "Computers".
pub fn seed_catalog(repo: &DieselRepository) {
    for name in ["Electronics", "Books", "Computers"] {
        repo.create_category(&NewCategory::new(name))
            .expect("create category");
    }

    for n in 1..=SEEDED_PRODUCTS {
        let mut category_ids = vec![1];
        if n % 5 == 0 {
            category_ids.push(3);
        }

        let product = NewProduct::new(
            format!("Product {n:02}"),
            format!("Description of product {n}"),
            f64::from(n) * 10.0,
            base_date() + Duration::days(i64::from(n)),
        )
        .with_img_url(format!("https://img.com/{n}.png"))
        .with_category_ids(category_ids);

        repo.create_product(&product).expect("create product");
    }
}
