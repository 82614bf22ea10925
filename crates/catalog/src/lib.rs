//! Menu item store: point lookups by canonical dish name. A missing item is
//! a normal answer (`Ok(None)`); only transport failures are errors, and
//! those are surfaced to the user by the pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use mesero_core::menu::{HAMBURGUESA, PERRO, PIZZA, SALCHIPAPA};
use mesero_core::MenuItem;
use parking_lot::RwLock;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

/// `Unavailable` covers reaching the store at all (connect/open phase);
/// `Store` covers a query that failed once connected.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("menu store query failed: {0}")]
    Store(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

pub trait MenuCatalog: Send + Sync {
    async fn find_item(&self, canonical_name: &str) -> Result<Option<MenuItem>, CatalogError>;
}

fn seed_items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            name: HAMBURGUESA.to_string(),
            price: "18.000".to_string(),
            variants: "sencilla, doble o con queso".to_string(),
        },
        MenuItem {
            name: PIZZA.to_string(),
            price: "25.000".to_string(),
            variants: "personal o familiar".to_string(),
        },
        MenuItem {
            name: SALCHIPAPA.to_string(),
            price: "15.000".to_string(),
            variants: String::new(),
        },
        MenuItem {
            name: PERRO.to_string(),
            price: "12.000".to_string(),
            variants: "americano o ranchero".to_string(),
        },
    ]
}

#[derive(Clone, Default)]
pub struct MemoryCatalog {
    items: Arc<RwLock<HashMap<String, MenuItem>>>,
}

impl MemoryCatalog {
    /// Empty store; callers decide what goes in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the four house dishes.
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for item in seed_items() {
            catalog.upsert(item);
        }
        catalog
    }

    pub fn upsert(&self, item: MenuItem) {
        self.items.write().insert(item.name.clone(), item);
    }
}

impl MenuCatalog for MemoryCatalog {
    async fn find_item(&self, canonical_name: &str) -> Result<Option<MenuItem>, CatalogError> {
        Ok(self.items.read().get(canonical_name).cloned())
    }
}

#[derive(Clone, Debug)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        let pool = SqlitePool::connect(database_url).await.map_err(|cause| {
            CatalogError::Unavailable(format!(
                "failed opening sqlite at {database_url}: {cause}"
            ))
        })?;

        let catalog = Self { pool };
        catalog.ensure_schema().await?;
        catalog.seed_if_empty().await?;
        Ok(catalog)
    }

    async fn ensure_schema(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS menu_items (
              item_name TEXT PRIMARY KEY,
              price TEXT NOT NULL,
              variants TEXT NOT NULL DEFAULT ''
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn seed_if_empty(&self) -> Result<(), CatalogError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM menu_items")
            .fetch_one(&self.pool)
            .await?
            .get("n");

        if count > 0 {
            return Ok(());
        }

        for item in seed_items() {
            sqlx::query(
                r#"
                INSERT INTO menu_items (item_name, price, variants)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(item_name) DO NOTHING
                "#,
            )
            .bind(&item.name)
            .bind(&item.price)
            .bind(&item.variants)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

impl MenuCatalog for SqliteCatalog {
    async fn find_item(&self, canonical_name: &str) -> Result<Option<MenuItem>, CatalogError> {
        let row = sqlx::query(
            r#"
            SELECT item_name, price, variants
            FROM menu_items
            WHERE item_name = ?1
            "#,
        )
        .bind(canonical_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| MenuItem {
            name: row.get("item_name"),
            price: row.get("price"),
            variants: row.get("variants"),
        }))
    }
}

#[derive(Clone)]
pub enum Catalog {
    Memory(MemoryCatalog),
    Sqlite(SqliteCatalog),
}

impl Catalog {
    pub fn memory() -> Self {
        Self::Memory(MemoryCatalog::seeded())
    }

    pub async fn sqlite(database_url: &str) -> Result<Self, CatalogError> {
        Ok(Self::Sqlite(SqliteCatalog::connect(database_url).await?))
    }
}

impl MenuCatalog for Catalog {
    async fn find_item(&self, canonical_name: &str) -> Result<Option<MenuItem>, CatalogError> {
        match self {
            Catalog::Memory(catalog) => catalog.find_item(canonical_name).await,
            Catalog::Sqlite(catalog) => catalog.find_item(canonical_name).await,
        }
    }
}
