use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_core::models::PRICE_LEVELS;
use quote_core::{
    AddonDependency, AddonPricingEntry, CabinetPricingEntry, CalculatorConfig, HandleType,
    MaterialPrices, MeasurementKind, NewQuote, PricingSummary, Quote, QuoteRepository,
    RepositoryError, RoundingRule, SurfacePricingEntry,
};
use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use crate::decimal::{decimal_to_f64, get_decimal, get_optional_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Configuration(format!(
                    "Failed to read seeds directory '{}': {}",
                    seeds_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            debug!(seed = %path.display(), "executing seed file");
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Configuration(format!(
                    "Failed to read seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Database(format!(
                        "Failed to execute seed file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_measurement(code: &str) -> Result<MeasurementKind, RepositoryError> {
    MeasurementKind::parse(code)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid measurement code: {}", code)))
}

fn parse_handle(code: &str) -> Result<HandleType, RepositoryError> {
    HandleType::parse(code)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid handle code: {}", code)))
}

fn parse_rounding(code: &str) -> Result<RoundingRule, RepositoryError> {
    RoundingRule::parse(code)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid rounding code: {}", code)))
}

fn get_text(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<String, RepositoryError> {
    row.try_get(column)
        .map_err(|e| RepositoryError::Database(e.to_string()))
}

fn row_to_cabinet_price(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<CabinetPricingEntry, RepositoryError> {
    let mut level_prices = [Decimal::ZERO; PRICE_LEVELS];
    for (level, price) in level_prices.iter_mut().enumerate() {
        *price = get_decimal(row, &format!("price_l{level}"))?;
    }

    Ok(CabinetPricingEntry {
        name: get_text(row, "name")?,
        area: get_text(row, "area")?,
        room_name: get_text(row, "room_name")?,
        measurement: parse_measurement(&get_text(row, "measurement")?)?,
        handle_type: parse_handle(&get_text(row, "handle_type")?)?,
        level_prices,
        str_addon: get_optional_decimal(row, "str_addon")?,
    })
}

fn row_to_surface_price(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<SurfacePricingEntry, RepositoryError> {
    Ok(SurfacePricingEntry {
        name: get_text(row, "name")?,
        area: get_text(row, "area")?,
        measurement: parse_measurement(&get_text(row, "measurement")?)?,
        prices: MaterialPrices {
            laminate: get_decimal(row, "laminate")?,
            fenix: get_decimal(row, "fenix")?,
            porcelain: get_decimal(row, "porcelain")?,
            quartz: get_decimal(row, "quartz")?,
            stainless: get_decimal(row, "stainless")?,
            glass_matte: get_decimal(row, "glass_matte")?,
            granite: get_decimal(row, "granite")?,
        },
    })
}

fn row_to_addon_price(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<AddonPricingEntry, RepositoryError> {
    Ok(AddonPricingEntry {
        name: get_text(row, "name")?,
        area: get_text(row, "area")?,
        measurement: parse_measurement(&get_text(row, "measurement")?)?,
        unit_price: get_decimal(row, "unit_price")?,
    })
}

fn row_to_dependency(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<AddonDependency, RepositoryError> {
    Ok(AddonDependency {
        parent: get_text(row, "parent_name")?,
        dependent: get_text(row, "dependent_name")?,
        quantity_ratio: get_decimal(row, "quantity_ratio")?,
        rounding: parse_rounding(&get_text(row, "rounding")?)?,
    })
}

fn row_to_quote(row: &sqlx::sqlite::SqliteRow) -> Result<Quote, RepositoryError> {
    let config_json = get_text(row, "config_json")?;
    let config: CalculatorConfig = serde_json::from_str(&config_json)
        .map_err(|e| RepositoryError::Database(format!("Invalid config snapshot: {}", e)))?;

    let summary_json = get_text(row, "summary_json")?;
    let summary: PricingSummary = serde_json::from_str(&summary_json)
        .map_err(|e| RepositoryError::Database(format!("Invalid summary snapshot: {}", e)))?;

    Ok(Quote {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        customer_name: get_text(row, "customer_name")?,
        customer_email: row
            .try_get("customer_email")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        customer_phone: row
            .try_get("customer_phone")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        config,
        summary,
    })
}

#[async_trait]
impl QuoteRepository for SqliteRepository {
    async fn list_cabinet_prices(&self) -> Result<Vec<CabinetPricingEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM cabinet_prices ORDER BY area, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_cabinet_price).collect()
    }

    async fn insert_cabinet_price(
        &self,
        entry: &CabinetPricingEntry,
    ) -> Result<(), RepositoryError> {
        let mut query = sqlx::query(
            "INSERT INTO cabinet_prices (
                name, area, room_name, measurement, handle_type,
                price_l0, price_l1, price_l2, price_l3, price_l4, price_l5,
                price_l6, price_l7, price_l8, price_l9, price_l10, str_addon
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.name)
        .bind(&entry.area)
        .bind(&entry.room_name)
        .bind(entry.measurement.as_str())
        .bind(entry.handle_type.as_str());

        for price in entry.level_prices {
            query = query.bind(decimal_to_f64(price));
        }

        query
            .bind(entry.str_addon.map(decimal_to_f64))
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_cabinet_prices(&self, area: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cabinet_prices WHERE area = ?")
            .bind(area)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_surface_prices(&self) -> Result<Vec<SurfacePricingEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM surface_prices ORDER BY area, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_surface_price).collect()
    }

    async fn insert_surface_price(
        &self,
        entry: &SurfacePricingEntry,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO surface_prices (
                name, area, measurement,
                laminate, fenix, porcelain, quartz, stainless, glass_matte, granite
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.name)
        .bind(&entry.area)
        .bind(entry.measurement.as_str())
        .bind(decimal_to_f64(entry.prices.laminate))
        .bind(decimal_to_f64(entry.prices.fenix))
        .bind(decimal_to_f64(entry.prices.porcelain))
        .bind(decimal_to_f64(entry.prices.quartz))
        .bind(decimal_to_f64(entry.prices.stainless))
        .bind(decimal_to_f64(entry.prices.glass_matte))
        .bind(decimal_to_f64(entry.prices.granite))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_surface_prices(&self, area: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM surface_prices WHERE area = ?")
            .bind(area)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_addon_prices(&self) -> Result<Vec<AddonPricingEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM addon_prices ORDER BY area, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_addon_price).collect()
    }

    async fn insert_addon_price(&self, entry: &AddonPricingEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO addon_prices (name, area, measurement, unit_price)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.name)
        .bind(&entry.area)
        .bind(entry.measurement.as_str())
        .bind(decimal_to_f64(entry.unit_price))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_addon_prices(&self, area: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM addon_prices WHERE area = ?")
            .bind(area)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_addon_dependencies(&self) -> Result<Vec<AddonDependency>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM addon_dependencies ORDER BY parent_name, dependent_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_dependency).collect()
    }

    async fn insert_addon_dependency(
        &self,
        dependency: &AddonDependency,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO addon_dependencies (parent_name, dependent_name, quantity_ratio, rounding)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&dependency.parent)
        .bind(&dependency.dependent)
        .bind(decimal_to_f64(dependency.quantity_ratio))
        .bind(dependency.rounding.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_addon_dependencies(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM addon_dependencies")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, RepositoryError> {
        let config_json = serde_json::to_string(&quote.config)
            .map_err(|e| RepositoryError::Database(format!("Failed to encode config: {}", e)))?;
        let summary_json = serde_json::to_string(&quote.summary)
            .map_err(|e| RepositoryError::Database(format!("Failed to encode summary: {}", e)))?;
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO quotes (
                customer_name, customer_email, customer_phone,
                config_json, summary_json, created_at
             ) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&quote.customer_name)
        .bind(quote.customer_email.as_deref())
        .bind(quote.customer_phone.as_deref())
        .bind(&config_json)
        .bind(&summary_json)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(Quote {
            id: result.last_insert_rowid(),
            customer_name: quote.customer_name,
            customer_email: quote.customer_email,
            customer_phone: quote.customer_phone,
            created_at,
            config: quote.config,
            summary: quote.summary,
        })
    }

    async fn get_quote(&self, id: i64) -> Result<Quote, RepositoryError> {
        let row = sqlx::query("SELECT * FROM quotes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_quote(&row)
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM quotes ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_quote).collect()
    }

    async fn delete_quote(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::{
        CalculatorConfig, LED_LIGHTING, PricingSummary, TRANSFORMER,
    };
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_repo() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn cabinet_entry(area: &str) -> CabinetPricingEntry {
        CabinetPricingEntry {
            name: "Base Cabinet".to_string(),
            area: area.to_string(),
            room_name: "Kitchen".to_string(),
            measurement: MeasurementKind::LinearFoot,
            handle_type: HandleType::Profile,
            level_prices: [
                dec!(100),
                dec!(110),
                dec!(120),
                dec!(130),
                dec!(140),
                dec!(150),
                dec!(160),
                dec!(170),
                dec!(180),
                dec!(190),
                dec!(200),
            ],
            str_addon: Some(dec!(15.5)),
        }
    }

    fn surface_entry() -> SurfacePricingEntry {
        SurfacePricingEntry {
            name: "Counter Top".to_string(),
            area: "kitchen".to_string(),
            measurement: MeasurementKind::SquareFoot,
            prices: MaterialPrices {
                fenix: dec!(75),
                ..MaterialPrices::uniform(dec!(50))
            },
        }
    }

    fn addon_entry() -> AddonPricingEntry {
        AddonPricingEntry {
            name: "LED Lighting".to_string(),
            area: "kitchen".to_string(),
            measurement: MeasurementKind::LinearFoot,
            unit_price: dec!(12.25),
        }
    }

    fn new_quote(customer: &str) -> NewQuote {
        NewQuote {
            customer_name: customer.to_string(),
            customer_email: Some(format!("{}@example.com", customer.to_lowercase())),
            customer_phone: None,
            config: CalculatorConfig::default(),
            summary: PricingSummary::empty(),
        }
    }

    // =========================================================================
    // cabinet prices
    // =========================================================================

    #[tokio::test]
    async fn cabinet_prices_round_trip() {
        let repo = setup_repo().await;
        let entry = cabinet_entry("kitchen");

        repo.insert_cabinet_price(&entry).await.expect("insert");
        let listed = repo.list_cabinet_prices().await.expect("list");

        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn cabinet_price_without_str_addon_round_trips_as_none() {
        let repo = setup_repo().await;
        let entry = CabinetPricingEntry {
            str_addon: None,
            ..cabinet_entry("kitchen")
        };

        repo.insert_cabinet_price(&entry).await.expect("insert");
        let listed = repo.list_cabinet_prices().await.expect("list");

        assert_eq!(listed[0].str_addon, None);
    }

    #[tokio::test]
    async fn delete_cabinet_prices_is_scoped_by_area() {
        let repo = setup_repo().await;
        repo.insert_cabinet_price(&cabinet_entry("kitchen"))
            .await
            .expect("insert kitchen");
        repo.insert_cabinet_price(&cabinet_entry("island"))
            .await
            .expect("insert island");

        repo.delete_cabinet_prices("kitchen").await.expect("delete");
        let listed = repo.list_cabinet_prices().await.expect("list");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].area, "island");
    }

    // =========================================================================
    // surface and addon prices
    // =========================================================================

    #[tokio::test]
    async fn surface_prices_round_trip() {
        let repo = setup_repo().await;
        let entry = surface_entry();

        repo.insert_surface_price(&entry).await.expect("insert");
        let listed = repo.list_surface_prices().await.expect("list");

        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn addon_prices_round_trip() {
        let repo = setup_repo().await;
        let entry = addon_entry();

        repo.insert_addon_price(&entry).await.expect("insert");
        let listed = repo.list_addon_prices().await.expect("list");

        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn addon_dependencies_round_trip() {
        let repo = setup_repo().await;
        let dependency = AddonDependency {
            parent: "A".to_string(),
            dependent: "B".to_string(),
            quantity_ratio: dec!(0.5),
            rounding: RoundingRule::RoundUp,
        };

        repo.insert_addon_dependency(&dependency)
            .await
            .expect("insert");
        let listed = repo.list_addon_dependencies().await.expect("list");

        assert_eq!(listed, vec![dependency]);
    }

    // =========================================================================
    // load_catalog
    // =========================================================================

    #[tokio::test]
    async fn load_catalog_assembles_all_tables_and_builtin_edges() {
        let repo = setup_repo().await;
        repo.insert_cabinet_price(&cabinet_entry("kitchen"))
            .await
            .expect("insert cabinet");
        repo.insert_surface_price(&surface_entry())
            .await
            .expect("insert surface");
        repo.insert_addon_price(&addon_entry())
            .await
            .expect("insert addon");

        let catalog = repo.load_catalog().await.expect("load catalog");

        assert_eq!(catalog.cabinets.len(), 1);
        assert_eq!(catalog.surfaces.len(), 1);
        assert_eq!(catalog.addons.len(), 1);
        // The LED -> Transformer edge is seeded even with an empty table.
        assert!(
            catalog
                .dependencies
                .iter()
                .any(|d| d.parent == LED_LIGHTING && d.dependent == TRANSFORMER)
        );
    }

    // =========================================================================
    // quotes
    // =========================================================================

    #[tokio::test]
    async fn create_quote_assigns_an_id_and_round_trips() {
        let repo = setup_repo().await;

        let created = repo.create_quote(new_quote("Ada")).await.expect("create");
        assert!(created.id > 0);

        let fetched = repo.get_quote(created.id).await.expect("get");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.customer_name, "Ada");
        assert_eq!(fetched.customer_email.as_deref(), Some("ada@example.com"));
        assert_eq!(fetched.customer_phone, None);
        assert_eq!(fetched.config, created.config);
        assert_eq!(fetched.summary, created.summary);
    }

    #[tokio::test]
    async fn list_quotes_returns_newest_first() {
        let repo = setup_repo().await;
        let first = repo.create_quote(new_quote("Ada")).await.expect("create");
        let second = repo.create_quote(new_quote("Grace")).await.expect("create");
        let third = repo.create_quote(new_quote("Edsger")).await.expect("create");

        let listed = repo.list_quotes().await.expect("list");

        let ids: Vec<_> = listed.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn get_missing_quote_returns_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_quote(42).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn delete_quote_removes_the_row() {
        let repo = setup_repo().await;
        let created = repo.create_quote(new_quote("Ada")).await.expect("create");

        repo.delete_quote(created.id).await.expect("delete");

        assert!(matches!(
            repo.get_quote(created.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_missing_quote_returns_not_found() {
        let repo = setup_repo().await;

        let result = repo.delete_quote(42).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
