use std::collections::BTreeSet;
use std::io::Read;

use quote_core::{
    AddonDependency, AddonPricingEntry, CabinetPricingEntry, HandleType, MaterialPrices,
    MeasurementKind, QuoteRepository, RepositoryError, RoundingRule, SurfacePricingEntry,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid measurement code: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid handle code: {0}")]
    InvalidHandle(String),

    #[error("Invalid rounding code: {0}")]
    InvalidRounding(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// Multiplier applied to the base import price for the fenix material.
///
/// The supplier's price lists carry one base price per surface; fenix sells
/// at one and a half times that base. The multiplier is data, not engine
/// logic, so callers may override it per import.
pub fn default_fenix_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// A single record from the cabinet prices CSV file.
///
/// Columns: `name,area,room_name,measurement,handle_type,price_l0..price_l10,
/// str_addon`. The `measurement` and `handle_type` columns use the stable
/// string codes; an empty `str_addon` means the row carries no surcharge.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CabinetPriceRecord {
    pub name: String,
    pub area: String,
    pub room_name: String,
    pub measurement: String,
    pub handle_type: String,
    pub price_l0: Decimal,
    pub price_l1: Decimal,
    pub price_l2: Decimal,
    pub price_l3: Decimal,
    pub price_l4: Decimal,
    pub price_l5: Decimal,
    pub price_l6: Decimal,
    pub price_l7: Decimal,
    pub price_l8: Decimal,
    pub price_l9: Decimal,
    pub price_l10: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub str_addon: Option<Decimal>,
}

/// A single record from the surface prices CSV file.
///
/// Columns: `name,area,measurement,base_price`. The per-material prices are
/// derived at load time: every material gets the base price except fenix,
/// which gets `base_price × fenix_multiplier`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SurfacePriceRecord {
    pub name: String,
    pub area: String,
    pub measurement: String,
    pub base_price: Decimal,
}

/// A single record from the addon prices CSV file.
///
/// Columns: `name,area,measurement,unit_price`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AddonPriceRecord {
    pub name: String,
    pub area: String,
    pub measurement: String,
    pub unit_price: Decimal,
}

/// A single record from the addon dependencies CSV file.
///
/// Columns: `parent,dependent,quantity_ratio,rounding`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DependencyRecord {
    pub parent: String,
    pub dependent: String,
    pub quantity_ratio: Decimal,
    pub rounding: String,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_measurement(code: &str) -> Result<MeasurementKind, CatalogLoaderError> {
    MeasurementKind::parse(code)
        .ok_or_else(|| CatalogLoaderError::InvalidMeasurement(code.to_string()))
}

fn parse_handle(code: &str) -> Result<HandleType, CatalogLoaderError> {
    HandleType::parse(code).ok_or_else(|| CatalogLoaderError::InvalidHandle(code.to_string()))
}

fn parse_rounding(code: &str) -> Result<RoundingRule, CatalogLoaderError> {
    RoundingRule::parse(code).ok_or_else(|| CatalogLoaderError::InvalidRounding(code.to_string()))
}

/// Loader for catalog data from CSV files.
///
/// The loader reads CSV data and inserts it through the [`QuoteRepository`]
/// trait, so it works with any database backend. Loads are idempotent: each
/// area present in the input is delete-then-inserted, so re-running the same
/// import produces the same rows.
pub struct CatalogLoader;

impl CatalogLoader {
    fn parse_records<R: Read, T: DeserializeOwned>(
        reader: R,
    ) -> Result<Vec<T>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            records.push(result?);
        }

        Ok(records)
    }

    /// Parse cabinet price records from a CSV reader.
    pub fn parse_cabinets<R: Read>(
        reader: R,
    ) -> Result<Vec<CabinetPriceRecord>, CatalogLoaderError> {
        Self::parse_records(reader)
    }

    /// Parse surface price records from a CSV reader.
    pub fn parse_surfaces<R: Read>(
        reader: R,
    ) -> Result<Vec<SurfacePriceRecord>, CatalogLoaderError> {
        Self::parse_records(reader)
    }

    /// Parse addon price records from a CSV reader.
    pub fn parse_addons<R: Read>(reader: R) -> Result<Vec<AddonPriceRecord>, CatalogLoaderError> {
        Self::parse_records(reader)
    }

    /// Parse dependency records from a CSV reader.
    pub fn parse_dependencies<R: Read>(
        reader: R,
    ) -> Result<Vec<DependencyRecord>, CatalogLoaderError> {
        Self::parse_records(reader)
    }

    /// Load cabinet price records into the database.
    ///
    /// Every area present in the records has its existing rows deleted before
    /// the new rows are inserted. Returns the number of rows inserted.
    pub async fn load_cabinets<R: QuoteRepository>(
        repo: &R,
        records: &[CabinetPriceRecord],
    ) -> Result<usize, CatalogLoaderError> {
        let areas: BTreeSet<&str> = records.iter().map(|r| r.area.as_str()).collect();
        for area in areas {
            repo.delete_cabinet_prices(area).await?;
        }

        for record in records {
            let entry = CabinetPricingEntry {
                name: record.name.clone(),
                area: record.area.clone(),
                room_name: record.room_name.clone(),
                measurement: parse_measurement(&record.measurement)?,
                handle_type: parse_handle(&record.handle_type)?,
                level_prices: [
                    record.price_l0,
                    record.price_l1,
                    record.price_l2,
                    record.price_l3,
                    record.price_l4,
                    record.price_l5,
                    record.price_l6,
                    record.price_l7,
                    record.price_l8,
                    record.price_l9,
                    record.price_l10,
                ],
                str_addon: record.str_addon,
            };
            repo.insert_cabinet_price(&entry).await?;
        }

        Ok(records.len())
    }

    /// Load surface price records into the database.
    ///
    /// Every material price maps to the record's base price except fenix,
    /// which gets `base_price × fenix_multiplier`. Returns the number of rows
    /// inserted.
    pub async fn load_surfaces<R: QuoteRepository>(
        repo: &R,
        records: &[SurfacePriceRecord],
        fenix_multiplier: Decimal,
    ) -> Result<usize, CatalogLoaderError> {
        let areas: BTreeSet<&str> = records.iter().map(|r| r.area.as_str()).collect();
        for area in areas {
            repo.delete_surface_prices(area).await?;
        }

        for record in records {
            let entry = SurfacePricingEntry {
                name: record.name.clone(),
                area: record.area.clone(),
                measurement: parse_measurement(&record.measurement)?,
                prices: MaterialPrices {
                    fenix: record.base_price * fenix_multiplier,
                    ..MaterialPrices::uniform(record.base_price)
                },
            };
            repo.insert_surface_price(&entry).await?;
        }

        Ok(records.len())
    }

    /// Load addon price records into the database.
    pub async fn load_addons<R: QuoteRepository>(
        repo: &R,
        records: &[AddonPriceRecord],
    ) -> Result<usize, CatalogLoaderError> {
        let areas: BTreeSet<&str> = records.iter().map(|r| r.area.as_str()).collect();
        for area in areas {
            repo.delete_addon_prices(area).await?;
        }

        for record in records {
            let entry = AddonPricingEntry {
                name: record.name.clone(),
                area: record.area.clone(),
                measurement: parse_measurement(&record.measurement)?,
                unit_price: record.unit_price,
            };
            repo.insert_addon_price(&entry).await?;
        }

        Ok(records.len())
    }

    /// Load dependency records into the database, replacing the whole table.
    pub async fn load_dependencies<R: QuoteRepository>(
        repo: &R,
        records: &[DependencyRecord],
    ) -> Result<usize, CatalogLoaderError> {
        repo.delete_addon_dependencies().await?;

        for record in records {
            let dependency = AddonDependency {
                parent: record.parent.clone(),
                dependent: record.dependent.clone(),
                quantity_ratio: record.quantity_ratio,
                rounding: parse_rounding(&record.rounding)?,
            };
            repo.insert_addon_dependency(&dependency).await?;
        }

        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CABINET_CSV: &str = "\
name,area,room_name,measurement,handle_type,price_l0,price_l1,price_l2,price_l3,price_l4,price_l5,price_l6,price_l7,price_l8,price_l9,price_l10,str_addon
Base Cabinet,kitchen,Kitchen,LNFT,none,100,110,120,130,140,150,160,170,180,190,200,15
Wall Cabinet,kitchen,Kitchen,LNFT,profile,80,88,96,104,112,120,128,136,144,152,160,
";

    const SURFACE_CSV: &str = "\
name,area,measurement,base_price
Counter Top,kitchen-surfaces,SQFT,40
Backsplash,kitchen-surfaces,SQFT,30
";

    const ADDON_CSV: &str = "\
name,area,measurement,unit_price
LED Lighting,kitchen,LNFT,12
Transformer,kitchen,QTY,45
";

    const DEPENDENCY_CSV: &str = "\
parent,dependent,quantity_ratio,rounding
Aluminum Profile,End Cap,2,none
";

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn parse_cabinets_reads_all_price_levels() {
        let records = CatalogLoader::parse_cabinets(CABINET_CSV.as_bytes()).expect("parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Base Cabinet");
        assert_eq!(records[0].price_l0, dec!(100));
        assert_eq!(records[0].price_l10, dec!(200));
        assert_eq!(records[0].str_addon, Some(dec!(15)));
    }

    #[test]
    fn parse_cabinets_treats_empty_str_addon_as_none() {
        let records = CatalogLoader::parse_cabinets(CABINET_CSV.as_bytes()).expect("parse");

        assert_eq!(records[1].str_addon, None);
    }

    #[test]
    fn parse_cabinets_rejects_missing_columns() {
        let csv = "name,area,room_name\nBase Cabinet,kitchen,Kitchen";

        let result = CatalogLoader::parse_cabinets(csv.as_bytes());

        let err = result.expect_err("should fail for missing column");
        let CatalogLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn parse_cabinets_rejects_bad_decimal() {
        let csv = "\
name,area,room_name,measurement,handle_type,price_l0,price_l1,price_l2,price_l3,price_l4,price_l5,price_l6,price_l7,price_l8,price_l9,price_l10,str_addon
Base Cabinet,kitchen,Kitchen,LNFT,none,abc,110,120,130,140,150,160,170,180,190,200,
";

        let result = CatalogLoader::parse_cabinets(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoaderError::CsvParse(_))));
    }

    #[test]
    fn parse_surfaces_reads_base_prices() {
        let records = CatalogLoader::parse_surfaces(SURFACE_CSV.as_bytes()).expect("parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Counter Top");
        assert_eq!(records[0].base_price, dec!(40));
    }

    #[test]
    fn parse_addons_reads_unit_prices() {
        let records = CatalogLoader::parse_addons(ADDON_CSV.as_bytes()).expect("parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].measurement, "QTY");
        assert_eq!(records[1].unit_price, dec!(45));
    }

    #[test]
    fn parse_dependencies_reads_edges() {
        let records =
            CatalogLoader::parse_dependencies(DEPENDENCY_CSV.as_bytes()).expect("parse");

        assert_eq!(
            records,
            vec![DependencyRecord {
                parent: "Aluminum Profile".to_string(),
                dependent: "End Cap".to_string(),
                quantity_ratio: dec!(2),
                rounding: "none".to_string(),
            }]
        );
    }

    #[test]
    fn parse_empty_csv_yields_no_records() {
        let csv = "name,area,measurement,unit_price\n";

        let records = CatalogLoader::parse_addons(csv.as_bytes()).expect("parse");

        assert!(records.is_empty());
    }

    #[test]
    fn default_fenix_multiplier_is_one_and_a_half() {
        assert_eq!(default_fenix_multiplier(), dec!(1.5));
    }
}
