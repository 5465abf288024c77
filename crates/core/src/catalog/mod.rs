//! Catalog loading and normalization.
//!
//! The catalog is an explicit repository object: construct it once at
//! process start and pass it by reference to every component. There is no
//! process-global cache and no first-load-wins behavior; tests get
//! isolation by building fresh instances.

mod list_field;

pub use list_field::parse_list_field;

use std::path::Path;

use crate::domain::{CategoryLevel, PopularitySource, Product, ProductId};
use crate::errors::CatalogError;

use serde::Serialize;

/// In-memory, read-only snapshot of the product dataset.
#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
    source: PopularitySource,
}

/// One entry of a category listing: distinct value plus product count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

impl Catalog {
    /// Build a catalog directly from normalized products. Intended for
    /// tests and for callers that source records elsewhere.
    pub fn from_products(products: Vec<Product>, source: PopularitySource) -> Self {
        Self { products, source }
    }

    /// Load the `product_info.csv` dataset shape.
    ///
    /// Popularity comes from the `loves_count` column; `highlights` and
    /// `ingredients` are bracketed list-text fields run through the
    /// tolerant parser. Unknown columns are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let headers = read_headers(&mut reader, path)?;

        let id = require_column(&headers, path, "product_id")?;
        let name = require_column(&headers, path, "product_name")?;
        let brand = column(&headers, "brand_name");
        let rating = column(&headers, "rating");
        let loves = column(&headers, "loves_count");
        let highlights = column(&headers, "highlights");
        let ingredients = column(&headers, "ingredients");
        let primary = column(&headers, "primary_category");
        let secondary = column(&headers, "secondary_category");
        let tertiary = column(&headers, "tertiary_category");
        let price = column(&headers, "price_usd");

        let mut products = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| map_csv_error(path, error))?;
            products.push(Product {
                id: ProductId(field(&record, Some(id)).to_string()),
                name: field(&record, Some(name)).to_string(),
                brand: field(&record, brand).to_string(),
                rating: parse_f64_or_zero(field(&record, rating)),
                popularity: parse_u64_or_zero(field(&record, loves)),
                price: parse_price(field(&record, price)),
                primary_category: field(&record, primary).to_string(),
                secondary_category: field(&record, secondary).to_string(),
                tertiary_category: field(&record, tertiary).to_string(),
                highlights: parse_list_field(field(&record, highlights)),
                ingredients: parse_list_field(field(&record, ingredients)),
            });
        }

        tracing::debug!(
            path = %path.display(),
            products = products.len(),
            "loaded product_info catalog"
        );
        Ok(Self { products, source: PopularitySource::Loves })
    }

    /// Load the `product_item.csv` dataset shape.
    ///
    /// Popularity comes from the `reviews` column and price from
    /// `listPrice` (tolerating a leading `$` and thousands separators).
    /// This variant has no category or list-text columns.
    pub fn load_items(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let headers = read_headers(&mut reader, path)?;

        let id = require_column(&headers, path, "product_id")?;
        let name = require_column(&headers, path, "product_name")?;
        let brand = column(&headers, "brand_name");
        let rating = column(&headers, "rating");
        let reviews = column(&headers, "reviews");
        let price = column(&headers, "listPrice");

        let mut products = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| map_csv_error(path, error))?;
            products.push(Product {
                id: ProductId(field(&record, Some(id)).to_string()),
                name: field(&record, Some(name)).to_string(),
                brand: field(&record, brand).to_string(),
                rating: parse_f64_or_zero(field(&record, rating)),
                popularity: parse_u64_or_zero(field(&record, reviews)),
                price: parse_price(field(&record, price)),
                primary_category: String::new(),
                secondary_category: String::new(),
                tertiary_category: String::new(),
                highlights: Vec::new(),
                ingredients: Vec::new(),
            });
        }

        tracing::debug!(
            path = %path.display(),
            products = products.len(),
            "loaded product_item catalog"
        );
        Ok(Self { products, source: PopularitySource::Reviews })
    }

    /// Like [`Catalog::load`], but a missing file degrades to an empty
    /// catalog instead of an error. Malformed files still fail.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        match Self::load(path.as_ref()) {
            Err(CatalogError::Missing { path }) => {
                tracing::warn!(path = %path.display(), "catalog file missing, using empty catalog");
                Ok(Self { products: Vec::new(), source: PopularitySource::Loves })
            }
            other => other,
        }
    }

    /// [`Catalog::load_items`] with the same missing-file degradation as
    /// [`Catalog::load_or_empty`].
    pub fn load_items_or_empty(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        match Self::load_items(path.as_ref()) {
            Err(CatalogError::Missing { path }) => {
                tracing::warn!(path = %path.display(), "item file missing, using empty catalog");
                Ok(Self { products: Vec::new(), source: PopularitySource::Reviews })
            }
            other => other,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn source(&self) -> PopularitySource {
        self.source
    }

    /// Distinct category values at `level` with product counts, sorted by
    /// count descending then name. Unassigned (empty) values are skipped.
    pub fn categories(&self, level: CategoryLevel) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for product in &self.products {
            let value = level.field(product);
            if value.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|entry| entry.name == value) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount { name: value.to_string(), count: 1 }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::Missing { path: path.to_path_buf() });
    }
    csv::Reader::from_path(path).map_err(|error| map_csv_error(path, error))
}

fn read_headers(
    reader: &mut csv::Reader<std::fs::File>,
    path: &Path,
) -> Result<csv::StringRecord, CatalogError> {
    reader.headers().map(Clone::clone).map_err(|error| map_csv_error(path, error))
}

fn map_csv_error(path: &Path, error: csv::Error) -> CatalogError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => CatalogError::Io { path: path.to_path_buf(), source },
        _ => CatalogError::MalformedRow { path: path.to_path_buf(), message },
    }
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn require_column(
    headers: &csv::StringRecord,
    path: &Path,
    name: &'static str,
) -> Result<usize, CatalogError> {
    column(headers, name)
        .ok_or(CatalogError::MissingColumn { path: path.to_path_buf(), column: name })
}

fn field<'r>(record: &'r csv::StringRecord, index: Option<usize>) -> &'r str {
    index.and_then(|index| record.get(index)).unwrap_or("")
}

fn parse_f64_or_zero(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

fn parse_u64_or_zero(value: &str) -> u64 {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<u64>() {
        return parsed;
    }
    // Counters occasionally arrive as float text ("1200.0").
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed >= 0.0 => parsed as u64,
        _ => 0,
    }
}

fn parse_price(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_start_matches('$').replace(',', "");
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::domain::{CategoryLevel, PopularitySource};
    use crate::errors::CatalogError;

    use super::Catalog;

    fn write_info_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("product_info.csv");
        fs::write(&path, body).expect("fixture write should succeed");
        path
    }

    #[test]
    fn load_normalizes_numeric_and_list_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_info_csv(
            &dir,
            "product_id,product_name,brand_name,rating,loves_count,highlights,ingredients,primary_category,secondary_category,tertiary_category,price_usd\n\
             P1,Hydra Cream,Dewlab,4.5,1200,\"['Good for: dry', 'Vegan']\",\"['Glycerin', 'Squalane']\",Skincare,Moisturizers,,32.0\n\
             P2,Mystery Balm,,not-a-number,,,,,,,\n",
        );

        let catalog = Catalog::load(&path).expect("catalog should load");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.source(), PopularitySource::Loves);

        let first = &catalog.products()[0];
        assert_eq!(first.highlights, vec!["Good for: dry", "Vegan"]);
        assert_eq!(first.ingredients, vec!["Glycerin", "Squalane"]);
        assert_eq!(first.price, Some(32.0));

        let second = &catalog.products()[1];
        assert_eq!(second.rating, 0.0);
        assert_eq!(second.popularity, 0);
        assert_eq!(second.price, None);
        assert!(second.highlights.is_empty());
    }

    #[test]
    fn missing_file_yields_empty_catalog_through_load_or_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nope.csv");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Missing { .. })));

        let catalog = Catalog::load_or_empty(&path).expect("missing file should degrade");
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_items_reads_reviews_and_dollar_prices() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("product_item.csv");
        fs::write(
            &path,
            "product_id,product_name,brand_name,rating,reviews,image_url,target_url,listPrice,skuId\n\
             P9,Silk Lip Oil,Velvetine,4.2,857,https://img,https://item,$24.00,2758951\n",
        )
        .expect("fixture write should succeed");

        let catalog = Catalog::load_items(&path).expect("items should load");
        assert_eq!(catalog.source(), PopularitySource::Reviews);
        let product = &catalog.products()[0];
        assert_eq!(product.popularity, 857);
        assert_eq!(product.price, Some(24.0));
        assert!(product.primary_category.is_empty());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_info_csv(&dir, "name,brand\nHydra Cream,Dewlab\n");

        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::MissingColumn { column: "product_id", .. })
        ));
    }

    #[test]
    fn categories_counts_distinct_values_per_level() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_info_csv(
            &dir,
            "product_id,product_name,primary_category\n\
             P1,A,Skincare\n\
             P2,B,Skincare\n\
             P3,C,Makeup\n\
             P4,D,\n",
        );

        let catalog = Catalog::load(&path).expect("catalog should load");
        let counts = catalog.categories(CategoryLevel::Primary);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].name, "Skincare");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].name, "Makeup");

        // The secondary column is absent entirely, so every value is empty.
        assert!(catalog.categories(CategoryLevel::Secondary).is_empty());
    }
}
