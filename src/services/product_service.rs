use crate::middleware::error_handling::{AppError, Result};
use crate::models::product::{Product, ProductRequest};
use crate::repositories::ProductRepository;

/// Exact header names the bulk import expects, case-sensitive.
const CSV_COLUMNS: [&str; 4] = ["name", "description", "imageUrl", "category"];

pub struct ProductService {
    product_repo: ProductRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    pub async fn create(&self, request: ProductRequest) -> Result<Product> {
        self.product_repo.create(&request).await
    }

    pub async fn get_all(&self) -> Result<Vec<Product>> {
        self.product_repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// Overwrites all non-id fields.
    pub async fn update(&self, id: i32, request: ProductRequest) -> Result<Product> {
        self.product_repo
            .update(id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let deleted = self.product_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        Ok(())
    }

    /// Parses the whole file before anything is written, then bulk-inserts in
    /// one transaction: a bad row means zero rows persist. Rows always insert
    /// as new records; re-uploading a file duplicates its products.
    pub async fn import_csv(&self, data: &[u8]) -> Result<u64> {
        let products = parse_products_csv(data)?;

        let inserted = self
            .product_repo
            .bulk_insert(&products)
            .await
            .map_err(|e| AppError::Import(format!("bulk insert failed: {}", e)))?;

        tracing::info!("CSV import persisted {} products", inserted);

        Ok(inserted)
    }
}

fn parse_products_csv(data: &[u8]) -> Result<Vec<ProductRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Import(format!("invalid CSV header: {}", e)))?
        .clone();

    let mut indices = [0usize; 4];
    for (i, column) in CSV_COLUMNS.iter().enumerate() {
        indices[i] = headers
            .iter()
            .position(|h| h == *column)
            .ok_or_else(|| AppError::Import(format!("missing required CSV column '{}'", column)))?;
    }
    let [name_idx, description_idx, image_url_idx, category_idx] = indices;

    let mut products = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // Header is line 1, so data row n is line n + 2.
        let line = row + 2;
        let record =
            record.map_err(|e| AppError::Import(format!("invalid CSV row at line {}: {}", line, e)))?;

        let name = record.get(name_idx).unwrap_or("").to_string();
        if name.is_empty() {
            return Err(AppError::Import(format!("empty product name at line {}", line)));
        }

        products.push(ProductRequest {
            name,
            description: non_empty(record.get(description_idx)),
            image_url: non_empty(record.get(image_url_idx)),
            category: non_empty(record.get(category_idx)),
        });
    }

    Ok(products)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let csv = b"name,description,imageUrl,category\n\
                    Widget,A widget,https://img.example/w.png,Tools\n\
                    Gadget,,,\n";

        let products = parse_products_csv(csv).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].description.as_deref(), Some("A widget"));
        assert_eq!(products[0].image_url.as_deref(), Some("https://img.example/w.png"));
        assert_eq!(products[0].category.as_deref(), Some("Tools"));
        assert_eq!(products[1].name, "Gadget");
        assert!(products[1].description.is_none());
    }

    #[test]
    fn tolerates_extra_columns_and_reordered_headers() {
        let csv = b"sku,category,name,imageUrl,description\n\
                    X-1,Tools,Widget,,A widget\n";

        let products = parse_products_csv(csv).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].category.as_deref(), Some("Tools"));
        assert_eq!(products[0].description.as_deref(), Some("A widget"));
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv = b"name,description,category\nWidget,A widget,Tools\n";

        let err = parse_products_csv(csv).unwrap_err();

        assert!(matches!(err, AppError::Import(ref msg) if msg.contains("imageUrl")));
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let csv = b"Name,description,imageUrl,category\nWidget,,,\n";

        assert!(parse_products_csv(csv).is_err());
    }

    #[test]
    fn rejects_row_with_empty_name() {
        let csv = b"name,description,imageUrl,category\n\
                    Widget,,,\n\
                    ,oops,,\n";

        let err = parse_products_csv(csv).unwrap_err();

        assert!(matches!(err, AppError::Import(ref msg) if msg.contains("line 3")));
    }

    #[test]
    fn trims_padded_fields() {
        let csv = b"name,description,imageUrl,category\n  Widget  , A widget ,,\n";

        let products = parse_products_csv(csv).unwrap();

        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].description.as_deref(), Some("A widget"));
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        let csv = b"name,description,imageUrl,category\n";

        let products = parse_products_csv(csv).unwrap();

        assert!(products.is_empty());
    }
}
