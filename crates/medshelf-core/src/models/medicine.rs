//! Inventory catalog models.

use serde::{Deserialize, Serialize};

/// A single medicine record in the inventory catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Auto-assigned integer id
    pub id: i64,
    /// Upstream brand identifier from the source dataset
    pub brand_id: Option<i64>,
    /// Brand name (e.g., "Napa")
    pub brand_name: Option<String>,
    /// Medicine kind (e.g., "allopathic", "herbal")
    pub kind: Option<String>,
    /// URL slug from the source dataset
    pub slug: Option<String>,
    /// Dosage form (e.g., "Tablet", "Syrup", "Injection")
    pub dosage_form: Option<String>,
    /// Generic/active ingredient name
    pub generic: Option<String>,
    /// Strength (e.g., "500 mg", "4 mg/5 ml")
    pub strength: Option<String>,
    /// Manufacturer name
    pub manufacturer: Option<String>,
    /// Raw package/price string (e.g., "100 ml bottle: ৳ 40.12")
    pub package_container: Option<String>,
    /// Package size (e.g., "100 ml")
    pub package_size: Option<String>,
    /// Unit price, extracted from the package string when importing
    pub price: Option<f64>,
}

/// Field set for creating or partially updating a medicine.
///
/// Every field is optional; on update, `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicineDraft {
    pub brand_id: Option<i64>,
    pub brand_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub slug: Option<String>,
    pub dosage_form: Option<String>,
    pub generic: Option<String>,
    pub strength: Option<String>,
    pub manufacturer: Option<String>,
    pub package_container: Option<String>,
    pub package_size: Option<String>,
    pub price: Option<f64>,
}

/// Which name column a text query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    BrandName,
    GenericName,
}

impl Default for SearchField {
    fn default() -> Self {
        SearchField::BrandName
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

/// Parameters for the advanced medicine search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineSearch {
    /// Free-text query matched against the selected name column
    pub query: Option<String>,
    /// Name column the query applies to
    pub search_field: SearchField,
    /// Substring filter on the medicine kind
    pub kind: Option<String>,
    /// Substring filter on the dosage form
    pub dosage_form: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Column to sort by; unknown names fall back to brand_name
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl Default for MedicineSearch {
    fn default() -> Self {
        Self {
            query: None,
            search_field: SearchField::default(),
            kind: None,
            dosage_form: None,
            min_price: None,
            max_price: None,
            sort_by: "brand_name".into(),
            sort_order: SortOrder::default(),
            page: 1,
            per_page: 20,
        }
    }
}

/// One page of search or listing results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicinePage {
    pub medicines: Vec<Medicine>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl MedicinePage {
    /// Assemble a page, deriving `total_pages` from the total count.
    pub fn new(medicines: Vec<Medicine>, total: u64, page: u32, per_page: u32) -> Self {
        let per = per_page.max(1) as u64;
        Self {
            medicines,
            total,
            page,
            per_page,
            total_pages: ((total + per - 1) / per) as u32,
        }
    }
}

/// Aggregate statistics over the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryStats {
    pub total_medicines: u64,
    pub total_manufacturers: u64,
    pub total_types: u64,
    pub total_dosage_forms: u64,
    pub average_price: f64,
    pub price_range: PriceRange,
}

/// Min/max of the non-null prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Distinct filter values offered by the search interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub dosage_forms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        let page = MedicinePage::new(vec![], 101, 1, 20);
        assert_eq!(page.total_pages, 6);

        let exact = MedicinePage::new(vec![], 100, 1, 20);
        assert_eq!(exact.total_pages, 5);

        let empty = MedicinePage::new(vec![], 0, 1, 20);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_search_defaults() {
        let search = MedicineSearch::default();
        assert_eq!(search.search_field, SearchField::BrandName);
        assert_eq!(search.sort_by, "brand_name");
        assert_eq!(search.sort_order, SortOrder::Asc);
        assert_eq!(search.page, 1);
        assert_eq!(search.per_page, 20);
    }

    #[test]
    fn test_draft_type_field_rename() {
        let json = r#"{"brand_name":"Napa","type":"allopathic"}"#;
        let draft: MedicineDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.kind.as_deref(), Some("allopathic"));
    }
}
