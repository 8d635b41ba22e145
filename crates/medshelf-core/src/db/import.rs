//! Bulk import of legacy medicine data.
//!
//! Source datasets carry the unit price embedded in the package string
//! ("100 ml bottle: ৳ 40.12"); the importer recovers it when the price
//! column is missing.

use std::sync::OnceLock;

use regex::Regex;
use rusqlite::params;

use super::{Database, DbResult};
use crate::models::MedicineDraft;

/// Price pattern: the Taka currency marker followed by an amount.
const PRICE_PATTERN: &str = r"৳\s*(\d+(?:\.\d{2})?)";

fn price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PRICE_PATTERN).expect("valid price regex"))
}

/// Extract the numeric price from a package/container string.
pub fn extract_price(package_info: &str) -> Option<f64> {
    let captures = price_regex().captures(package_info)?;
    captures.get(1)?.as_str().parse().ok()
}

impl Database {
    /// Replace the whole catalog with the given rows in one transaction.
    ///
    /// Rows without an explicit price get it extracted from their
    /// `package_container` string. Returns the number of imported rows.
    pub fn import_medicines(&mut self, drafts: &[MedicineDraft]) -> DbResult<usize> {
        let tx = self.transaction()?;

        tx.execute("DELETE FROM medicines", [])?;

        let mut imported = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO medicines (
                    brand_id, brand_name, type, slug, dosage_form, generic,
                    strength, manufacturer, package_container, package_size, price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
            )?;

            for draft in drafts {
                let price = draft.price.or_else(|| {
                    draft
                        .package_container
                        .as_deref()
                        .and_then(extract_price)
                });

                stmt.execute(params![
                    draft.brand_id,
                    draft.brand_name,
                    draft.kind,
                    draft.slug,
                    draft.dosage_form,
                    draft.generic,
                    draft.strength,
                    draft.manufacturer,
                    draft.package_container,
                    draft.package_size,
                    price,
                ])?;
                imported += 1;
            }
        }

        tx.commit()?;
        tracing::info!(imported, "catalog import complete");
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_price() {
        assert_eq!(extract_price("100 ml bottle: ৳ 40.12"), Some(40.12));
        assert_eq!(extract_price("৳100.00"), Some(100.0));
        assert_eq!(extract_price("500 mg vial: ৳ 28.43"), Some(28.43));
    }

    #[test]
    fn test_extract_price_missing() {
        assert_eq!(extract_price("100 ml bottle"), None);
        assert_eq!(extract_price(""), None);
    }

    #[test]
    fn test_extract_price_whole_number() {
        assert_eq!(extract_price("strip: ৳ 20"), Some(20.0));
    }

    #[test]
    fn test_import_replaces_and_derives_price() {
        let mut db = Database::open_in_memory().unwrap();

        db.create_medicine(&MedicineDraft {
            brand_name: Some("Old".into()),
            ..Default::default()
        })
        .unwrap();

        let drafts = vec![
            MedicineDraft {
                brand_name: Some("A-Cold".into()),
                package_container: Some("100 ml bottle: ৳ 40.12".into()),
                ..Default::default()
            },
            MedicineDraft {
                brand_name: Some("A-Clox".into()),
                package_container: Some("500 mg vial: ৳ 28.43".into()),
                price: Some(30.0), // explicit price wins
                ..Default::default()
            },
        ];

        let imported = db.import_medicines(&drafts).unwrap();
        assert_eq!(imported, 2);
        assert_eq!(db.count_medicines().unwrap(), 2);

        let page = db.list_medicines(0, 10).unwrap();
        assert_eq!(page[0].price, Some(40.12));
        assert_eq!(page[1].price, Some(30.0));
    }
}
