//! Medicine catalog database operations.

use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{
    FilterOptions, InventoryStats, Medicine, MedicineDraft, MedicinePage, MedicineSearch,
    PriceRange, SearchField, SortOrder,
};

/// Columns selected for every medicine read, in `map_row` order.
const MEDICINE_COLUMNS: &str = "id, brand_id, brand_name, type, slug, dosage_form, \
     generic, strength, manufacturer, package_container, package_size, price";

/// Sortable columns; anything else falls back to brand_name.
const SORTABLE: &[&str] = &[
    "id",
    "brand_id",
    "brand_name",
    "type",
    "slug",
    "dosage_form",
    "generic",
    "strength",
    "manufacturer",
    "package_size",
    "price",
];

impl Database {
    /// Get a medicine by id.
    pub fn get_medicine(&self, id: i64) -> DbResult<Option<Medicine>> {
        let sql = format!("SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?");
        let result = self
            .conn()
            .query_row(&sql, [id], map_row)
            .optional()?;
        Ok(result)
    }

    /// List medicines with offset/limit pagination.
    pub fn list_medicines(&self, skip: u32, limit: u32) -> DbResult<Vec<Medicine>> {
        let sql = format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines ORDER BY id LIMIT ? OFFSET ?"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64, skip as i64], map_row)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?);
        }
        Ok(medicines)
    }

    /// Total medicine count.
    pub fn count_medicines(&self) -> DbResult<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Insert a new medicine, returning the stored record.
    pub fn create_medicine(&self, draft: &MedicineDraft) -> DbResult<Medicine> {
        self.conn().execute(
            r#"
            INSERT INTO medicines (
                brand_id, brand_name, type, slug, dosage_form, generic,
                strength, manufacturer, package_container, package_size, price
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
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
                draft.price,
            ],
        )?;

        let id = self.conn().last_insert_rowid();
        self.get_medicine(id)?
            .ok_or_else(|| super::DbError::NotFound(format!("medicine {id}")))
    }

    /// Partially update a medicine; `None` fields are left unchanged.
    ///
    /// Returns the updated record, or `None` if the id does not exist.
    pub fn update_medicine(&self, id: i64, draft: &MedicineDraft) -> DbResult<Option<Medicine>> {
        let existing = match self.get_medicine(id)? {
            Some(m) => m,
            None => return Ok(None),
        };

        self.conn().execute(
            r#"
            UPDATE medicines SET
                brand_id = ?1, brand_name = ?2, type = ?3, slug = ?4,
                dosage_form = ?5, generic = ?6, strength = ?7, manufacturer = ?8,
                package_container = ?9, package_size = ?10, price = ?11
            WHERE id = ?12
            "#,
            params![
                draft.brand_id.or(existing.brand_id),
                draft.brand_name.clone().or(existing.brand_name),
                draft.kind.clone().or(existing.kind),
                draft.slug.clone().or(existing.slug),
                draft.dosage_form.clone().or(existing.dosage_form),
                draft.generic.clone().or(existing.generic),
                draft.strength.clone().or(existing.strength),
                draft.manufacturer.clone().or(existing.manufacturer),
                draft.package_container.clone().or(existing.package_container),
                draft.package_size.clone().or(existing.package_size),
                draft.price.or(existing.price),
                id,
            ],
        )?;

        self.get_medicine(id)
    }

    /// Delete a medicine by id. Returns false when the id does not exist.
    pub fn delete_medicine(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn()
            .execute("DELETE FROM medicines WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Advanced search with filters, exact-match-first ranking, sorting and
    /// pagination.
    pub fn search_medicines(&self, search: &MedicineSearch) -> DbResult<MedicinePage> {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(kind) = &search.kind {
            clauses.push("lower(type) LIKE ?".into());
            args.push(Box::new(like_pattern(kind)));
        }
        if let Some(form) = &search.dosage_form {
            clauses.push("lower(dosage_form) LIKE ?".into());
            args.push(Box::new(like_pattern(form)));
        }
        if let Some(min) = search.min_price {
            clauses.push("price >= ?".into());
            args.push(Box::new(min));
        }
        if let Some(max) = search.max_price {
            clauses.push("price <= ?".into());
            args.push(Box::new(max));
        }

        let name_column = match search.search_field {
            SearchField::BrandName => "brand_name",
            SearchField::GenericName => "generic",
        };

        // Exact matches rank before partial matches when a query is present.
        let mut order_parts: Vec<String> = Vec::new();
        if let Some(query) = search.query.as_deref().filter(|q| !q.is_empty()) {
            clauses.push(format!("lower({name_column}) LIKE ?"));
            args.push(Box::new(like_pattern(query)));

            order_parts.push(format!(
                "CASE WHEN lower({name_column}) = ? THEN 0 ELSE 1 END"
            ));
            args.push(Box::new(query.to_lowercase()));
        }

        let sort_column = if SORTABLE.contains(&search.sort_by.as_str()) {
            search.sort_by.as_str()
        } else {
            "brand_name"
        };
        let direction = match search.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        order_parts.push(format!("{sort_column} {direction}"));

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        // Count takes the filter args only, not the ORDER BY ones.
        let filter_arg_count = clauses.len();
        let count_sql = format!("SELECT COUNT(*) FROM medicines{where_sql}");
        let total: i64 = self.conn().query_row(
            &count_sql,
            params_from_iter(args.iter().take(filter_arg_count).map(|a| a.as_ref())),
            |row| row.get(0),
        )?;

        let per_page = search.per_page.max(1);
        let offset = (search.page.max(1) - 1) as i64 * per_page as i64;
        let select_sql = format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines{where_sql} ORDER BY {} LIMIT ? OFFSET ?",
            order_parts.join(", ")
        );
        args.push(Box::new(per_page as i64));
        args.push(Box::new(offset));

        let mut stmt = self.conn().prepare(&select_sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter().map(|a| a.as_ref())), map_row)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?);
        }

        Ok(MedicinePage::new(
            medicines,
            total as u64,
            search.page.max(1),
            per_page,
        ))
    }

    /// Aggregate inventory statistics. NULL prices are excluded from the
    /// price aggregates; an empty table yields zeros.
    pub fn inventory_stats(&self) -> DbResult<InventoryStats> {
        let total_medicines = self.count_medicines()?;

        let distinct = |column: &str| -> DbResult<u64> {
            let sql = format!(
                "SELECT COUNT(DISTINCT {column}) FROM medicines WHERE {column} IS NOT NULL"
            );
            let count: i64 = self.conn().query_row(&sql, [], |row| row.get(0))?;
            Ok(count as u64)
        };

        let (average_price, min_price, max_price): (Option<f64>, Option<f64>, Option<f64>) =
            self.conn().query_row(
                "SELECT AVG(price), MIN(price), MAX(price) FROM medicines WHERE price IS NOT NULL",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        Ok(InventoryStats {
            total_medicines,
            total_manufacturers: distinct("manufacturer")?,
            total_types: distinct("type")?,
            total_dosage_forms: distinct("dosage_form")?,
            average_price: average_price.unwrap_or(0.0),
            price_range: PriceRange {
                min: min_price.unwrap_or(0.0),
                max: max_price.unwrap_or(0.0),
            },
        })
    }

    /// Distinct non-null type and dosage-form values, sorted.
    pub fn filter_options(&self) -> DbResult<FilterOptions> {
        let distinct_sorted = |column: &str| -> DbResult<Vec<String>> {
            let sql = format!(
                "SELECT DISTINCT {column} FROM medicines \
                 WHERE {column} IS NOT NULL ORDER BY {column}"
            );
            let mut stmt = self.conn().prepare(&sql)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut values = Vec::new();
            for row in rows {
                values.push(row?);
            }
            Ok(values)
        };

        Ok(FilterOptions {
            types: distinct_sorted("type")?,
            dosage_forms: distinct_sorted("dosage_form")?,
        })
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Medicine> {
    Ok(Medicine {
        id: row.get(0)?,
        brand_id: row.get(1)?,
        brand_name: row.get(2)?,
        kind: row.get(3)?,
        slug: row.get(4)?,
        dosage_form: row.get(5)?,
        generic: row.get(6)?,
        strength: row.get(7)?,
        manufacturer: row.get(8)?,
        package_container: row.get(9)?,
        package_size: row.get(10)?,
        price: row.get(11)?,
    })
}

/// Lower-cased `%...%` LIKE pattern for case-insensitive substring matching.
fn like_pattern(value: &str) -> String {
    format!("%{}%", value.to_lowercase())
}
