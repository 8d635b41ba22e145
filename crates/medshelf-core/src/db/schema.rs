//! SQLite schema definition.

/// Complete database schema for medshelf.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    brand_id INTEGER,
    brand_name TEXT,
    type TEXT,
    slug TEXT,
    dosage_form TEXT,
    generic TEXT,
    strength TEXT,
    manufacturer TEXT,
    package_container TEXT,
    package_size TEXT,
    price REAL
);

CREATE INDEX IF NOT EXISTS idx_medicines_brand_id ON medicines(brand_id);
CREATE INDEX IF NOT EXISTS idx_medicines_brand_name ON medicines(brand_name);
CREATE INDEX IF NOT EXISTS idx_medicines_generic ON medicines(generic);
CREATE INDEX IF NOT EXISTS idx_medicines_type ON medicines(type);
CREATE INDEX IF NOT EXISTS idx_medicines_dosage_form ON medicines(dosage_form);
CREATE INDEX IF NOT EXISTS idx_medicines_manufacturer ON medicines(manufacturer);
"#;
