//! Medshelf Core Library
//!
//! Medicine inventory catalog with prescription name reconciliation.
//!
//! # Architecture
//!
//! ```text
//! Prescription image → Vision extraction → per-medicine records
//!                                               │
//!                              ┌────────────────▼────────────────┐
//!                              │         Name Reconciler         │
//!                              │  search → domain filter →       │
//!                              │  candidate token → similarity   │
//!                              │  → threshold selection          │
//!                              └────────────────┬────────────────┘
//!                                               │
//!                                   Prescription report
//!                                   (chat context / API response)
//!
//! Inventory catalog (SQLite) ── CRUD / search / statistics ── HTTP layer
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer (catalog CRUD, search, statistics, import)
//! - [`models`]: Domain types (Medicine, ExtractedMedicine, ReconcileOutcome)
//! - [`reconcile`]: Name reconciliation core (scorer, filter, selection)
//! - [`prescription`]: Report assembly over the extraction boundary

pub mod db;
pub mod models;
pub mod prescription;
pub mod reconcile;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    ExtractedMedicine, FilterOptions, InventoryStats, Medicine, MedicineDraft, MedicinePage,
    MedicineSearch, PrescriptionReport, ReconcileOutcome, ReportItem, NO_MATCH_SENTINEL,
};
pub use reconcile::{Reconciler, ReconcilerConfig, SearchHit, SearchProvider};
