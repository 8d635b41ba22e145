//! HTTP routes.

pub mod chat;
pub mod medicines;
pub mod prescription;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(medicines::health))
        .route(
            "/api/medicines",
            get(medicines::list).post(medicines::create),
        )
        .route("/api/medicines/search", get(medicines::search))
        .route(
            "/api/medicines/:id",
            get(medicines::get_one)
                .put(medicines::update)
                .delete(medicines::delete),
        )
        .route("/api/statistics", get(medicines::statistics))
        .route("/api/filters", get(medicines::filters))
        .route("/explain-image", post(prescription::explain_image))
        .route("/chatbot/message", post(chat::message))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use medshelf_core::db::Database;
    use medshelf_core::models::{ExtractedMedicine, MedicineDraft};
    use medshelf_core::reconcile::{SearchError, SearchHit, SearchProvider};
    use medshelf_providers::{AssistantClient, GeminiError, GeminiResult};

    use crate::state::AppState;

    /// Search stub returning a fixed set of hits.
    pub struct StubSearch {
        pub hits: Vec<SearchHit>,
        pub fail: bool,
    }

    impl SearchProvider for StubSearch {
        fn search(
            &self,
            _query: &str,
            _max_results: u32,
            _region: Option<&str>,
        ) -> Result<Vec<SearchHit>, SearchError> {
            if self.fail {
                return Err(SearchError::Timeout("stub".into()));
            }
            Ok(self.hits.clone())
        }
    }

    /// Assistant stub returning canned extraction and chat responses.
    pub struct StubAssistant {
        pub medicines: Vec<ExtractedMedicine>,
        pub chat_response: String,
        pub fail: bool,
    }

    impl AssistantClient for StubAssistant {
        fn extract_medicines(&self, _image: &[u8]) -> GeminiResult<Vec<ExtractedMedicine>> {
            if self.fail {
                return Err(GeminiError::EmptyResponse);
            }
            Ok(self.medicines.clone())
        }

        fn chat(
            &self,
            _medicine_information: Option<&str>,
            _message: &str,
        ) -> GeminiResult<String> {
            if self.fail {
                return Err(GeminiError::EmptyResponse);
            }
            Ok(self.chat_response.clone())
        }
    }

    /// In-memory state with quiet stubs; tests override providers as needed.
    pub fn test_state() -> AppState {
        state_with(
            StubSearch {
                hits: vec![],
                fail: false,
            },
            StubAssistant {
                medicines: vec![],
                chat_response: String::new(),
                fail: false,
            },
        )
    }

    pub fn state_with(search: StubSearch, assistant: StubAssistant) -> AppState {
        let db = Database::open_in_memory().unwrap();
        AppState::new(db, Arc::new(search), Arc::new(assistant))
    }

    /// Seed a handful of catalog rows.
    pub fn seed_medicines(state: &AppState) {
        let rows = [
            ("Napa", "Paracetamol", "allopathic", "Tablet", Some(0.8)),
            ("Napa Extra", "Paracetamol + Caffeine", "allopathic", "Tablet", Some(2.0)),
            ("Maxpro", "Esomeprazole", "allopathic", "Capsule", Some(7.0)),
            ("Tulsi", "Holy Basil", "herbal", "Syrup", None),
        ];

        let db = state.lock_db().unwrap();
        for (brand, generic, kind, form, price) in rows {
            db.create_medicine(&MedicineDraft {
                brand_name: Some(brand.into()),
                generic: Some(generic.into()),
                kind: Some(kind.into()),
                dosage_form: Some(form.into()),
                price,
                ..Default::default()
            })
            .unwrap();
        }
    }
}
