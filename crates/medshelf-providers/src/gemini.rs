//! Gemini client for prescription extraction and chat.
//!
//! Two uses of the same generateContent endpoint: a vision call that reads
//! medicine mentions off a prescription image as parallel JSON lists, and a
//! search-grounded chat call seeded with the latest reconciliation report.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use medshelf_core::models::ExtractedMedicine;

use crate::prompts;

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout in seconds. Vision calls are slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini API failures.
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("cannot connect to Gemini: {0}")]
    Connect(String),

    #[error("Gemini request timed out: {0}")]
    Timeout(String),

    #[error("Gemini returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed Gemini response: {0}")]
    Parse(String),

    #[error("Gemini returned no candidates")]
    EmptyResponse,
}

pub type GeminiResult<T> = Result<T, GeminiError>;

/// Vision-extraction and chat collaborator.
///
/// A trait seam so the HTTP layer can swap in a stub during tests.
pub trait AssistantClient: Send + Sync {
    /// Read medicine mentions from a prescription image.
    fn extract_medicines(&self, image: &[u8]) -> GeminiResult<Vec<ExtractedMedicine>>;

    /// Answer one chat message, optionally grounded in prescription context.
    fn chat(&self, medicine_information: Option<&str>, message: &str) -> GeminiResult<String>;
}

/// HTTP client for the Gemini generateContent API.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client against an explicit endpoint (tests point this at a
    /// local stub).
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    fn generate(&self, request: &GenerateContentRequest<'_>) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(request).send().map_err(|e| {
            if e.is_connect() {
                GeminiError::Connect(self.base_url.clone())
            } else if e.is_timeout() {
                GeminiError::Timeout(format!("after {}s", self.timeout_secs))
            } else {
                GeminiError::Connect(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeminiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .map_err(|e| GeminiError::Parse(e.to_string()))?;
        parse_generate_response(&text)
    }
}

impl AssistantClient for GeminiClient {
    /// The image is base64-encoded here; callers hand over raw bytes.
    fn extract_medicines(&self, image: &[u8]) -> GeminiResult<Vec<ExtractedMedicine>> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![
                    Part::text(prompts::EXTRACTION_PROMPT),
                    Part::inline_image("image/jpeg", &encoded),
                ],
            }],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                temperature: 0.0,
                response_mime_type: Some("application/json"),
            }),
        };

        tracing::debug!(model = %self.model, bytes = image.len(), "extracting medicines from image");

        let text = self.generate(&request)?;
        parse_extraction_lists(&text)
    }

    /// Grounded in web search and the prescription context when one exists.
    fn chat(&self, medicine_information: Option<&str>, message: &str) -> GeminiResult<String> {
        let instruction = prompts::chat_system_instruction(medicine_information);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part::text(message)],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(&instruction)],
            }),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: None,
        };

        self.generate(&request)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

impl<'a> Part<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_image(mime_type: &'a str, data: &'a str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type, data }),
        }
    }
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull the text out of a generateContent response.
///
/// Text parts of the first candidate are concatenated; grounding metadata
/// and non-text parts are ignored.
pub fn parse_generate_response(json: &str) -> GeminiResult<String> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(json).map_err(|e| GeminiError::Parse(e.to_string()))?;

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or(GeminiError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GeminiError::EmptyResponse);
    }
    Ok(text)
}

/// Parallel lists as the extraction prompt asks for them.
#[derive(Deserialize)]
struct ExtractionLists {
    #[serde(default)]
    fullname: Vec<String>,
    #[serde(default)]
    name: Vec<String>,
    #[serde(default)]
    dosage_type: Vec<String>,
    #[serde(default)]
    strength: Vec<String>,
}

/// Parse the model's parallel-lists JSON into structured records.
///
/// The model sometimes wraps the JSON in prose or code fences; the slice
/// between the first `{` and the last `}` is what gets parsed.
pub fn parse_extraction_lists(text: &str) -> GeminiResult<Vec<ExtractedMedicine>> {
    let start = text
        .find('{')
        .ok_or_else(|| GeminiError::Parse("no JSON object found in response".into()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| GeminiError::Parse("no closing brace found in response".into()))?;

    let lists: ExtractionLists = serde_json::from_str(&text[start..=end])
        .map_err(|e| GeminiError::Parse(e.to_string()))?;

    Ok(ExtractedMedicine::from_parallel_lists(
        lists.fullname,
        lists.name,
        lists.dosage_type,
        lists.strength,
    ))
}
