/// Backend boundary: payload types for the three opaque endpoints and the
/// fetch/timer helpers used by the pages
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const GENERATE_NOTES_URL: &str = "/generate_notes";
pub const QNA_STATUS_URL: &str = "/qna_status";
pub const ASK_QUESTION_URL: &str = "/ask_question";

/// Response envelope of `POST /generate_notes`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "status")]
pub enum NotesResponse {
    #[serde(rename = "success")]
    Success {
        notes: String,
        #[serde(default)]
        word_count: Option<u64>,
        #[serde(default)]
        processing_time: Option<f64>,
    },
    #[serde(rename = "processing")]
    Processing {
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    },
}

impl NotesResponse {
    /// Text to surface for an explicit backend error payload
    pub fn error_text(message: Option<String>, error: Option<String>) -> String {
        message
            .or(error)
            .unwrap_or_else(|| "Failed to generate notes.".to_string())
    }
}

/// Response of `GET /qna_status`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QnaStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub chunks_loaded: u32,
    #[serde(default)]
    pub embeddings_loaded: bool,
}

/// Request body of `POST /ask_question`
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// Response envelope of `POST /ask_question`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "status")]
pub enum AskResponse {
    #[serde(rename = "success")]
    Success {
        answer: String,
        #[serde(default)]
        confidence: f64,
        #[serde(default)]
        has_context: bool,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        answer: Option<String>,
    },
}

/// POST to a backend endpoint and decode the JSON body. The HTTP status is
/// deliberately ignored: the backend carries its envelope in the body even
/// on 202 and 5xx responses.
pub async fn post_json<T>(url: &str, body: Option<String>) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    let opts = RequestInit::new();
    opts.set_method("POST");

    let has_body = body.is_some();
    if let Some(payload) = body {
        opts.set_body(&JsValue::from_str(&payload));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("Failed to build request: {:?}", e))?;

    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("Failed to set headers: {:?}", e))?;
    }

    decode_response(fetch(&request).await?).await
}

/// GET a backend endpoint and decode the JSON body
pub async fn get_json<T>(url: &str) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("Failed to build request: {:?}", e))?;

    decode_response(fetch(&request).await?).await
}

async fn fetch(request: &Request) -> Result<Response, String> {
    let window = web_sys::window().ok_or_else(|| "No window available".to_string())?;

    let response_js = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;

    response_js
        .dyn_into::<Response>()
        .map_err(|e| format!("Unexpected fetch result: {:?}", e))
}

async fn decode_response<T>(response: Response) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    let json_promise = response
        .json()
        .map_err(|e| format!("Response had no body: {:?}", e))?;

    let json = JsFuture::from(json_promise)
        .await
        .map_err(|e| format!("Failed to read response body: {:?}", e))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("Failed to parse response: {:?}", e))
}

/// Resolve after `ms` milliseconds via a browser timer; used as the polling
/// delay between `/generate_notes` attempts
pub async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}
