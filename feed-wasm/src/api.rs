use feed_client::query::{
    ARTICLES_PATH, ArticlesQuery, DAY_COUNT_PATH, DayCountQuery, SEARCH_PATH, SearchQuery,
    by_day_path,
};
use feed_client::{ArticlesPage, DayCountPage, FeedClientError};
use gloo_net::http::Request;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://localhost:3000",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
    Invalid(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<FeedClientError> for ApiError {
    fn from(value: FeedClientError) -> Self {
        Self::Invalid(value.user_message())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let fallback = match status {
        400 => "Некорректный запрос".to_string(),
        404 => "Ресурс не найден".to_string(),
        429 => "Слишком много запросов, попробуйте позже".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback);

    ApiError::Http { status, message }
}

async fn get<T: DeserializeOwned>(url: String) -> Result<T, ApiError> {
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn list_articles(query: &ArticlesQuery) -> Result<ArticlesPage, ApiError> {
    get(format!("{}?{}", endpoint(ARTICLES_PATH), query.to_query_string())).await
}

pub(crate) async fn search_articles(query: &SearchQuery) -> Result<ArticlesPage, ApiError> {
    get(format!("{}?{}", endpoint(SEARCH_PATH), query.to_query_string())).await
}

pub(crate) async fn day_counts(query: &DayCountQuery) -> Result<DayCountPage, ApiError> {
    get(format!("{}?{}", endpoint(DAY_COUNT_PATH), query.to_query_string())).await
}

pub(crate) async fn articles_by_day(day: &str) -> Result<ArticlesPage, ApiError> {
    let path = by_day_path(day)?;
    get(endpoint(&path)).await
}
