use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{ArticlesPage, DayCountPage};
use crate::query::{
    ARTICLES_PATH, ArticlesQuery, DAY_COUNT_PATH, DayCountQuery, SEARCH_PATH, SearchQuery,
    by_day_path,
};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API статей.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn endpoint_with_query(&self, path: &str, query: &str) -> String {
        format!("{}?{}", self.endpoint(path), query)
    }

    async fn decode_error(response: reqwest::Response) -> FeedClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.message,
            Err(_) => None,
        };
        let err = FeedClientError::from_http_status(status.as_u16(), message);
        tracing::warn!(%status, error = %err, "api request failed");
        err
    }

    /// универсальный helper для GET-запросов с json-ответом
    async fn get_json<TRes>(&self, url: String) -> FeedClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .request(Method::GET, url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(response.json::<TRes>().await?)
    }

    /// Страница ленты по курсорам.
    pub async fn list_articles(&self, query: &ArticlesQuery) -> FeedClientResult<ArticlesPage> {
        let url = self.endpoint_with_query(ARTICLES_PATH, &query.to_query_string());
        self.get_json(url).await
    }

    /// Поиск статей по тегу.
    pub async fn search_articles(&self, query: &SearchQuery) -> FeedClientResult<ArticlesPage> {
        let url = self.endpoint_with_query(SEARCH_PATH, &query.to_query_string());
        self.get_json(url).await
    }

    /// Сводка «статей за день».
    pub async fn day_counts(&self, query: &DayCountQuery) -> FeedClientResult<DayCountPage> {
        let url = self.endpoint_with_query(DAY_COUNT_PATH, &query.to_query_string());
        self.get_json(url).await
    }

    /// Статьи за один день. `day` переводится в ISO 8601 и идёт сегментом пути.
    pub async fn articles_by_day(&self, day: &str) -> FeedClientResult<ArticlesPage> {
        let url = self.by_day_url(day)?;
        self.get_json(url).await
    }

    fn by_day_url(&self, day: &str) -> FeedClientResult<String> {
        Ok(self.endpoint(&by_day_path(day)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpClient {
        HttpClient::new(base_url).expect("client should build")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("http://localhost:3000/");
        let full = client.endpoint("/api/v0.1/articles");
        assert_eq!(full, "http://localhost:3000/api/v0.1/articles");
    }

    #[test]
    fn list_url_carries_every_parameter() {
        let client = client("http://localhost:3000");
        let query = ArticlesQuery {
            limit: 20,
            article_id_cursor: "abc".to_string(),
            ..ArticlesQuery::default()
        };
        let url = client.endpoint_with_query(ARTICLES_PATH, &query.to_query_string());
        assert_eq!(
            url,
            "http://localhost:3000/api/v0.1/articles?limit=20&articleIDCursor=abc&dateCursor=&offset="
        );
    }

    #[test]
    fn by_day_url_uses_iso_segment() {
        let client = client("http://localhost:3000");
        let url = client.by_day_url("2024-01-05").expect("valid day");
        assert_eq!(
            url,
            "http://localhost:3000/api/v0.1/articles/day/2024-01-05T00:00:00.000Z"
        );
    }

    #[test]
    fn by_day_url_rejects_invalid_day() {
        let client = client("http://localhost:3000");
        assert!(matches!(
            client.by_day_url("yesterday"),
            Err(FeedClientError::InvalidDate(_))
        ));
    }
}
