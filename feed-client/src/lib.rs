//! Клиентская библиотека ленты статей.
//!
//! Содержит модели ответов API, кодирование параметров запросов, состояние
//! экрана (`ViewState`) с переходами пагинации и поиска, а также HTTP-клиент
//! (`FeedClient`, фича `http`).
//!
//! Источник правды для курсоров: query string адресной строки; фронтенды
//! (CLI и браузер) лишь хранят её и применяют переходы из [`navigation`].
#![warn(missing_docs)]

pub mod dates;
mod error;
#[cfg(feature = "http")]
mod http_client;
pub mod images;
mod models;
pub mod navigation;
pub mod query;
pub mod request_key;
pub mod search;
pub mod view_state;

pub use error::{FeedClientError, FeedClientResult};
pub use models::{Article, ArticlesPage, Author, CountArticle, DayCountPage, Page, Pagination};
pub use navigation::{History, HistoryMode, Loader, Transition};
pub use request_key::{Latest, QueryKey};
pub use search::SearchState;
pub use view_state::ViewState;

#[cfg(feature = "http")]
pub use http_client::HttpClient;

#[cfg(feature = "http")]
#[derive(Debug, Clone)]
/// Клиент API статей, принимающий состояние экрана вместо сырых параметров.
pub struct FeedClient {
    http: HttpClient,
    search_limit: u32,
}

#[cfg(feature = "http")]
impl FeedClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            search_limit: query::SEARCH_LIMIT,
        })
    }

    /// Меняет размер страницы поиска.
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Страница ленты для текущего состояния.
    pub async fn articles(&self, state: &ViewState) -> FeedClientResult<ArticlesPage> {
        self.http.list_articles(&state.articles_query()).await
    }

    /// Страница ленты с явным размером.
    pub async fn articles_with_limit(
        &self,
        state: &ViewState,
        limit: u32,
    ) -> FeedClientResult<ArticlesPage> {
        let mut query = state.articles_query();
        query.limit = limit;
        self.http.list_articles(&query).await
    }

    /// Поиск по строке, введённой пользователем.
    pub async fn search(&self, input: &str) -> FeedClientResult<ArticlesPage> {
        let mut query = query::SearchQuery::from_input(input)?;
        query.limit = self.search_limit;
        self.http.search_articles(&query).await
    }

    /// Сводка по дням для текущего состояния.
    pub async fn day_counts(&self, state: &ViewState) -> FeedClientResult<DayCountPage> {
        self.http.day_counts(&state.day_count_query()).await
    }

    /// Статьи за один день.
    pub async fn articles_by_day(&self, day: &str) -> FeedClientResult<ArticlesPage> {
        self.http.articles_by_day(day).await
    }
}
