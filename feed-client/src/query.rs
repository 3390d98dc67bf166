//! Параметры запросов к API и их кодирование в query string.
//!
//! Все параметры передаются всегда и в фиксированном порядке: отсутствующее
//! значение уходит пустой строкой, а не выбрасывается из запроса.

use url::form_urlencoded;
use validator::Validate;

use crate::dates::date_to_iso_string;
use crate::error::FeedClientResult;

/// Лента статей.
pub const ARTICLES_PATH: &str = "/api/v0.1/articles";
/// Поиск статей.
pub const SEARCH_PATH: &str = "/api/v0.1/articles/search";
/// Сводка «статей за день».
pub const DAY_COUNT_PATH: &str = "/api/v0.1/articles/count-per-day";
/// Статьи за день; дата в ISO 8601 добавляется сегментом пути.
pub const BY_DAY_PATH: &str = "/api/v0.1/articles/day";

/// Размер страницы ленты.
pub const ARTICLES_LIMIT: u32 = 20;
/// Размер страницы поиска.
pub const SEARCH_LIMIT: u32 = 18;
/// Размер страницы сводки по дням.
pub const DAY_COUNT_LIMIT: u32 = 20;

fn encode(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Запрос страницы ленты.
pub struct ArticlesQuery {
    /// Размер страницы.
    pub limit: u32,
    /// Курсор по идентификатору статьи.
    pub article_id_cursor: String,
    /// Курсор по дате.
    pub date_cursor: String,
    /// Смещение.
    pub offset: String,
}

impl ArticlesQuery {
    /// `limit=..&articleIDCursor=..&dateCursor=..&offset=..`
    pub fn to_query_string(&self) -> String {
        let limit = self.limit.to_string();
        encode(&[
            ("limit", &limit),
            ("articleIDCursor", &self.article_id_cursor),
            ("dateCursor", &self.date_cursor),
            ("offset", &self.offset),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
/// Поисковый запрос.
pub struct SearchQuery {
    /// Размер страницы.
    pub limit: u32,
    /// Строка поиска (тег-индекс, например `a23`).
    #[validate(length(min = 1, max = 255))]
    pub query: String,
    /// Курсор по идентификатору статьи.
    pub article_id_cursor: String,
    /// Курсор по дате.
    pub date_cursor: String,
    /// Смещение.
    pub offset: String,
}

impl SearchQuery {
    /// Собирает запрос из ввода пользователя: обрезает пробелы и валидирует.
    pub fn from_input(raw: &str) -> FeedClientResult<Self> {
        let query = Self {
            limit: SEARCH_LIMIT,
            query: raw.trim().to_string(),
            ..Self::default()
        };
        query.validate()?;
        Ok(query)
    }

    /// `limit=..&query=..&articleIDCursor=..&dateCursor=..&offset=..`
    pub fn to_query_string(&self) -> String {
        let limit = self.limit.to_string();
        encode(&[
            ("limit", &limit),
            ("query", &self.query),
            ("articleIDCursor", &self.article_id_cursor),
            ("dateCursor", &self.date_cursor),
            ("offset", &self.offset),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Запрос сводки «статей за день».
pub struct DayCountQuery {
    /// Сколько дней вернуть.
    pub limit: u32,
    /// Курсор по дате (последний день предыдущей страницы).
    pub date_cursor: String,
}

impl DayCountQuery {
    /// `limit=..&dateCursor=..`
    pub fn to_query_string(&self) -> String {
        let limit = self.limit.to_string();
        encode(&[("limit", &limit), ("dateCursor", &self.date_cursor)])
    }
}

/// Путь запроса статей за день: `/api/v0.1/articles/day/{ISO 8601}`.
///
/// ISO-строка состоит из цифр, `-`, `:`, `.`, `T` и `Z` и не требует экранирования.
pub fn by_day_path(day: &str) -> FeedClientResult<String> {
    let posted_at = date_to_iso_string(day)?;
    Ok(format!("{BY_DAY_PATH}/{posted_at}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedClientError;
    use pretty_assertions::assert_eq;

    #[test]
    fn articles_query_keeps_empty_fields() {
        let query = ArticlesQuery {
            limit: 20,
            ..ArticlesQuery::default()
        };
        assert_eq!(
            query.to_query_string(),
            "limit=20&articleIDCursor=&dateCursor=&offset="
        );
    }

    #[test]
    fn articles_query_encodes_cursor_values() {
        let query = ArticlesQuery {
            limit: 20,
            article_id_cursor: "a/b c".to_string(),
            date_cursor: "2024-01-05T00:00:00.000Z".to_string(),
            offset: String::new(),
        };
        assert_eq!(
            query.to_query_string(),
            "limit=20&articleIDCursor=a%2Fb+c&dateCursor=2024-01-05T00%3A00%3A00.000Z&offset="
        );
    }

    #[test]
    fn search_query_orders_parameters() {
        let query = SearchQuery {
            limit: 18,
            query: "a23&b".to_string(),
            ..SearchQuery::default()
        };
        assert_eq!(
            query.to_query_string(),
            "limit=18&query=a23%26b&articleIDCursor=&dateCursor=&offset="
        );
    }

    #[test]
    fn search_query_from_input_trims() {
        let query = SearchQuery::from_input("  a23 ").expect("valid query");
        assert_eq!(query.query, "a23");
        assert_eq!(query.limit, SEARCH_LIMIT);
    }

    #[test]
    fn search_query_rejects_blank_and_long_input() {
        assert!(matches!(
            SearchQuery::from_input("   "),
            Err(FeedClientError::InvalidRequest(_))
        ));
        let long = "x".repeat(256);
        assert!(SearchQuery::from_input(&long).is_err());
    }

    #[test]
    fn by_day_path_converts_day_to_iso() {
        assert_eq!(
            by_day_path("2024-01-05").expect("valid day"),
            "/api/v0.1/articles/day/2024-01-05T00:00:00.000Z"
        );
        assert!(by_day_path("yesterday").is_err());
    }

    #[test]
    fn day_count_query_string() {
        let query = DayCountQuery {
            limit: 20,
            date_cursor: "2024-01-05".to_string(),
        };
        assert_eq!(query.to_query_string(), "limit=20&dateCursor=2024-01-05");
    }
}
