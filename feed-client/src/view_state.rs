//! Состояние экрана, которое живёт в query string адресной строки.
//!
//! `ViewState` является единственным источником правды для курсоров и поискового
//! запроса. Из него выводятся параметры запросов к API и ключи запросов.

use url::form_urlencoded;

use crate::query::{ARTICLES_LIMIT, ArticlesQuery, DAY_COUNT_LIMIT, DayCountQuery};
use crate::request_key::QueryKey;

/// Курсор по идентификатору статьи.
pub const ARTICLE_ID_CURSOR_PARAM: &str = "aIDCursor";
/// Курсор по дате («путешествие во времени»).
pub const DATE_CURSOR_PARAM: &str = "dCursor";
/// Смещение.
pub const OFFSET_PARAM: &str = "offset";
/// Поисковый запрос.
pub const QUERY_PARAM: &str = "query";
/// Курсор по дате для сводки по дням.
pub const BLOCK_DATE_CURSOR_PARAM: &str = "bdCursor";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Параметры URL, которыми владеет клиент.
pub struct ViewState {
    /// `aIDCursor`
    pub article_id_cursor: Option<String>,
    /// `dCursor`
    pub date_cursor: Option<String>,
    /// `offset`
    pub offset: Option<String>,
    /// `query`
    pub query: Option<String>,
    /// `bdCursor`
    pub block_date_cursor: Option<String>,
    /// Чужие параметры, сохраняются как есть.
    pub extra: Vec<(String, String)>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl ViewState {
    /// Разбирает query string (с ведущим `?` или без).
    ///
    /// Пустые значения считаются отсутствующими; при повторе ключа
    /// побеждает первое значение, как у `URLSearchParams.get`.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut state = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            let slot = match key.as_ref() {
                ARTICLE_ID_CURSOR_PARAM => &mut state.article_id_cursor,
                DATE_CURSOR_PARAM => &mut state.date_cursor,
                OFFSET_PARAM => &mut state.offset,
                QUERY_PARAM => &mut state.query,
                BLOCK_DATE_CURSOR_PARAM => &mut state.block_date_cursor,
                _ => {
                    state.extra.push((key.to_string(), value));
                    continue;
                }
            };
            if slot.is_none() {
                *slot = non_empty(value);
            }
        }

        state
    }

    /// Собирает query string без ведущего `?`; отсутствующие параметры пропускаются.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.known_params() {
            serializer.append_pair(key, value);
        }
        for (key, value) in &self.extra {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn known_params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ARTICLE_ID_CURSOR_PARAM, &self.article_id_cursor),
            (DATE_CURSOR_PARAM, &self.date_cursor),
            (OFFSET_PARAM, &self.offset),
            (QUERY_PARAM, &self.query),
            (BLOCK_DATE_CURSOR_PARAM, &self.block_date_cursor),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }

    /// Запрос ленты для текущего состояния.
    pub fn articles_query(&self) -> ArticlesQuery {
        ArticlesQuery {
            limit: ARTICLES_LIMIT,
            article_id_cursor: self.article_id_cursor.clone().unwrap_or_default(),
            date_cursor: self.date_cursor.clone().unwrap_or_default(),
            // Лента всегда отправляет пустое смещение.
            offset: String::new(),
        }
    }

    /// Запрос сводки по дням для текущего состояния.
    pub fn day_count_query(&self) -> DayCountQuery {
        DayCountQuery {
            limit: DAY_COUNT_LIMIT,
            date_cursor: self.block_date_cursor.clone().unwrap_or_default(),
        }
    }

    /// Ключ запроса ленты.
    pub fn articles_key(&self) -> QueryKey {
        QueryKey::articles(
            self.article_id_cursor.as_deref(),
            self.date_cursor.as_deref(),
            self.offset.as_deref(),
        )
    }

    /// Ключ запроса сводки по дням.
    pub fn day_count_key(&self) -> QueryKey {
        QueryKey::day_count(self.block_date_cursor.as_deref())
    }

    /// Есть ли активный поисковый запрос.
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }
}
