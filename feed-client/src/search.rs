//! Состояние поиска по тегу.
//!
//! Поиск меняет только параметр `query` и не трогает курсоры ленты.
//! Пока есть результаты поиска, обычная лента скрыта. Ответы сопоставляются
//! с запросом по [`QueryKey::search`]: ответ на устаревший запрос не
//! перетирает результаты более нового.

use crate::error::FeedClientResult;
use crate::models::{Article, ArticlesPage};
use crate::navigation::{HistoryMode, Transition};
use crate::query::SearchQuery;
use crate::request_key::{Latest, QueryKey};
use crate::view_state::ViewState;

#[derive(Debug, Clone, Default, PartialEq)]
/// Результаты поиска и признак непустого поля ввода.
pub struct SearchState {
    has_query_value: bool,
    results: Latest<Vec<Article>>,
}

impl SearchState {
    /// Пустое состояние: показывается обычная лента.
    pub fn new() -> Self {
        Self::default()
    }

    /// Пользователь изменил текст в поле поиска.
    ///
    /// Пустое поле сбрасывает поиск и убирает `query` из URL новой записью
    /// истории; иначе `query` заменяется в текущей записи.
    pub fn on_input(&mut self, state: &ViewState, value: &str) -> Transition {
        let mut next = state.clone();

        if value.is_empty() {
            self.clear();
            next.query = None;
            return Transition {
                state: next,
                loader: None,
                mode: HistoryMode::Push,
            };
        }

        self.has_query_value = true;
        next.query = Some(value.to_string());
        Transition {
            state: next,
            loader: None,
            mode: HistoryMode::Replace,
        }
    }

    /// Отправка формы: валидирует ввод и возвращает запрос и переход.
    ///
    /// Запрос регистрируется под ключом [`SearchState::key_for`]. Если
    /// результаты по тому же запросу уже показаны, [`SearchState::is_pending`]
    /// остаётся `false` и повторно ходить в API не нужно.
    pub fn submit(
        &mut self,
        state: &ViewState,
        value: &str,
    ) -> FeedClientResult<(SearchQuery, Transition)> {
        let query = SearchQuery::from_input(value)?;
        self.has_query_value = true;
        self.results.begin(Self::key_for(&query));

        let mut next = state.clone();
        next.query = Some(query.query.clone());
        let transition = Transition {
            state: next,
            loader: None,
            mode: HistoryMode::Replace,
        };
        Ok((query, transition))
    }

    /// Ключ ответа для запроса поиска.
    pub fn key_for(query: &SearchQuery) -> QueryKey {
        QueryKey::search(&query.query)
    }

    /// Ответ поиска по ключу `key` заменяет показываемый набор.
    ///
    /// Ответ игнорируется, если поле уже очищено или после него был
    /// отправлен другой запрос.
    pub fn on_success(&mut self, key: &QueryKey, page: ArticlesPage) -> bool {
        if !self.has_query_value {
            return false;
        }
        self.results.resolve(key, page.data)
    }

    /// Запрос `key` завершился ошибкой.
    pub fn on_failure(&mut self, key: &QueryKey) -> bool {
        self.results.fail(key)
    }

    /// Ждёт ли поиск ответа.
    pub fn is_pending(&self) -> bool {
        self.has_query_value && self.results.is_pending()
    }

    /// Закрытие поиска: возвращает обычную ленту.
    pub fn clear(&mut self) {
        self.has_query_value = false;
        self.results = Latest::new();
    }

    /// Переход для явного закрытия поиска.
    pub fn close(&mut self, state: &ViewState) -> Transition {
        self.on_input(state, "")
    }

    /// Показывать ли результаты поиска вместо ленты.
    pub fn is_active(&self) -> bool {
        self.has_query_value && self.results.get().is_some()
    }

    /// Показывать ли обычную ленту.
    pub fn shows_feed(&self) -> bool {
        !self.is_active()
    }

    /// Найденные статьи (пусто, если поиск не активен).
    pub fn results(&self) -> &[Article] {
        match self.results.get() {
            Some(results) if self.has_query_value => results.as_slice(),
            _ => &[],
        }
    }

    /// Число найденных статей.
    pub fn result_count(&self) -> usize {
        self.results().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;
    use chrono::{TimeZone, Utc};

    fn article(id: &str) -> Article {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid ts");
        Article {
            id: id.to_string(),
            author_id: "a-1".to_string(),
            tag: "a23".to_string(),
            title: format!("title {id}"),
            href: None,
            image_url: "https://cdn.example.com/a.png".to_string(),
            image_filename: None,
            posted_at: ts,
            read_duration: "3 min read".to_string(),
            created_at: ts,
            updated_at: ts,
            author: None,
        }
    }

    fn page(ids: &[&str]) -> ArticlesPage {
        ArticlesPage {
            status: Some("success".to_string()),
            data: ids.iter().map(|id| article(id)).collect(),
            pagination: Pagination::default(),
        }
    }

    #[test]
    fn submit_sets_query_and_keeps_cursors() {
        let mut search = SearchState::new();
        let state = ViewState::from_query_string("aIDCursor=abc");
        let (query, transition) = search.submit(&state, " a23 ").expect("valid input");

        assert_eq!(query.query, "a23");
        assert_eq!(transition.state.query.as_deref(), Some("a23"));
        assert_eq!(transition.state.article_id_cursor.as_deref(), Some("abc"));
        assert_eq!(transition.mode, HistoryMode::Replace);
    }

    fn submit(search: &mut SearchState, value: &str) -> QueryKey {
        let (query, _) = search.submit(&ViewState::default(), value).expect("valid input");
        SearchState::key_for(&query)
    }

    #[test]
    fn success_hides_feed() {
        let mut search = SearchState::new();
        let key = submit(&mut search, "a23");
        assert!(search.is_pending());
        assert!(search.on_success(&key, page(&["1", "2"])));
        assert!(!search.is_pending());

        assert!(search.is_active());
        assert!(!search.shows_feed());
        assert_eq!(search.result_count(), 2);
    }

    #[test]
    fn clearing_input_restores_feed_and_zeroes_count() {
        let mut search = SearchState::new();
        let state = ViewState::default();
        let typed = search.on_input(&state, "a23");
        let key = submit(&mut search, "a23");
        search.on_success(&key, page(&["1"]));
        assert!(search.is_active());

        let cleared = search.on_input(&typed.state, "");
        assert!(cleared.state.query.is_none());
        assert_eq!(cleared.mode, HistoryMode::Push);
        assert!(search.shows_feed());
        assert_eq!(search.result_count(), 0);
    }

    #[test]
    fn close_action_restores_feed() {
        let mut search = SearchState::new();
        let (query, transition) = search.submit(&ViewState::default(), "a23").expect("valid input");
        search.on_success(&SearchState::key_for(&query), page(&["1"]));

        let closed = search.close(&transition.state);
        assert!(!closed.state.has_query());
        assert!(search.shows_feed());
        assert_eq!(search.result_count(), 0);
    }

    #[test]
    fn late_result_after_clear_is_ignored() {
        let mut search = SearchState::new();
        let key = submit(&mut search, "a23");
        search.clear();
        assert!(!search.on_success(&key, page(&["1"])));
        assert!(search.shows_feed());
        assert!(!search.is_pending());
    }

    #[test]
    fn older_search_response_does_not_replace_newer() {
        let mut search = SearchState::new();
        let first = submit(&mut search, "a1");
        let second = submit(&mut search, "a2");

        assert!(search.on_success(&second, page(&["2"])));
        assert!(!search.on_success(&first, page(&["1", "1b"])));
        assert_eq!(search.result_count(), 1);
        assert_eq!(search.results()[0].id, "2");
        assert!(!search.is_pending());
    }

    #[test]
    fn failed_older_search_keeps_newer_pending() {
        let mut search = SearchState::new();
        let first = submit(&mut search, "a1");
        let second = submit(&mut search, "a2");

        assert!(!search.on_failure(&first));
        assert!(search.is_pending());
        assert!(search.on_failure(&second));
        assert!(!search.is_pending());
    }

    #[test]
    fn repeated_search_reuses_shown_results() {
        let mut search = SearchState::new();
        let key = submit(&mut search, "a23");
        search.on_success(&key, page(&["1"]));

        submit(&mut search, " a23");
        assert!(!search.is_pending());
        assert_eq!(search.result_count(), 1);
    }

    #[test]
    fn submit_rejects_blank_input() {
        let mut search = SearchState::new();
        assert!(search.submit(&ViewState::default(), "  ").is_err());
        assert!(!search.is_pending());
        assert!(search.shows_feed());
    }
}
