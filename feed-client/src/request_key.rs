//! Ключи запросов и выбор последнего актуального ответа.
//!
//! Ключ включает значения активных курсоров. Когда параметры меняются,
//! ответ на запрос со старым ключом отбрасывается, а не смешивается с новым.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ключ запроса, зависящий от курсоров.
pub struct QueryKey(String);

fn part(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

impl QueryKey {
    /// `articles-{aIDCursor}-{dCursor}-{offset}`
    pub fn articles(
        article_id_cursor: Option<&str>,
        date_cursor: Option<&str>,
        offset: Option<&str>,
    ) -> Self {
        Self(format!(
            "articles-{}-{}-{}",
            part(article_id_cursor),
            part(date_cursor),
            part(offset)
        ))
    }

    /// `block-articles-{bdCursor}`
    pub fn day_count(block_date_cursor: Option<&str>) -> Self {
        Self(format!("block-articles-{}", part(block_date_cursor)))
    }

    /// `articles-{day}`
    pub fn day(day: &str) -> Self {
        Self(format!("articles-{day}"))
    }

    /// `search-{query}`
    pub fn search(query: &str) -> Self {
        Self(format!("search-{query}"))
    }

    /// Строковое представление ключа.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Слот для результата последнего запроса.
///
/// `begin` запоминает ключ нового запроса; `resolve` принимает результат,
/// только если его ключ совпадает с последним начатым.
pub struct Latest<T> {
    pending: Option<QueryKey>,
    current: Option<(QueryKey, T)>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            pending: None,
            current: None,
        }
    }
}

impl<T> Latest<T> {
    /// Создаёт пустой слот.
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрирует новый запрос.
    ///
    /// Возвращает `false`, если результат по этому ключу уже есть и запрос
    /// можно не отправлять.
    pub fn begin(&mut self, key: QueryKey) -> bool {
        let cached = self
            .current
            .as_ref()
            .is_some_and(|(current, _)| *current == key);
        self.pending = if cached { None } else { Some(key) };
        !cached
    }

    /// Принимает результат запроса. Результат устаревшего ключа игнорируется.
    pub fn resolve(&mut self, key: &QueryKey, value: T) -> bool {
        if self.pending.as_ref() != Some(key) {
            tracing::debug!(key = %key, "dropping superseded response");
            return false;
        }
        self.pending = None;
        self.current = Some((key.clone(), value));
        true
    }

    /// Снимает ожидание без результата (например, запрос завершился ошибкой).
    pub fn fail(&mut self, key: &QueryKey) -> bool {
        if self.pending.as_ref() != Some(key) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Идёт ли запрос.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Последний принятый результат.
    pub fn get(&self) -> Option<&T> {
        self.current.as_ref().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_cursor_values() {
        let key = QueryKey::articles(Some("abc"), None, None);
        assert_eq!(key.as_str(), "articles-abc-null-null");
        assert_ne!(key, QueryKey::articles(None, Some("abc"), None));
    }

    #[test]
    fn stale_response_is_superseded() {
        let mut slot = Latest::new();
        let first = QueryKey::day_count(None);
        let second = QueryKey::day_count(Some("2024-01-05"));

        assert!(slot.begin(first.clone()));
        assert!(slot.begin(second.clone()));

        assert!(!slot.resolve(&first, "old"));
        assert!(slot.is_pending());
        assert!(slot.resolve(&second, "new"));
        assert_eq!(slot.get(), Some(&"new"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn late_response_after_newer_one_is_dropped() {
        let mut slot = Latest::new();
        let a = QueryKey::day("2024-01-05");
        let b = QueryKey::day("2024-01-06");
        slot.begin(a.clone());
        slot.begin(b.clone());
        assert!(slot.resolve(&b, 2));
        assert!(!slot.resolve(&a, 1));
        assert_eq!(slot.get(), Some(&2));
        assert!(!slot.begin(b));
    }

    #[test]
    fn begin_with_current_key_reuses_result() {
        let mut slot = Latest::new();
        let key = QueryKey::search("a23");
        slot.begin(key.clone());
        slot.resolve(&key, vec![1, 2]);
        assert!(!slot.begin(key));
        assert!(!slot.is_pending());
    }

    #[test]
    fn failure_clears_pending_only_for_matching_key() {
        let mut slot: Latest<()> = Latest::new();
        let key = QueryKey::day_count(None);
        slot.begin(key.clone());
        assert!(!slot.fail(&QueryKey::day_count(Some("x"))));
        assert!(slot.fail(&key));
        assert!(!slot.is_pending());
    }
}
