use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Автор статьи.
pub struct Author {
    /// Идентификатор автора.
    pub id: String,
    /// Имя автора.
    pub name: String,
    /// Ссылка на аватар.
    pub avatar_url: String,
    /// Имя файла аватара в хранилище.
    #[serde(default)]
    pub avatar_filename: Option<String>,
    /// Ссылка на страницу автора.
    #[serde(default)]
    pub page_url: Option<String>,
    /// Дата и время создания записи (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления записи (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Статья ленты.
pub struct Article {
    /// Идентификатор статьи.
    pub id: String,
    /// Идентификатор автора.
    #[serde(rename = "authorID")]
    pub author_id: String,
    /// Тег-индекс статьи, по нему работает поиск.
    pub tag: String,
    /// Заголовок.
    pub title: String,
    /// Ссылка на оригинал статьи.
    #[serde(default)]
    pub href: Option<String>,
    /// Ссылка на обложку.
    pub image_url: String,
    /// Имя файла обложки в хранилище.
    #[serde(default)]
    pub image_filename: Option<String>,
    /// Дата публикации (UTC).
    pub posted_at: DateTime<Utc>,
    /// Время чтения, например `"5 min read"`.
    #[serde(default)]
    pub read_duration: String,
    /// Дата и время создания записи (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления записи (UTC).
    pub updated_at: DateTime<Utc>,
    /// Автор, если сервер вложил его в ответ.
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Количество статей, опубликованных за один день.
pub struct CountArticle {
    /// День в том виде, в каком его прислал сервер.
    pub date: String,
    /// Число статей за день.
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Курсоры пагинации из ответа сервера.
///
/// Курсоры непрозрачны: клиент передаёт их обратно без изменений.
pub struct Pagination {
    /// Курсор следующей страницы.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Курсор предыдущей страницы.
    #[serde(default)]
    pub prev_cursor: Option<String>,
    /// Размер страницы, применённый сервером.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Число записей в текущей странице.
    #[serde(default)]
    pub count: Option<u32>,
    /// Всего дней со статьями (только для сводки по дням).
    #[serde(default)]
    pub total_days: Option<u64>,
}

impl Pagination {
    /// Курсор следующей страницы, если он непустой.
    pub fn next(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }

    /// Курсор предыдущей страницы, если он непустой.
    pub fn prev(&self) -> Option<&str> {
        self.prev_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Конверт ответа: данные страницы и курсоры.
pub struct Page<T> {
    /// Статус ответа (`"success"`).
    #[serde(default)]
    pub status: Option<String>,
    /// Записи текущей страницы.
    pub data: Vec<T>,
    /// Курсоры; пустые, если сервер их не прислал.
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            status: None,
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Страница статей.
pub type ArticlesPage = Page<Article>;
/// Страница сводки «статей за день».
pub type DayCountPage = Page<CountArticle>;

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_JSON: &str = r#"{
        "id": "7b1c",
        "authorID": "a-1",
        "tag": "a23",
        "title": "Bitcoin halving",
        "href": "https://hackernoon.com/bitcoin-halving",
        "imageUrl": "https://cdn.example.com/a.png?w=300",
        "imageFilename": "a.png",
        "postedAt": "2024-03-02T00:00:00Z",
        "readDuration": "5 min read",
        "createdAt": "2024-03-02T10:00:00Z",
        "updatedAt": "2024-03-02T10:00:00Z",
        "author": {
            "id": "a-1",
            "name": "satoshi",
            "avatarUrl": "https://cdn.example.com/s.png",
            "pageUrl": "https://hackernoon.com/u/satoshi",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }
    }"#;

    #[test]
    fn article_deserializes_camel_case_fields() {
        let article: Article = serde_json::from_str(ARTICLE_JSON).expect("article should parse");
        assert_eq!(article.author_id, "a-1");
        assert_eq!(article.tag, "a23");
        assert_eq!(article.read_duration, "5 min read");
        let author = article.author.expect("author embedded");
        assert_eq!(author.name, "satoshi");
        assert!(author.avatar_filename.is_none());
    }

    #[test]
    fn page_without_pagination_uses_empty_cursors() {
        let raw = r#"{"status":"success","data":[]}"#;
        let page: ArticlesPage = serde_json::from_str(raw).expect("page should parse");
        assert!(page.data.is_empty());
        assert_eq!(page.pagination, Pagination::default());
    }

    #[test]
    fn day_count_page_reads_pagination_fields() {
        let raw = r#"{
            "status": "success",
            "data": [{"date": "2024-01-05", "count": 12}],
            "pagination": {"limit": 20, "nextCursor": "2024-01-05", "totalDays": 300, "count": 1}
        }"#;
        let page: DayCountPage = serde_json::from_str(raw).expect("page should parse");
        assert_eq!(page.data[0].count, 12);
        assert_eq!(page.pagination.next(), Some("2024-01-05"));
        assert_eq!(page.pagination.total_days, Some(300));
    }

    #[test]
    fn empty_cursor_is_treated_as_missing() {
        let pagination = Pagination {
            next_cursor: Some(String::new()),
            ..Pagination::default()
        };
        assert!(pagination.next().is_none());
    }
}
