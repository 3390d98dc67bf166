//! История состояний экрана между запусками CLI.
//!
//! Файл хранит по одной query string на строку (с ведущим `?`); последняя строка содержит текущее
//! состояние. Команда `prev` снимает верхнюю запись, как «назад» в браузере.

use std::fs;
use std::io;
use std::path::Path;

use feed_client::History;

pub(crate) fn load_history(path: &Path) -> io::Result<History> {
    if !path.exists() {
        return Ok(History::default());
    }

    let raw = fs::read_to_string(path)?;
    Ok(History::from_lines(&raw))
}

pub(crate) fn save_history(path: &Path, history: &History) -> io::Result<()> {
    fs::write(path, history.to_lines())
}

pub(crate) fn clear_history(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_client::{Pagination, SearchState, ViewState, navigation};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock must be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("feed_session_{name}_{nanos}"))
    }

    #[test]
    fn missing_file_gives_fresh_history() {
        let history = load_history(&temp_path("missing")).expect("load must succeed");
        assert_eq!(history, History::default());
    }

    #[test]
    fn history_survives_save_and_load() {
        let path = temp_path("roundtrip");
        let mut history = History::default();
        let pagination = Pagination {
            next_cursor: Some("cur-2".to_string()),
            ..Pagination::default()
        };
        let transition =
            navigation::load_more(history.current(), &pagination).expect("has cursor");
        history.apply(&transition);

        save_history(&path, &history).expect("save must succeed");
        let restored = load_history(&path).expect("load must succeed");
        assert_eq!(restored, history);
        assert_eq!(restored.current().article_id_cursor.as_deref(), Some("cur-2"));

        clear_history(&path).expect("clear must succeed");
        assert!(!path.exists());
        clear_history(&path).expect("clearing twice is fine");
    }

    #[test]
    fn trailing_empty_state_survives_reload() {
        let path = temp_path("empty_tail");
        let mut search = SearchState::new();
        let mut history = History::default();
        let (_, submitted) = search
            .submit(history.current(), "a23")
            .expect("valid input");
        history.apply(&submitted);
        history.apply(&search.close(history.current()));

        save_history(&path, &history).expect("save must succeed");
        let restored = load_history(&path).expect("load must succeed");
        assert_eq!(restored, history);
        assert_eq!(restored.current(), &ViewState::default());

        clear_history(&path).expect("clear must succeed");
    }

    #[test]
    fn cleared_search_survives_reload() {
        let path = temp_path("clear_search");
        let mut history = History::default();

        let travel = navigation::time_travel(history.current(), "2024-01-05").expect("valid date");
        history.apply(&travel);

        let mut search = SearchState::new();
        let (_, submitted) = search
            .submit(history.current(), "a23")
            .expect("valid input");
        history.apply(&submitted);
        save_history(&path, &history).expect("save must succeed");

        let mut history = load_history(&path).expect("load must succeed");
        history.apply(&search.close(history.current()));
        save_history(&path, &history).expect("save must succeed");

        let mut restored = load_history(&path).expect("load must succeed");
        assert_eq!(restored, history);
        assert_eq!(restored.len(), 3);
        assert!(!restored.current().has_query());

        let previous = restored.back().expect("search entry").clone();
        assert_eq!(previous.query.as_deref(), Some("a23"));
        assert_eq!(
            previous.date_cursor.as_deref(),
            Some("2024-01-05T00:00:00.000Z")
        );

        clear_history(&path).expect("clear must succeed");
    }
}
