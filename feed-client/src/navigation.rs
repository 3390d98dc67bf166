//! Переходы между страницами ленты и сводки по дням.
//!
//! Каждый переход является чистой функцией: по текущему [`ViewState`] строится новое
//! состояние, активный загрузчик и способ записи в историю. «Назад» не
//! вычисляет обратный курсор, а возвращается по истории.

use crate::dates::date_to_iso_string;
use crate::error::FeedClientResult;
use crate::models::Pagination;
use crate::view_state::ViewState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Какой курсор вызвал текущую загрузку.
pub enum Loader {
    /// Первая загрузка страницы.
    #[default]
    Initial,
    /// Листание вперёд по курсору статьи.
    ArticleIdCursor,
    /// Переход к дате из формы.
    DateCursor,
    /// Листание сводки по дням.
    BlockDateCursor,
}

impl Loader {
    /// Показывать ли загрузку на всю страницу: только при первой загрузке.
    pub fn shows_page_loader(self, pending: bool) -> bool {
        pending && self == Self::Initial
    }

    /// Занята ли кнопка, запустившая загрузку `trigger`.
    pub fn is_busy(self, pending: bool, trigger: Loader) -> bool {
        pending && self == trigger
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Как записать новое состояние в историю.
pub enum HistoryMode {
    /// Новая запись (доступна кнопке «назад»).
    Push,
    /// Замена текущей записи.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Результат перехода.
pub struct Transition {
    /// Новое состояние URL.
    pub state: ViewState,
    /// Загрузчик, который станет активным (`None`: не менять).
    pub loader: Option<Loader>,
    /// Способ записи в историю.
    pub mode: HistoryMode,
}

/// «Путешествие во времени»: переход к статьям указанной даты.
///
/// Ставит `dCursor` в ISO 8601, сбрасывает `aIDCursor` и поисковый запрос.
pub fn time_travel(state: &ViewState, date: &str) -> FeedClientResult<Transition> {
    let date_cursor = date_to_iso_string(date)?;

    let mut next = state.clone();
    next.date_cursor = Some(date_cursor);
    next.article_id_cursor = None;
    next.query = None;

    Ok(Transition {
        state: next,
        loader: Some(Loader::DateCursor),
        mode: HistoryMode::Push,
    })
}

/// «Загрузить ещё»: следующая страница ленты по курсору из прошлого ответа.
///
/// Возвращает `None`, если сервер не прислал курсор (страница последняя).
pub fn load_more(state: &ViewState, pagination: &Pagination) -> Option<Transition> {
    let cursor = pagination.next()?;

    let mut next = state.clone();
    next.article_id_cursor = Some(cursor.to_string());
    next.date_cursor = None;

    Some(Transition {
        state: next,
        loader: Some(Loader::ArticleIdCursor),
        mode: HistoryMode::Push,
    })
}

/// Следующая страница сводки по дням.
pub fn load_more_days(state: &ViewState, pagination: &Pagination) -> Option<Transition> {
    let cursor = pagination.next()?;

    let mut next = state.clone();
    next.block_date_cursor = Some(cursor.to_string());

    Some(Transition {
        state: next,
        loader: Some(Loader::BlockDateCursor),
        mode: HistoryMode::Push,
    })
}

/// Доступна ли кнопка «назад» в ленте: на первой странице нет `aIDCursor`.
pub fn can_go_previous(state: &ViewState) -> bool {
    state.article_id_cursor.is_some()
}

/// Доступна ли кнопка «назад» в сводке по дням.
pub fn can_go_previous_days(state: &ViewState) -> bool {
    state.block_date_cursor.is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Стек состояний, аналог истории браузера для фронтендов без неё.
pub struct History {
    entries: Vec<ViewState>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl History {
    /// История из одной записи.
    pub fn new(initial: ViewState) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    /// Текущее состояние.
    pub fn current(&self) -> &ViewState {
        // В истории всегда есть хотя бы одна запись.
        &self.entries[self.entries.len() - 1]
    }

    /// Глубина истории.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Записывает переход в историю.
    pub fn apply(&mut self, transition: &Transition) {
        match transition.mode {
            HistoryMode::Push => self.entries.push(transition.state.clone()),
            HistoryMode::Replace => {
                let last = self.entries.len() - 1;
                self.entries[last] = transition.state.clone();
            }
        }
    }

    /// Шаг назад. Возвращает `None`, если это первая запись.
    pub fn back(&mut self) -> Option<&ViewState> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    /// Сериализует историю: одна query string на строку, первая самая старая.
    ///
    /// Каждая строка начинается с `?`, поэтому пустое состояние тоже занимает
    /// непустую строку.
    pub fn to_lines(&self) -> String {
        self.entries
            .iter()
            .map(|state| format!("?{}", state.to_query_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Восстанавливает историю из [`History::to_lines`].
    ///
    /// Пустой ввод даёт историю с одним пустым состоянием.
    pub fn from_lines(raw: &str) -> Self {
        let entries: Vec<ViewState> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ViewState::from_query_string)
            .collect();

        if entries.is_empty() {
            return Self::default();
        }
        Self { entries }
    }
}
