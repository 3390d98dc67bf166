use feed_client::{ArticlesPage, DayCountPage, Latest, Loader, SearchState, Transition, ViewState};
use leptos::prelude::*;

use crate::location;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) view: RwSignal<ViewState>,
    pub(crate) loader: RwSignal<Loader>,
    pub(crate) block_loader: RwSignal<Loader>,
    pub(crate) articles: RwSignal<Latest<ArticlesPage>>,
    pub(crate) days: RwSignal<Latest<DayCountPage>>,
    pub(crate) search: RwSignal<SearchState>,
    pub(crate) selected_day: RwSignal<Option<String>>,
    pub(crate) day_articles: RwSignal<Latest<ArticlesPage>>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl AppState {
    pub(crate) fn new(initial: ViewState) -> Self {
        Self {
            view: RwSignal::new(initial),
            loader: RwSignal::new(Loader::Initial),
            block_loader: RwSignal::new(Loader::Initial),
            articles: RwSignal::new(Latest::new()),
            days: RwSignal::new(Latest::new()),
            search: RwSignal::new(SearchState::new()),
            selected_day: RwSignal::new(None),
            day_articles: RwSignal::new(Latest::new()),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    /// Применяет переход: адресная строка, активный загрузчик, состояние экрана.
    pub(crate) fn apply(&self, transition: Transition) {
        if let Err(err) = location::write(&transition) {
            self.set_error(err);
            return;
        }

        if let Some(loader) = transition.loader {
            if loader == Loader::BlockDateCursor {
                self.block_loader.set(loader);
            } else {
                self.loader.set(loader);
            }
        }
        self.view.set(transition.state);
    }

    pub(crate) fn articles_pending(&self) -> bool {
        self.articles.with(|slot| slot.is_pending())
    }

    pub(crate) fn days_pending(&self) -> bool {
        self.days.with(|slot| slot.is_pending())
    }
}
