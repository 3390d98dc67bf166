use feed_client::{QueryKey, ViewState};
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::day_articles::DayArticles;
use crate::components::day_blocks::DayBlocks;
use crate::components::feed_panel::FeedPanel;
use crate::components::search_panel::SearchPanel;
use crate::location;
use crate::state::AppState;

fn load_articles(state: AppState, view: ViewState) {
    let key = view.articles_key();
    let started = state
        .articles
        .try_update(|slot| slot.begin(key.clone()))
        .unwrap_or(false);
    if !started {
        return;
    }
    state.clear_error();

    spawn_local(async move {
        match api::list_articles(&view.articles_query()).await {
            Ok(page) => state.articles.update(|slot| {
                slot.resolve(&key, page);
            }),
            Err(err) => {
                error!("articles request {key} failed: {err}");
                state.articles.update(|slot| {
                    slot.fail(&key);
                });
                state.set_error(err.to_string());
            }
        }
    });
}

fn load_days(state: AppState, view: ViewState) {
    let key = view.day_count_key();
    let started = state
        .days
        .try_update(|slot| slot.begin(key.clone()))
        .unwrap_or(false);
    if !started {
        return;
    }

    spawn_local(async move {
        match api::day_counts(&view.day_count_query()).await {
            Ok(page) => state.days.update(|slot| {
                slot.resolve(&key, page);
            }),
            Err(err) => {
                error!("day count request {key} failed: {err}");
                state.days.update(|slot| {
                    slot.fail(&key);
                });
                state.set_error(err.to_string());
            }
        }
    });
}

fn load_day_articles(state: AppState, day: String) {
    let key = QueryKey::day(&day);
    let started = state
        .day_articles
        .try_update(|slot| slot.begin(key.clone()))
        .unwrap_or(false);
    if !started {
        return;
    }

    spawn_local(async move {
        match api::articles_by_day(&day).await {
            Ok(page) => state.day_articles.update(|slot| {
                slot.resolve(&key, page);
            }),
            Err(err) => {
                error!("articles for {day} failed: {err}");
                state.day_articles.update(|slot| {
                    slot.fail(&key);
                });
                state.set_error(err.to_string());
            }
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(location::read_view_state());

    let popstate = window_event_listener(leptos::ev::popstate, {
        let state = state.clone();
        move |_| {
            let view = location::read_view_state();
            log!("popstate: ?{}", view.to_query_string());
            state.view.set(view);
        }
    });
    on_cleanup(move || popstate.remove());

    let articles_key = Memo::new({
        let state = state.clone();
        move |_| state.view.with(|view| view.articles_key())
    });
    let days_key = Memo::new({
        let state = state.clone();
        move |_| state.view.with(|view| view.day_count_key())
    });

    Effect::new({
        let state = state.clone();
        move |_| {
            articles_key.track();
            load_articles(state.clone(), state.view.get_untracked());
        }
    });
    Effect::new({
        let state = state.clone();
        move |_| {
            days_key.track();
            load_days(state.clone(), state.view.get_untracked());
        }
    });
    Effect::new({
        let state = state.clone();
        move |_| {
            if let Some(day) = state.selected_day.get() {
                load_day_articles(state.clone(), day);
            }
        }
    });

    let error_text = {
        let state = state.clone();
        move || state.error.get().unwrap_or_default()
    };
    let has_error = {
        let state = state.clone();
        move || state.error.with(|error| error.is_some())
    };

    view! {
        <main class="page">
            <section class="container">
                <h1>"Articles"</h1>

                <SearchPanel state=state.clone() />

                <Show when=has_error>
                    <div class="error-banner">
                        <strong>"Ошибка: "</strong>
                        {error_text.clone()}
                    </div>
                </Show>

                <FeedPanel state=state.clone() />

                <DayBlocks state=state.clone() />
                <DayArticles state=state.clone() />
            </section>
        </main>
    }
}
