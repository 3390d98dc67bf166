use feed_client::Article;
use feed_client::dates::format_date;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::components::article_card::ArticleCard;
use crate::state::AppState;

fn empty_message(day: &str) -> String {
    let label = format_date(day).unwrap_or_else(|_| day.to_string());
    format!("No Articles for {label}")
}

/// Статьи выбранного дня из сводки.
#[component]
pub(crate) fn DayArticles(state: AppState) -> impl IntoView {
    let selected = {
        let state = state.clone();
        move || state.selected_day.with(|day| day.is_some())
    };
    let articles = {
        let state = state.clone();
        move || -> Vec<Article> {
            state
                .day_articles
                .with(|slot| slot.get().map(|page| page.data.clone()).unwrap_or_default())
        }
    };
    let is_empty = {
        let state = state.clone();
        move || {
            state.day_articles.with(|slot| {
                !slot.is_pending() && slot.get().is_some_and(|page| page.data.is_empty())
            })
        }
    };
    let message = {
        let state = state.clone();
        move || {
            state
                .selected_day
                .get()
                .map(|day| empty_message(&day))
                .unwrap_or_default()
        }
    };
    let on_close = {
        let state = state.clone();
        move |_: MouseEvent| state.selected_day.set(None)
    };

    view! {
        <Show when=selected>
            <section class="day-articles">
                <button on:click=on_close.clone()>"Close"</button>
                <Show
                    when={
                        let is_empty = is_empty.clone();
                        move || !is_empty()
                    }
                    fallback={
                        let message = message.clone();
                        move || view! { <p>{message.clone()}</p> }
                    }
                >
                    <div class="articles-grid">
                        <For
                            each=articles.clone()
                            key=|article| article.id.clone()
                            children=|article| view! { <ArticleCard article=article /> }
                        />
                    </div>
                </Show>
            </section>
        </Show>
    }
}
