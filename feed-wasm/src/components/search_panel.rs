use feed_client::{Article, SearchState};
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::article_card::ArticleCard;
use crate::state::AppState;

/// Поиск по тегу. Пока есть результаты, лента скрыта.
#[component]
pub(crate) fn SearchPanel(state: AppState) -> impl IntoView {
    let input = RwSignal::new(
        state
            .view
            .with_untracked(|view| view.query.clone())
            .unwrap_or_default(),
    );

    let on_input = Callback::new({
        let state = state.clone();
        move |value: String| {
            input.set(value.clone());
            let transition = state.view.with_untracked(|view| {
                state
                    .search
                    .try_update(|search| search.on_input(view, &value))
            });
            if let Some(transition) = transition {
                state.apply(transition);
            }
        }
    });

    let on_submit = Callback::new({
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            state.clear_error();

            let value = input.get_untracked();
            let submitted = state.view.with_untracked(|view| {
                state
                    .search
                    .try_update(|search| search.submit(view, &value))
            });
            let (query, transition) = match submitted {
                Some(Ok(submitted)) => submitted,
                Some(Err(err)) => {
                    state.set_error(err.user_message());
                    return;
                }
                None => return,
            };
            state.apply(transition);

            if !state.search.with_untracked(|search| search.is_pending()) {
                return;
            }
            let key = SearchState::key_for(&query);
            let state2 = state.clone();
            spawn_local(async move {
                match api::search_articles(&query).await {
                    Ok(page) => state2.search.update(|search| {
                        search.on_success(&key, page);
                    }),
                    Err(err) => {
                        error!("search {key} failed: {err}");
                        let current = state2.search.try_update(|search| search.on_failure(&key));
                        if current.unwrap_or(false) {
                            state2.set_error(err.to_string());
                        }
                    }
                }
            });
        }
    });

    let on_close = Callback::new({
        let state = state.clone();
        move |_: ()| {
            input.set(String::new());
            let transition = state
                .view
                .with_untracked(|view| state.search.try_update(|search| search.close(view)));
            if let Some(transition) = transition {
                state.apply(transition);
            }
        }
    });

    let active = {
        let state = state.clone();
        move || state.search.with(|search| search.is_active())
    };
    let results = {
        let state = state.clone();
        move || -> Vec<Article> { state.search.with(|search| search.results().to_vec()) }
    };
    let result_count = {
        let state = state.clone();
        move || state.search.with(|search| search.result_count())
    };
    let pending = {
        let state = state.clone();
        move || state.search.with(|search| search.is_pending())
    };

    view! {
        <form class="search" on:submit=move |ev| on_submit.run(ev)>
            <input
                type="search"
                placeholder="Поиск по тегу"
                prop:value=move || input.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <button type="submit" disabled=pending.clone()>
                "Search"
            </button>
        </form>

        <Show when=active>
            <div class="search-results">
                <p>
                    "Найдено: "
                    {result_count.clone()}
                    <button on:click=move |_| on_close.run(())>"Close"</button>
                </p>
                <div class="articles-grid">
                    <For
                        each=results.clone()
                        key=|article| article.id.clone()
                        children=|article| view! { <ArticleCard article=article /> }
                    />
                </div>
            </div>
        </Show>
    }
}
