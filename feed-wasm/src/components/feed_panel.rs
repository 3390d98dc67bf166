use feed_client::navigation::{can_go_previous, load_more, time_travel};
use feed_client::{Article, Loader, Pagination};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::article_card::ArticleCard;
use crate::location;
use crate::state::AppState;

#[component]
pub(crate) fn FeedPanel(state: AppState) -> impl IntoView {
    let travel_date = RwSignal::new(String::new());

    let on_time_travel = Callback::new({
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            state.clear_error();

            let date = travel_date.get();
            match state.view.with_untracked(|view| time_travel(view, &date)) {
                Ok(transition) => state.apply(transition),
                Err(err) => state.set_error(err.user_message()),
            }
        }
    });

    let on_previous = Callback::new({
        let state = state.clone();
        move |_: ()| {
            state.loader.set(Loader::ArticleIdCursor);
            if let Err(err) = location::back() {
                state.set_error(err);
            }
        }
    });

    let on_load_more = Callback::new({
        let state = state.clone();
        move |_: ()| {
            let pagination = state.articles.with_untracked(|slot| {
                slot.get()
                    .map(|page| page.pagination.clone())
                    .unwrap_or_default()
            });
            let next = state
                .view
                .with_untracked(|view| load_more(view, &pagination));
            if let Some(transition) = next {
                state.apply(transition);
            }
        }
    });

    let visible = {
        let state = state.clone();
        move || state.search.with(|search| search.shows_feed())
    };
    let page_loading = {
        let state = state.clone();
        move || {
            let pending = state.articles_pending();
            state.loader.get().shows_page_loader(pending)
        }
    };
    let articles = {
        let state = state.clone();
        move || -> Vec<Article> {
            state
                .articles
                .with(|slot| slot.get().map(|page| page.data.clone()).unwrap_or_default())
        }
    };
    let pagination = {
        let state = state.clone();
        move || -> Pagination {
            state.articles.with(|slot| {
                slot.get()
                    .map(|page| page.pagination.clone())
                    .unwrap_or_default()
            })
        }
    };
    let busy = {
        let state = state.clone();
        move |trigger: Loader| state.loader.get().is_busy(state.articles_pending(), trigger)
    };
    let previous_disabled = {
        let state = state.clone();
        let busy = busy.clone();
        move || !state.view.with(can_go_previous) || busy(Loader::ArticleIdCursor)
    };
    let more_disabled = {
        let busy = busy.clone();
        move || pagination().next().is_none() || busy(Loader::ArticleIdCursor)
    };
    let travel_busy = move || busy(Loader::DateCursor);

    view! {
        <Show when=visible>
            <form class="time-travel" on:submit=move |ev| on_time_travel.run(ev)>
                <label>
                    "Перейти к дате: "
                    <input
                        type="date"
                        prop:value=move || travel_date.get()
                        on:input=move |ev| travel_date.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=travel_busy.clone()>
                    "Time travel"
                </button>
            </form>

            <Show
                when={
                    let page_loading = page_loading.clone();
                    move || !page_loading()
                }
                fallback=|| view! { <p class="loading">"Загрузка..."</p> }
            >
                <div class="articles-grid">
                    <For
                        each=articles.clone()
                        key=|article| article.id.clone()
                        children=|article| view! { <ArticleCard article=article /> }
                    />
                </div>
            </Show>

            <div class="pager">
                <button
                    on:click=move |_| on_previous.run(())
                    disabled=previous_disabled.clone()
                >
                    "Previous"
                </button>
                <button
                    on:click=move |_| on_load_more.run(())
                    disabled=more_disabled.clone()
                >
                    "Load more"
                </button>
            </div>
        </Show>
    }
}
