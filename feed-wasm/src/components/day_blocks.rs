use feed_client::dates::format_date;
use feed_client::navigation::{can_go_previous_days, load_more_days};
use feed_client::{CountArticle, Loader};
use leptos::prelude::*;

use crate::location;
use crate::state::AppState;

fn day_label(day: &CountArticle) -> String {
    format_date(&day.date).unwrap_or_else(|_| day.date.clone())
}

#[component]
pub(crate) fn DayBlocks(state: AppState) -> impl IntoView {
    let on_prev = Callback::new({
        let state = state.clone();
        move |_: ()| {
            state.block_loader.set(Loader::BlockDateCursor);
            if let Err(err) = location::back() {
                state.set_error(err);
            }
        }
    });

    let on_next = Callback::new({
        let state = state.clone();
        move |_: ()| {
            let pagination = state.days.with_untracked(|slot| {
                slot.get()
                    .map(|page| page.pagination.clone())
                    .unwrap_or_default()
            });
            let next = state
                .view
                .with_untracked(|view| load_more_days(view, &pagination));
            if let Some(transition) = next {
                state.apply(transition);
            }
        }
    });

    let on_select = Callback::new({
        let state = state.clone();
        move |day: String| state.selected_day.set(Some(day))
    });

    let days = {
        let state = state.clone();
        move || -> Vec<CountArticle> {
            state
                .days
                .with(|slot| slot.get().map(|page| page.data.clone()).unwrap_or_default())
        }
    };
    let busy = {
        let state = state.clone();
        move || {
            state
                .block_loader
                .get()
                .is_busy(state.days_pending(), Loader::BlockDateCursor)
        }
    };
    let prev_disabled = {
        let state = state.clone();
        let busy = busy.clone();
        move || !state.view.with(can_go_previous_days) || busy()
    };
    let next_disabled = {
        let state = state.clone();
        move || {
            let has_next = state.days.with(|slot| {
                slot.get()
                    .is_some_and(|page| page.pagination.next().is_some())
            });
            !has_next || busy()
        }
    };

    view! {
        <h2>"Статьи по дням"</h2>
        <ul class="day-blocks">
            <For
                each=days
                key=|day| day.date.clone()
                children=move |day| {
                    let label = day_label(&day);
                    let date = day.date.clone();
                    view! {
                        <li>
                            <button on:click=move |_| on_select.run(date.clone())>
                                {label}
                                " ("
                                {day.count}
                                ")"
                            </button>
                        </li>
                    }
                }
            />
        </ul>
        <div class="pager">
            <button on:click=move |_| on_prev.run(()) disabled=prev_disabled>
                "Prev"
            </button>
            <button on:click=move |_| on_next.run(()) disabled=next_disabled>
                "Next"
            </button>
        </div>
    }
}
