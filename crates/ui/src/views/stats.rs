use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionStatVm, StatsVm, map_stats};

#[component]
pub fn StatsView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Statistics" }
            StatsPanel {}
        }
    }
}

/// Aggregate and per-question accuracy, read fresh from the result store.
#[component]
pub fn StatsPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();

    let resource = use_resource(move || {
        let stats = stats.clone();
        async move {
            let aggregate = stats.load_stats().await.map_err(|_| ViewError::Storage)?;
            Ok(map_stats(&aggregate))
        }
    });

    let state = view_state_from_resource(&resource);
    let on_retry = move |_| {
        let mut resource = resource;
        resource.restart();
    };

    rsx! {
        div { class: "stats-panel",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.is_empty() {
                        p { class: "stats-empty", "No statistics yet." }
                    } else {
                        StatsTotals { data: data.clone() }
                        ul { class: "stats-rows",
                            for row in data.rows.iter() {
                                StatRow { key: "{row.key}", row: row.clone() }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "stats-error",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: on_retry,
                            "Retry"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatsTotals(data: StatsVm) -> Element {
    rsx! {
        dl { class: "stats-totals",
            div {
                dt { "Questions answered" }
                dd { "{data.total_questions}" }
            }
            div {
                dt { "Attempts" }
                dd { "{data.total_attempts}" }
            }
            div {
                dt { "Correct" }
                dd { "{data.total_correct}" }
            }
            div {
                dt { "Incorrect" }
                dd { "{data.total_incorrect}" }
            }
            div {
                dt { "Accuracy" }
                dd { "{data.accuracy_str}" }
            }
        }
    }
}

#[component]
fn StatRow(row: QuestionStatVm) -> Element {
    rsx! {
        li { class: "{row.tier_class}",
            span { class: "stat-label", "{row.label}" }
            span { class: "stat-accuracy", "{row.accuracy_str}" }
            p {
                "Correct: {row.correct} | Incorrect: {row.incorrect} | Attempts: {row.attempts}"
            }
        }
    }
}
