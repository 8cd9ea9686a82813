use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::QuizStore;
use crate::views::{QuizView, StatsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/stats", StatsView)] Stats {},
}

#[component]
fn Layout() -> Element {
    use_context_provider(QuizStore::new);

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Quiz {}, "Questions" } }
                li { Link { to: Route::Stats {}, "Statistics" } }
            }
        }
    }
}
