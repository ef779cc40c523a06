use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::PracticeView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", PracticeView)] Practice {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            footer { class: "footer",
                hr {}
                p { "加油! Keep practicing!" }
            }
        }
    }
}
