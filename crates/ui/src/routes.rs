use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::components::{ConsentBanner, LoadingOverlay, ToastHost, reopen_cookie_settings};
use crate::context::AppContext;
use crate::views::{DemoView, HomeView};
use crate::vm::BannerPhase;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/demo", DemoView)] Demo {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let banner = use_context_provider(|| Signal::new(BannerPhase::Hidden));

    let on_cookie_settings = move |_: MouseEvent| {
        spawn(reopen_cookie_settings(ctx.consent(), banner));
    };

    rsx! {
        div { class: "app",
            header { class: "site-header",
                h1 { class: "brand", "Kita" }
                nav {
                    ul {
                        li { Link { to: Route::Home {}, "Home" } }
                        li { Link { to: Route::Demo {}, "Booking demo" } }
                    }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            footer { class: "site-footer",
                button {
                    id: "cookie-settings",
                    class: "link-button",
                    onclick: on_cookie_settings,
                    "Cookie settings"
                }
            }
            ConsentBanner {}
            LoadingOverlay {}
            ToastHost {}
        }
    }
}
