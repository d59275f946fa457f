use dioxus::prelude::*;
use dioxus_router::Link;

use crate::components::RoiCalculator;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    rsx! {
        div { class: "page",
            section { class: "hero",
                h2 { "Spend your time on clients, not paperwork" }
                p {
                    "Kita prepares contracts, invoices and follow-ups for every sale, "
                    "so a closing takes minutes instead of a quarter hour."
                }
                Link { class: "btn btn-primary", to: Route::Demo {}, "Try the booking demo" }
            }
            RoiCalculator {}
        }
    }
}
