use dioxus::prelude::*;
use services::Toast;

use crate::context::AppContext;

#[component]
pub fn ToastHost() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = ctx.toasts();
    let mut shown = use_signal(|| toasts.current());

    use_future(move || {
        let mut updates = toasts.subscribe();
        async move {
            loop {
                let next = updates.borrow_and_update().clone();
                shown.set(next);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    rsx! {
        div { class: "toast-stack", role: "status",
            for toast in shown() {
                ToastItem { key: "{toast.id}", toast }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let ctx = use_context::<AppContext>();
    let id = toast.id;

    rsx! {
        div { class: "toast toast-{toast.severity}",
            span { class: "toast-text", "{toast.message}" }
            button {
                class: "toast-close",
                onclick: move |_| {
                    ctx.toasts().dismiss(id);
                },
                "×"
            }
        }
    }
}
