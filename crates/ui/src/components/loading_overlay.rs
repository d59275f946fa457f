use dioxus::prelude::*;
use services::ProgressSnapshot;

use crate::context::AppContext;

/// Top progress bar plus message pill mirroring the shared `ProgressIndicator`.
#[component]
pub fn LoadingOverlay() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let mut snapshot = use_signal(|| progress.snapshot());

    use_future(move || {
        let mut updates = progress.subscribe();
        async move {
            loop {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let snap: ProgressSnapshot = snapshot();
    if !snap.visible {
        return rsx! {};
    }
    let stage = snap.stage_label().filter(|_| snap.stage_count > 1);

    rsx! {
        div { id: "loading-topbar", class: "loading-topbar",
            div {
                id: "loading-progress-bar",
                class: "loading-progress-bar",
                style: "width: {snap.percent}%",
            }
        }
        div { id: "loading-message", class: "loading-message", role: "status",
            span { class: "spinner" }
            span { id: "loading-text", "{snap.message}" }
            if let Some(stage) = stage {
                span { class: "loading-stage", "{stage}" }
            }
        }
    }
}
