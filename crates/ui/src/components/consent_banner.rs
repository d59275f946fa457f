use std::sync::Arc;

use dioxus::prelude::*;
use kita_core::model::PromptOutcome;
use services::ConsentGate;

use crate::context::AppContext;
use crate::vm::{BANNER_REMOVE_DELAY, BANNER_REVEAL_DELAY, BannerPhase};

/// Apply a prompt outcome to the banner, sliding it in if it has to be shown.
pub async fn reveal_banner(mut phase: Signal<BannerPhase>, outcome: PromptOutcome) {
    let current = *phase.peek();
    let next = current.on_prompt(outcome);
    phase.set(next);
    if next != BannerPhase::Entering {
        return;
    }

    tokio::time::sleep(BANNER_REVEAL_DELAY).await;
    let current = *phase.peek();
    phase.set(current.after_reveal_delay());
}

/// Footer "Cookie settings": forget the decision and bring the banner back.
pub async fn reopen_cookie_settings(consent: Arc<ConsentGate>, phase: Signal<BannerPhase>) {
    let outcome = consent.reset().await;
    reveal_banner(phase, outcome).await;
}

/// Record the visitor's choice, slide the banner out, then remove it.
///
/// Ignored unless the banner is currently showing its actions.
pub async fn dismiss_banner(
    consent: Arc<ConsentGate>,
    mut phase: Signal<BannerPhase>,
    accepted: bool,
) {
    let current = *phase.peek();
    if !current.accepts_dismiss() {
        tracing::debug!(?current, "banner action ignored");
        return;
    }
    phase.set(current.on_dismiss());
    consent.record_decision(accepted).await;

    tokio::time::sleep(BANNER_REMOVE_DELAY).await;
    let current = *phase.peek();
    phase.set(current.after_remove_delay());
}

/// Cookie banner; runs the prompt flow once on mount.
///
/// Expects a `Signal<BannerPhase>` in context so the footer's
/// "Cookie settings" action can bring the banner back.
#[component]
pub fn ConsentBanner() -> Element {
    let ctx = use_context::<AppContext>();
    let phase = use_context::<Signal<BannerPhase>>();
    let consent = ctx.consent();

    let prompt_consent = Arc::clone(&consent);
    use_future(move || {
        let consent = Arc::clone(&prompt_consent);
        async move {
            let outcome = consent.prompt_if_needed().await;
            reveal_banner(phase, outcome).await;
        }
    });

    let current = phase();
    if !current.is_rendered() {
        return rsx! {};
    }

    let reject_consent = Arc::clone(&consent);
    let accept_consent = consent;

    rsx! {
        div { id: "cookie-banner", class: current.css_class(), role: "dialog",
            div { class: "cookie-copy",
                h2 { "We value your privacy" }
                p {
                    "We use cookies to understand how the site is used. "
                    "Analytics only run if you accept."
                }
            }
            div { class: "cookie-actions",
                button {
                    id: "cookie-reject",
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        spawn(dismiss_banner(Arc::clone(&reject_consent), phase, false));
                    },
                    "Essential only"
                }
                button {
                    id: "cookie-accept",
                    class: "btn btn-primary",
                    onclick: move |_| {
                        spawn(dismiss_banner(Arc::clone(&accept_consent), phase, true));
                    },
                    "Accept all"
                }
            }
        }
    }
}
