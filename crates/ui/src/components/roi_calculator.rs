use dioxus::core::Task;
use dioxus::prelude::*;
use kita_core::model::{ANIMATION_DURATION, step_interval};

use crate::context::AppContext;
use crate::vm::{RoiCalculatorVm, RoiDisplay, RoiTween};

/// Savings calculator. Renders nothing when its slider configuration is unusable.
#[component]
pub fn RoiCalculator() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_hook(|| {
        let config = ctx.config();
        match RoiCalculatorVm::new(config.roi_model, config.slider) {
            Ok(vm) => Some(vm),
            Err(err) => {
                tracing::error!(error = %err, "roi calculator disabled");
                ctx.hooks().report_error(&err);
                None
            }
        }
    });

    match vm {
        Some(vm) => rsx! { RoiCalculatorPanel { vm } },
        None => rsx! {},
    }
}

/// Slider value plus the figures on screen, animated between inputs.
#[derive(Clone, Copy)]
pub struct RoiAnimator {
    vm: RoiCalculatorVm,
    sales: Signal<u32>,
    shown: Signal<RoiDisplay>,
    animation: Signal<Option<Task>>,
}

/// Starts at the slider's initial value with no animation running.
pub fn use_roi_animator(vm: RoiCalculatorVm) -> RoiAnimator {
    let initial = vm.bounds().initial();
    RoiAnimator {
        vm,
        sales: use_signal(|| initial),
        shown: use_signal(|| vm.display_for(initial)),
        animation: use_signal(|| None),
    }
}

impl RoiAnimator {
    #[must_use]
    pub fn sales(&self) -> u32 {
        *self.sales.read()
    }

    #[must_use]
    pub fn shown(&self) -> RoiDisplay {
        *self.shown.read()
    }

    /// Jump the slider to `value` and tween the figures from what is on
    /// screen. A tween still in flight is cancelled first.
    pub fn set_sales(&mut self, value: u32) {
        self.sales.set(value);

        if let Some(previous) = self.animation.write().take() {
            previous.cancel();
        }
        let tween = RoiTween::new(*self.shown.peek(), self.vm.display_for(value));
        let mut shown = self.shown;
        let task = spawn(async move {
            let interval = step_interval(ANIMATION_DURATION, tween.steps());
            for step in 1..=tween.steps() {
                tokio::time::sleep(interval).await;
                shown.set(tween.frame(step));
            }
        });
        self.animation.set(Some(task));
    }
}

#[component]
fn RoiCalculatorPanel(vm: RoiCalculatorVm) -> Element {
    let bounds = vm.bounds();
    let mut animator = use_roi_animator(vm);

    let on_input = move |evt: FormEvent| {
        let Some(value) = bounds.parse(&evt.value()) else {
            tracing::debug!(raw = %evt.value(), "ignoring unparsable slider value");
            return;
        };
        animator.set_sales(value);
    };

    let current = animator.sales();
    let track = bounds.track_background(current);

    rsx! {
        section { class: "roi-calculator",
            h2 { "How much time could you save?" }
            label { class: "roi-label", r#for: "roi-slider",
                "Sales per month: "
                strong { id: "roi-current-sales", "{current}" }
            }
            input {
                id: "roi-slider",
                r#type: "range",
                min: "{bounds.min()}",
                max: "{bounds.max()}",
                step: "1",
                value: "{current}",
                style: "background: {track}",
                oninput: on_input,
            }
            RoiFigures { display: animator.shown() }
        }
    }
}

/// Before/after comparison and savings for the figures on screen.
#[component]
pub fn RoiFigures(display: RoiDisplay) -> Element {
    rsx! {
        div { class: "roi-compare",
            div { class: "roi-column roi-before",
                h3 { "Without Kita" }
                p {
                    span { id: "roi-before-sales", "{display.sales_text()}" }
                    " sales take "
                    span { id: "roi-before-hours", "{display.hours_without_text()}" }
                    " h"
                }
            }
            div { class: "roi-column roi-after",
                h3 { "With Kita" }
                p {
                    span { id: "roi-after-sales", "{display.sales_text()}" }
                    " sales take "
                    span { id: "roi-after-hours", "{display.hours_with_text()}" }
                    " h"
                }
            }
        }

        dl { class: "roi-results",
            div {
                dt { "Hours saved per month" }
                dd { id: "roi-saved-hours", "{display.hours_saved_text()}" }
            }
            div {
                dt { "Value of time saved" }
                dd { "€" span { id: "roi-saved-money", "{display.money_saved_text()}" } }
            }
            div {
                dt { "Return on subscription" }
                dd { id: "roi-multiple", "{display.roi_multiple_text()}" }
            }
        }
    }
}
