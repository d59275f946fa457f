use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use kita_core::model::Stages;
use services::{ProgressOptions, ToastSeverity, Toaster};

use crate::context::AppContext;

const BOOKING_STAGES: [&str; 3] = [
    "Checking availability…",
    "Reserving your slot…",
    "Sending confirmation…",
];
const STAGE_DELAY: Duration = Duration::from_millis(900);

pub(crate) const BOOKED_NOTICE: &str = "Your demo is booked.";
pub(crate) const SLOW_REQUEST_MESSAGE: &str = "Contacting the calendar service…";
const SLOW_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Drives the demo actions. Owns the task stepping a booking through its
/// stages so a newer action can stop it before it touches the indicator.
#[derive(Clone, Copy)]
pub(crate) struct DemoRunner {
    booking: Signal<Option<Task>>,
}

pub(crate) fn use_demo_runner() -> DemoRunner {
    DemoRunner {
        booking: use_signal(|| None),
    }
}

impl DemoRunner {
    fn stop_booking(&mut self) {
        if let Some(task) = self.booking.write().take() {
            task.cancel();
        }
    }

    pub(crate) fn book(&mut self, ctx: &AppContext) {
        self.stop_booking();
        let stages = match Stages::new(BOOKING_STAGES) {
            Ok(stages) => stages,
            Err(err) => {
                tracing::warn!(error = %err, "booking demo has no stages");
                return;
            }
        };
        let progress = ctx.progress();
        let toasts = ctx.toasts();
        progress.start(
            stages,
            ProgressOptions::new().on_complete(move || {
                toasts.show(BOOKED_NOTICE, ToastSeverity::Success);
            }),
        );
        let task = spawn(async move {
            for _ in 1..BOOKING_STAGES.len() {
                tokio::time::sleep(STAGE_DELAY).await;
                progress.next_stage();
            }
            tokio::time::sleep(STAGE_DELAY / 2).await;
            progress.update_message("Almost done…");
            tokio::time::sleep(STAGE_DELAY / 2).await;
            progress.next_stage();
        });
        self.booking.set(Some(task));
    }

    pub(crate) fn slow_request(&mut self, ctx: &AppContext) {
        self.stop_booking();
        ctx.progress()
            .show_loading(SLOW_REQUEST_MESSAGE, Some(SLOW_REQUEST_TIMEOUT));
    }

    pub(crate) fn cancel(&mut self, ctx: &AppContext) {
        self.stop_booking();
        ctx.progress().cancel();
    }
}

/// Walk-through of the loading indicator's control surfaces.
#[component]
pub fn DemoView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut runner = use_demo_runner();

    let booking_ctx = ctx.clone();
    let on_book = move |_: MouseEvent| runner.book(&booking_ctx);
    let slow_ctx = ctx.clone();
    let on_slow = move |_: MouseEvent| runner.slow_request(&slow_ctx);
    let on_cancel = move |_: MouseEvent| runner.cancel(&ctx);

    rsx! {
        div { class: "page",
            h2 { "Booking demo" }
            p { "Each action drives the loading bar at the top of the window." }
            div { class: "demo-actions",
                button { id: "demo-book", class: "btn btn-primary", onclick: on_book, "Book a demo" }
                button { id: "demo-slow", class: "btn btn-secondary", onclick: on_slow, "Slow request" }
                button { id: "demo-cancel", class: "btn", onclick: on_cancel, "Cancel" }
            }
        }
    }
}
