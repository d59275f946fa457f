use std::time::Duration;

use kita_core::model::{CONSENT_STORAGE_KEY, ConsentModeUpdate, RoiModel, Stages};
use services::{
    ProgressOptions, SiteConfig, SliderSettings, TIMEOUT_NOTICE, ToastSeverity, Toaster,
};
use storage::repository::Storage;

use super::demo::{BOOKED_NOTICE, SLOW_REQUEST_MESSAGE};
use super::test_harness::{
    Script, ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with,
};
use crate::vm::RoiCalculatorVm;

async fn stored_consent(harness: &ViewHarness) -> Option<String> {
    harness
        .storage
        .local
        .get_item(CONSENT_STORAGE_KEY)
        .await
        .expect("read decision")
}

fn toast_messages(harness: &ViewHarness) -> Vec<String> {
    harness
        .services
        .toasts()
        .current()
        .into_iter()
        .map(|toast| toast.message)
        .collect()
}

#[tokio::test(flavor = "current_thread")]
async fn banner_shown_for_undecided_visitor() {
    let mut harness = setup_view_harness(ViewKind::Chrome);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("cookie-banner"), "missing banner in {html}");
    assert!(html.contains("Accept all"), "missing accept in {html}");
    assert!(html.contains("Essential only"), "missing reject in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn banner_absent_once_decided() {
    let storage = Storage::in_memory();
    storage
        .local
        .set_item(CONSENT_STORAGE_KEY, "rejected")
        .await
        .expect("seed decision");

    let mut harness = setup_view_harness_with(ViewKind::Chrome, storage, SiteConfig::default());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("cookie-banner"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn overlay_hidden_while_idle() {
    let mut harness = setup_view_harness(ViewKind::Chrome);
    harness.rebuild();

    let html = harness.render();
    assert!(!html.contains("loading-topbar"), "unexpected overlay in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn overlay_tracks_running_session() {
    let mut harness = setup_view_harness(ViewKind::Chrome);
    let progress = harness.services.progress();
    progress.start(
        Stages::new(["Uploading", "Processing"]).unwrap(),
        ProgressOptions::new(),
    );
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("loading-topbar"), "missing overlay in {html}");
    assert!(html.contains("Uploading"), "missing label in {html}");
    assert!(html.contains("width: 50%"), "missing progress width in {html}");
    assert!(html.contains("Step 1 of 2"), "missing stage label in {html}");

    progress.next_stage();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Processing"), "missing next label in {html}");
    assert!(html.contains("width: 100%"), "missing full width in {html}");

    progress.complete();
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("loading-topbar"), "overlay still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn toast_host_renders_shown_toasts() {
    let mut harness = setup_view_harness(ViewKind::Chrome);
    harness
        .services
        .toasts()
        .show("Your demo is booked.", ToastSeverity::Success);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Your demo is booked."), "missing toast in {html}");
    assert!(html.contains("toast-success"), "missing severity class in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_renders_initial_roi_figures() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();

    let html = harness.render();
    for expected in ["10.0", "0.3", "9.7", "2,425", "8.1x"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("roi-slider"), "missing slider in {html}");
    assert!(html.contains("#3b82f6"), "missing mid band color in {html}");
    assert!(harness.reporter.reports().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_slider_disables_only_the_calculator() {
    let config = SiteConfig::default().with_slider(SliderSettings {
        min: 10,
        max: 5,
        initial: 7,
    });
    let mut harness = setup_view_harness_with(ViewKind::Home, Storage::in_memory(), config);
    harness.rebuild();

    let html = harness.render();
    assert!(!html.contains("roi-slider"), "unexpected calculator in {html}");
    assert!(html.contains("Try the booking demo"), "page content missing in {html}");
    assert_eq!(harness.reporter.reports().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn demo_view_offers_actions() {
    let mut harness = setup_view_harness(ViewKind::Demo);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Book a demo"), "missing action in {html}");
    assert!(html.contains("Slow request"), "missing action in {html}");
    assert!(!harness.services.progress().is_active());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn accepting_slides_banner_out_and_persists() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::Dismiss {
        accepted: true,
        clicks: 1,
    }));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(150)).await;
    let html = harness.render();
    assert!(html.contains("is-visible"), "banner not revealed in {html}");
    assert_eq!(stored_consent(&harness).await, None);

    harness.drive_for(Duration::from_millis(100)).await;
    let html = harness.render();
    assert!(html.contains("is-leaving"), "banner not leaving in {html}");
    assert_eq!(stored_consent(&harness).await.as_deref(), Some("accepted"));
    assert_eq!(harness.analytics.updates(), vec![ConsentModeUpdate::Grant]);

    harness.drive_for(Duration::from_millis(400)).await;
    let html = harness.render();
    assert!(!html.contains("cookie-banner"), "banner not removed in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn essential_only_persists_rejection_without_analytics() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::Dismiss {
        accepted: false,
        clicks: 1,
    }));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(250)).await;
    assert!(harness.render().contains("is-leaving"));
    assert_eq!(stored_consent(&harness).await.as_deref(), Some("rejected"));
    assert!(harness.analytics.updates().is_empty());

    harness.drive_for(Duration::from_millis(400)).await;
    assert!(!harness.render().contains("cookie-banner"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn double_click_records_decision_once() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::Dismiss {
        accepted: true,
        clicks: 2,
    }));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(700)).await;
    assert_eq!(harness.analytics.updates(), vec![ConsentModeUpdate::Grant]);
    assert_eq!(stored_consent(&harness).await.as_deref(), Some("accepted"));
    assert!(!harness.render().contains("cookie-banner"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cookie_settings_revokes_and_reshows_banner() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::ReopenSettings));
    harness
        .storage
        .local
        .set_item(CONSENT_STORAGE_KEY, "accepted")
        .await
        .expect("seed decision");
    harness.rebuild();

    harness.drive_for(Duration::from_millis(50)).await;
    assert!(!harness.render().contains("cookie-banner"));
    assert_eq!(harness.analytics.updates(), vec![ConsentModeUpdate::Grant]);

    harness.drive_for(Duration::from_millis(200)).await;
    let html = harness.render();
    assert!(html.contains("is-visible"), "banner not re-shown in {html}");
    assert_eq!(
        harness.analytics.updates(),
        vec![ConsentModeUpdate::Grant, ConsentModeUpdate::Deny]
    );
    assert_eq!(stored_consent(&harness).await, None);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn site_layout_carries_footer_and_banner() {
    let mut harness = setup_view_harness(ViewKind::Site);
    harness.rebuild();
    harness.drive_for(Duration::from_millis(150)).await;

    let html = harness.render();
    assert!(html.contains("cookie-settings"), "missing footer action in {html}");
    assert!(html.contains("Cookie settings"), "missing footer label in {html}");
    assert!(html.contains("is-visible"), "missing banner in {html}");
    assert!(html.contains("roi-slider"), "missing home content in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn booking_runs_all_stages_then_confirms() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::Book));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(1000)).await;
    let html = harness.render();
    assert!(html.contains("Step 2 of 3"), "missing second stage in {html}");

    harness.drive_for(Duration::from_millis(2000)).await;
    assert!(!harness.services.progress().is_active());
    assert_eq!(toast_messages(&harness), vec![BOOKED_NOTICE.to_string()]);
    assert!(harness.render().contains(BOOKED_NOTICE));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_request_is_not_completed_by_replaced_booking() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::BookThenSlow));
    harness.rebuild();

    // Past the point where the booking would have stepped.
    harness.drive_for(Duration::from_millis(1100)).await;
    let progress = harness.services.progress();
    assert!(progress.is_active());
    let snapshot = progress.snapshot();
    assert_eq!(snapshot.message, SLOW_REQUEST_MESSAGE);
    assert_eq!(snapshot.stage_count, 1);

    harness.drive_for(Duration::from_millis(2100)).await;
    assert!(!progress.is_active());
    assert_eq!(toast_messages(&harness), vec![TIMEOUT_NOTICE.to_string()]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_stops_booking_for_good() {
    let mut harness = setup_view_harness(ViewKind::Scripted(Script::BookThenCancel));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(3000)).await;
    assert!(!harness.services.progress().is_active());
    assert!(toast_messages(&harness).is_empty());
    assert!(!harness.render().contains("loading-topbar"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slider_retarget_abandons_previous_tween() {
    let vm = RoiCalculatorVm::new(RoiModel::default(), SliderSettings::default()).unwrap();
    let start_money = format!("roi-saved-money\">{}<", vm.display_for(40).money_saved_text());
    let abandoned_money = format!("roi-saved-money\">{}<", vm.display_for(100).money_saved_text());
    let target = vm.display_for(1);

    let mut harness = setup_view_harness(ViewKind::Scripted(Script::SliderRetarget));
    harness.rebuild();

    harness.drive_for(Duration::from_millis(80)).await;
    let html = harness.render();
    assert!(!html.contains(&start_money), "tween not started in {html}");
    assert!(!html.contains(&abandoned_money), "tween skipped ahead in {html}");

    let deadline = tokio::time::Instant::now() + Duration::from_millis(620);
    while tokio::time::Instant::now() < deadline {
        harness.drive_async().await;
        let html = harness.render();
        assert!(!html.contains(&abandoned_money), "stale tween finished in {html}");
    }

    let html = harness.render();
    for (anchor, text) in [
        ("roi-before-sales", target.sales_text()),
        ("roi-after-hours", target.hours_with_text()),
        ("roi-saved-hours", target.hours_saved_text()),
        ("roi-saved-money", target.money_saved_text()),
        ("roi-multiple", target.roi_multiple_text()),
    ] {
        let expected = format!("{anchor}\">{text}<");
        assert!(html.contains(&expected), "missing {expected} in {html}");
    }
}
