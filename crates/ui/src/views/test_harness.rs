use std::error::Error as StdError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use kita_core::model::ConsentModeUpdate;
use services::{
    AnalyticsHook, AppServices, ConsentGate, ErrorReporter, Hooks, ProgressIndicator, SiteConfig,
    ToastCenter,
};
use storage::repository::Storage;
use tokio::runtime::Handle;

use crate::components::{
    ConsentBanner, LoadingOverlay, RoiFigures, ToastHost, dismiss_banner, reopen_cookie_settings,
    use_roi_animator,
};
use crate::context::{AppContext, UiApp, build_app_context};
use crate::routes::Route;
use crate::views::demo::use_demo_runner;
use crate::views::{DemoView, HomeView};
use crate::vm::{BannerPhase, RoiCalculatorVm};

/// Banner actions fire this long after mount, once the reveal delay is over.
pub const BANNER_SETTLE: Duration = Duration::from_millis(200);
/// Scripted follow-up actions fire this long after the first one.
pub const FOLLOW_UP_DELAY: Duration = Duration::from_millis(100);
/// The second slider move lands here, mid-way through the first tween.
pub const SLIDER_RETARGET_AFTER: Duration = Duration::from_millis(157);

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn config(&self) -> SiteConfig {
        self.services.config()
    }

    fn hooks(&self) -> Hooks {
        self.services.hooks()
    }

    fn consent(&self) -> Arc<ConsentGate> {
        self.services.consent()
    }

    fn progress(&self) -> ProgressIndicator {
        self.services.progress()
    }

    fn toasts(&self) -> Arc<ToastCenter> {
        self.services.toasts()
    }
}

#[derive(Default)]
pub struct RecordingReporter(Mutex<Vec<String>>);

impl RecordingReporter {
    pub fn reports(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &(dyn StdError + 'static)) {
        self.0.lock().unwrap().push(error.to_string());
    }
}

#[derive(Default)]
pub struct RecordingAnalytics(Mutex<Vec<ConsentModeUpdate>>);

impl RecordingAnalytics {
    pub fn updates(&self) -> Vec<ConsentModeUpdate> {
        self.0.lock().unwrap().clone()
    }
}

impl AnalyticsHook for RecordingAnalytics {
    fn update_consent(&self, update: ConsentModeUpdate) {
        self.0.lock().unwrap().push(update);
    }
}

/// Scripted interactions, standing in for clicks and slider drags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    /// Banner action clicked `clicks` times once the banner settled.
    Dismiss { accepted: bool, clicks: u8 },
    /// Footer "Cookie settings" after `FOLLOW_UP_DELAY`.
    ReopenSettings,
    /// "Book a demo" and nothing else.
    Book,
    /// "Book a demo", then "Slow request" after `FOLLOW_UP_DELAY`.
    BookThenSlow,
    /// "Book a demo", then "Cancel" after `FOLLOW_UP_DELAY`.
    BookThenCancel,
    /// Slider moved to 100, then to 1 at `SLIDER_RETARGET_AFTER`.
    SliderRetarget,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Demo,
    /// Banner, overlay and toasts without page content.
    Chrome,
    /// The real router, layout included.
    Site,
    Scripted(Script),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| Signal::new(BannerPhase::Hidden));
    if props.view == ViewKind::Site {
        return rsx! { Router::<Route> {} };
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home | ViewKind::Site => rsx! { HomeView {} },
        ViewKind::Demo => rsx! { DemoView {} },
        ViewKind::Chrome => rsx! {
            ConsentBanner {}
            LoadingOverlay {}
            ToastHost {}
        },
        ViewKind::Scripted(
            script @ (Script::Dismiss { .. } | Script::ReopenSettings),
        ) => rsx! { BannerScript { script } },
        ViewKind::Scripted(Script::SliderRetarget) => rsx! { SliderScript {} },
        ViewKind::Scripted(script) => rsx! { DemoScript { script } },
    }
}

#[component]
fn BannerScript(script: Script) -> Element {
    let ctx = use_context::<AppContext>();
    let phase = use_context::<Signal<BannerPhase>>();

    use_future(move || {
        let consent = ctx.consent();
        async move {
            match script {
                Script::Dismiss { accepted, clicks } => {
                    tokio::time::sleep(BANNER_SETTLE).await;
                    for _ in 0..clicks {
                        spawn(dismiss_banner(Arc::clone(&consent), phase, accepted));
                    }
                }
                Script::ReopenSettings => {
                    tokio::time::sleep(FOLLOW_UP_DELAY).await;
                    reopen_cookie_settings(consent, phase).await;
                }
                _ => {}
            }
        }
    });

    rsx! { ConsentBanner {} }
}

#[component]
fn DemoScript(script: Script) -> Element {
    let ctx = use_context::<AppContext>();
    let runner = use_demo_runner();

    use_future(move || {
        let ctx = ctx.clone();
        let mut runner = runner;
        async move {
            runner.book(&ctx);
            match script {
                Script::BookThenSlow => {
                    tokio::time::sleep(FOLLOW_UP_DELAY).await;
                    runner.slow_request(&ctx);
                }
                Script::BookThenCancel => {
                    tokio::time::sleep(FOLLOW_UP_DELAY).await;
                    runner.cancel(&ctx);
                }
                _ => {}
            }
        }
    });

    rsx! {
        LoadingOverlay {}
        ToastHost {}
    }
}

#[component]
fn SliderScript() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_hook(|| {
        let config = ctx.config();
        RoiCalculatorVm::new(config.roi_model, config.slider).unwrap()
    });
    let animator = use_roi_animator(vm);

    use_future(move || {
        let mut animator = animator;
        async move {
            animator.set_sales(100);
            tokio::time::sleep(SLIDER_RETARGET_AFTER).await;
            animator.set_sales(1);
        }
    });

    rsx! { RoiFigures { display: animator.shown() } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    pub reporter: Arc<RecordingReporter>,
    pub analytics: Arc<RecordingAnalytics>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Keep driving until `elapsed` has passed on the tokio clock.
    pub async fn drive_for(&mut self, elapsed: Duration) {
        let deadline = tokio::time::Instant::now() + elapsed;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, Storage::in_memory(), SiteConfig::default())
}

pub fn setup_view_harness_with(view: ViewKind, storage: Storage, config: SiteConfig) -> ViewHarness {
    let reporter = Arc::new(RecordingReporter::default());
    let analytics = Arc::new(RecordingAnalytics::default());
    let hooks = Hooks::none()
        .with_error_reporter(reporter.clone())
        .with_analytics(analytics.clone());
    let services = AppServices::from_storage(&storage, Handle::current(), config, hooks);

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        storage,
        services,
        reporter,
        analytics,
    }
}
