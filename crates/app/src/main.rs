use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use kita_core::model::ConsentModeUpdate;
use services::{
    AnalyticsHook, AppServices, ConsentGate, ErrorReporter, Hooks, ProgressIndicator, SiteConfig,
    SliderSettings, ToastCenter,
};
use storage::repository::Storage;
use tokio::runtime::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

/// Env values are optional; a malformed one is reported like the matching flag.
fn env_number<T: std::str::FromStr>(
    var: &str,
    flag: &'static str,
) -> Result<Option<T>, ArgsError> {
    std::env::var(var)
        .ok()
        .map(|raw| parse_number(flag, raw))
        .transpose()
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
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

/// Analytics stand-in for the desktop shell: consent-mode updates go to the log.
struct LoggedAnalytics;

impl AnalyticsHook for LoggedAnalytics {
    fn update_consent(&self, update: ConsentModeUpdate) {
        tracing::info!(
            analytics_storage = update.analytics_storage(),
            "consent mode updated"
        );
    }
}

struct LoggedErrors;

impl ErrorReporter for LoggedErrors {
    fn report(&self, error: &(dyn StdError + 'static)) {
        tracing::error!(%error, "component disabled");
    }
}

struct Args {
    db_url: String,
    loading_timeout: Duration,
    slider: SliderSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui [--db <sqlite_url>] [--loading-timeout-ms <ms>]");
    eprintln!("                         [--slider-min <n>] [--slider-max <n>] [--slider-initial <n>]");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db sqlite://kita.sqlite3");
    eprintln!("  --loading-timeout-ms 30000");
    eprintln!("  --slider-min 1 --slider-max 100 --slider-initial 40");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  KITA_DB_URL, KITA_LOADING_TIMEOUT_MS,");
    eprintln!("  KITA_SLIDER_MIN, KITA_SLIDER_MAX, KITA_SLIDER_INITIAL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            _ => None,
        }
    }
}

impl Args {
    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("KITA_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://kita.sqlite3".into(), normalize_sqlite_url);
        let defaults = SiteConfig::default();
        let mut loading_timeout = env_number("KITA_LOADING_TIMEOUT_MS", "--loading-timeout-ms")?
            .map_or(defaults.loading_timeout, Duration::from_millis);
        let mut slider = defaults.slider;
        if let Some(min) = env_number("KITA_SLIDER_MIN", "--slider-min")? {
            slider.min = min;
        }
        if let Some(max) = env_number("KITA_SLIDER_MAX", "--slider-max")? {
            slider.max = max;
        }
        if let Some(initial) = env_number("KITA_SLIDER_INITIAL", "--slider-initial")? {
            slider.initial = initial;
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--loading-timeout-ms" => {
                    let value = require_value(args, "--loading-timeout-ms")?;
                    loading_timeout =
                        Duration::from_millis(parse_number("--loading-timeout-ms", value)?);
                }
                "--slider-min" => {
                    slider.min = parse_number("--slider-min", require_value(args, "--slider-min")?)?;
                }
                "--slider-max" => {
                    slider.max = parse_number("--slider-max", require_value(args, "--slider-max")?)?;
                }
                "--slider-initial" => {
                    let value = require_value(args, "--slider-initial")?;
                    slider.initial = parse_number("--slider-initial", value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            loading_timeout,
            slider,
        })
    }

    fn site_config(&self) -> SiteConfig {
        SiteConfig::default()
            .with_loading_timeout(self.loading_timeout)
            .with_slider(self.slider)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Consent is best effort: if the database cannot be opened the site still
/// runs, it just never remembers a decision.
async fn open_storage(db_url: &str) -> Storage {
    let opened: Result<Storage, Box<dyn StdError>> = match prepare_sqlite_file(db_url) {
        Ok(()) => Storage::sqlite(db_url).await.map_err(Into::into),
        Err(err) => Err(err),
    };
    match opened {
        Ok(storage) => storage,
        Err(err) => {
            tracing::warn!(error = %err, db_url, "storage unavailable; consent will not persist");
            Storage::unavailable()
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = match cmd {
        Command::Ui => Args::parse_ui(&mut iter),
    }
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let storage = open_storage(&parsed.db_url).await;
    let hooks = Hooks::none()
        .with_analytics(Arc::new(LoggedAnalytics))
        .with_error_reporter(Arc::new(LoggedErrors));
    let services = AppServices::from_storage(&storage, Handle::current(), parsed.site_config(), hooks);
    tracing::info!(db_url = %parsed.db_url, "launching site");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Kita")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
