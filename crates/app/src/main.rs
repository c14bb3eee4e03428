use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ApiConfig, AppServices, Clock, DEMO_EMAIL, DEMO_PASSWORD, InMemoryApi};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,storage=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--api-url <url>] [--demo]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:prep.sqlite3");
    eprintln!("  --api-url {}", services::config::DEFAULT_API_URL);
    eprintln!();
    eprintln!("  --demo runs against a built-in offline API instead of the server.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL, PREP_API_URL, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    db_url: String,
    api_config: ApiConfig,
    demo: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PREP_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url("sqlite:prep.sqlite3".into()), normalize_sqlite_url);
        let mut api_config = ApiConfig::from_env().map_err(|_| ArgsError::InvalidApiUrl {
            raw: std::env::var("PREP_API_URL").unwrap_or_default(),
        })?;
        let mut demo = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    api_config = ApiConfig::new(&value)
                        .map_err(|_| ArgsError::InvalidApiUrl { raw: value.clone() })?;
                }
                "--demo" => demo = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            api_config,
            demo,
        })
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

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn build_services(args: Args) -> Result<AppServices, Box<dyn std::error::Error>> {
    let clock = Clock::default_clock();
    if args.demo {
        let storage = Storage::sqlite(&args.db_url).await?;
        info!(email = DEMO_EMAIL, "using the offline demo API");
        eprintln!("Demo login: {DEMO_EMAIL} / {DEMO_PASSWORD}");
        return Ok(AppServices::new(
            Arc::new(InMemoryApi::demo()?),
            Arc::clone(&storage.credentials),
            clock,
        ));
    }

    info!(api = %args.api_config.base_url(), "using the remote API");
    Ok(AppServices::new_sqlite(&args.db_url, args.api_config, clock).await?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite in the binary glue; the credential store lives there.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = build_services(parsed).await?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Placement Prep")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn sqlite_urls_are_made_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/prep.db".into()),
            "sqlite:///tmp/prep.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/prep.db".into()), "sqlite:///tmp/prep.db");
        assert!(normalize_sqlite_url("prep.db".into()).starts_with("sqlite:///"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--db", "/tmp/x.db", "--api-url", "https://prep.example.com/api", "--demo"])
            .unwrap();
        assert_eq!(args.db_url, "sqlite:///tmp/x.db");
        assert_eq!(
            args.api_config.base_url().as_str(),
            "https://prep.example.com/api"
        );
        assert!(args.demo);
    }

    #[test]
    fn bad_flags_are_reported() {
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            parse(&["--api-url", "ftp://nope"]),
            Err(ArgsError::InvalidApiUrl { .. })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }
}
