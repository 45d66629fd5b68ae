//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::dataset::DatasetProvider;
use crate::domain::error::LinedeckError;
use crate::domain::pages::{Page, render_page};
use crate::domain::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "linedeck", about = "Interactive line chart demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print one page as JSON
    Render {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Sidebar label of the page, e.g. "Simple line chart"
        #[arg(short, long, default_value = "Top")]
        page: String,
    },
    /// List the page labels in sidebar order
    Pages,
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();
    match cli.command {
        Command::Serve { config } => run_serve(config.as_ref()),
        Command::Render { config, page } => run_render(config.as_ref(), &page),
        Command::Pages => run_pages(),
    }
}

/// Log to stderr so `render` output on stdout stays clean. `RUST_LOG`
/// overrides the default `info` level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second call (e.g. from tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, LinedeckError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path).map_err(|e| LinedeckError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn load_settings(path: Option<&PathBuf>) -> Result<Settings, LinedeckError> {
    let config = load_config(path)?;
    Settings::from_config(&config)
}

pub fn build_provider(settings: &Settings) -> DatasetProvider {
    DatasetProvider::new(
        Box::new(CsvAdapter::new(&settings.dataset.path)),
        settings.dataset.cutoff,
    )
}

/// Render `label` against the configured dataset and serialize it.
pub fn render_json(settings: &Settings, label: &str) -> Result<String, LinedeckError> {
    let provider = build_provider(settings);
    let rows = provider.rows()?;
    let view = render_page(label, &rows);
    Ok(serde_json::to_string_pretty(&view)?)
}

fn fail(err: LinedeckError) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    eprintln!("error: {err}");
    (&err).into()
}

fn run_render(config_path: Option<&PathBuf>, label: &str) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    match render_json(&settings, label) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_pages() -> ExitCode {
    for page in Page::ALL {
        println!("{}", page.label());
    }
    ExitCode::SUCCESS
}

fn run_serve(config_path: Option<&PathBuf>) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let settings = match load_settings(config_path) {
            Ok(s) => s,
            Err(e) => return fail(e),
        };

        let addr: SocketAddr = match settings.listen.parse() {
            Ok(a) => a,
            Err(_) => {
                return fail(LinedeckError::ConfigInvalid {
                    section: "web".into(),
                    key: "listen".into(),
                    reason: format!("not a socket address: {}", settings.listen),
                });
            }
        };

        // Load eagerly so a missing dataset fails at startup, not on first request.
        let provider = build_provider(&settings);
        if let Err(e) = provider.rows() {
            return fail(e);
        }

        let state = AppState {
            dataset: Arc::new(provider),
            page: settings.page,
        };
        let router = build_router(state);

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => return fail(e.into()),
        };

        let result: Result<(), LinedeckError> = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "starting web server");
            axum::serve(listener, router).await?;
            Ok(())
        });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_default_page() {
        let cli = Cli::try_parse_from(["linedeck", "render"]).unwrap();
        match cli.command {
            Command::Render { config, page } => {
                assert!(config.is_none());
                assert_eq!(page, "Top");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_with_config() {
        let cli = Cli::try_parse_from(["linedeck", "serve", "-c", "linedeck.ini"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve { config: Some(ref p) } if p == &PathBuf::from("linedeck.ini")
        ));
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let path = PathBuf::from("/nonexistent/linedeck.ini");
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, LinedeckError::ConfigParse { .. }));
    }
}
