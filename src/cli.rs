//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::format_analysis;
use crate::domain::analysis::analyze;
use crate::domain::error::TickwatchError;
use crate::domain::monitor::MonitorConfig;
use crate::domain::ohlcv::Bar;

#[derive(Parser, Debug)]
#[command(name = "tickwatch", about = "Single-symbol intraday monitor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one bar series and print the signal
    Analyze {
        #[arg(long, conflicts_with = "config")]
        csv: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Start the refresh task and the web dashboard
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a monitor configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            csv,
            config,
            symbol,
            json,
        } => run_analyze(csv.as_ref(), config.as_ref(), symbol.as_deref(), json),
        Command::Serve { config } => run_serve(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TickwatchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_analyze(
    csv_path: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    symbol_override: Option<&str>,
    json: bool,
) -> ExitCode {
    let loaded = match (csv_path, config_path) {
        (Some(path), _) => load_csv(path, symbol_override),
        (None, Some(path)) => {
            eprintln!("Loading config from {}", path.display());
            let config = match load_config(path) {
                Ok(c) => c,
                Err(code) => return code,
            };
            fetch_live(&config, symbol_override)
        }
        (None, None) => {
            eprintln!("error: --csv or --config is required for analyze");
            return ExitCode::from(1);
        }
    };

    let (symbol, bars) = match loaded {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} bars for {}", bars.len(), symbol);

    let result = match analyze(&bars) {
        Some(r) => r,
        None => {
            let err = TickwatchError::NoData { symbol };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: failed to encode result: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", format_analysis(&symbol, &result));
    }
    ExitCode::SUCCESS
}

fn load_csv(path: &Path, symbol_override: Option<&str>) -> Result<(String, Vec<Bar>), TickwatchError> {
    eprintln!("Reading bars from {}", path.display());
    let symbol = symbol_override
        .map(|s| s.trim().to_uppercase())
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_uppercase())
        })
        .unwrap_or_default();
    let bars = CsvAdapter::read_file(path)?;
    Ok((symbol, bars))
}

#[cfg(feature = "live")]
fn fetch_live(
    config: &FileConfigAdapter,
    symbol_override: Option<&str>,
) -> Result<(String, Vec<Bar>), TickwatchError> {
    use crate::adapters::alpha_vantage::AlphaVantageAdapter;
    use crate::ports::data_port::DataPort;

    let monitor = MonitorConfig::from_config(config)?;
    let symbol = symbol_override
        .map(|s| s.trim().to_uppercase())
        .unwrap_or(monitor.symbol);
    let adapter = AlphaVantageAdapter::from_config(config)?;

    eprintln!("Fetching {} bars for {}", monitor.interval, symbol);
    let bars = adapter.fetch_intraday(&symbol)?;
    Ok((symbol, bars))
}

#[cfg(not(feature = "live"))]
fn fetch_live(
    config: &FileConfigAdapter,
    symbol_override: Option<&str>,
) -> Result<(String, Vec<Bar>), TickwatchError> {
    let _ = (MonitorConfig::from_config(config)?, symbol_override);
    Err(TickwatchError::ConfigInvalid {
        section: "provider".to_string(),
        key: "api_key".to_string(),
        reason: "live feature is required to fetch from the provider".to_string(),
    })
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let monitor = match MonitorConfig::from_config(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    #[cfg(feature = "live")]
    {
        use crate::adapters::alpha_vantage::AlphaVantageAdapter;

        if let Err(e) = AlphaVantageAdapter::from_config(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    eprintln!("  Symbol:   {}", monitor.symbol);
    eprintln!("  Interval: {}", monitor.interval);
    eprintln!("  Refresh:  every {}s", monitor.refresh_interval.as_secs());
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::alpha_vantage::AlphaVantageAdapter;
        use crate::ports::config_port::ConfigPort;
        use crate::ports::data_port::DataPort;
        use std::net::SocketAddr;
        use std::sync::Arc;

        init_tracing();

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let monitor = match MonitorConfig::from_config(&config) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let data_port = match AlphaVantageAdapter::from_config(&config) {
            Ok(a) => Arc::new(a) as Arc<dyn DataPort + Send + Sync>,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let addr: SocketAddr = match listen.trim().parse() {
            Ok(a) => a,
            Err(e) => {
                let err = TickwatchError::ConfigInvalid {
                    section: "web".to_string(),
                    key: "listen".to_string(),
                    reason: format!("{}", e),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                let err = TickwatchError::Io(e);
                eprintln!("error: {err}");
                return (&err).into();
            }
        };

        eprintln!("Starting web server on {}", addr);
        // The blocking HTTP client must be dropped outside the runtime.
        let result = runtime.block_on(serve(monitor, data_port.clone(), addr));
        drop(runtime);
        drop(data_port);

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                (&e).into()
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}

#[cfg(feature = "web")]
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[cfg(feature = "web")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "web")]
async fn serve(
    monitor: MonitorConfig,
    data_port: std::sync::Arc<dyn crate::ports::data_port::DataPort + Send + Sync>,
    addr: std::net::SocketAddr,
) -> Result<(), TickwatchError> {
    use crate::adapters::refresh::{new_shared_snapshot, RefreshTask};
    use crate::adapters::web::{build_router, AppState};

    let snapshot = new_shared_snapshot(&monitor.symbol);
    let (task, handle) = RefreshTask::new(
        data_port,
        monitor.symbol.clone(),
        monitor.refresh_interval,
        snapshot.clone(),
    );
    let refresh = tokio::spawn(task.run());

    let router = build_router(AppState {
        snapshot,
        refresh_trigger: handle.trigger_handle(),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        symbol = %monitor.symbol,
        interval = %monitor.interval,
        refresh_secs = monitor.refresh_interval.as_secs(),
        "dashboard listening"
    );

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    handle.shutdown();
    if let Err(e) = refresh.await {
        tracing::warn!(error = %e, "refresh task ended abnormally");
    }
    tracing::info!("shutdown complete");

    served.map_err(TickwatchError::from)
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}
