use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use todos_core::config::DEFAULT_LOG_LEVEL;
use todos_core::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use todos_web::serve;

#[derive(Parser)]
#[command(name = "todos")]
#[command(version, about = "Minimal task-tracking web application", long_about = None)]
struct Cli {
    /// Log filter (e.g. `debug`, `todos_core=debug`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve(ServeArgs),
    /// Print the default configuration as TOML
    Config,
}

#[derive(Args)]
struct ServeArgs {
    /// Config file (defaults to ./todos.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,

    /// Store connection descriptor, e.g. `memory` or `host:port?auth=basic;user=u;password=p;ssl=false;`
    #[arg(long)]
    connection: Option<String>,

    /// Collection path, e.g. `/apps/todos`
    #[arg(long)]
    store_path: Option<String>,

    /// Open the task list in a browser
    #[arg(long)]
    open: bool,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(connection) = self.connection {
            config.store.connection = connection;
        }
        if let Some(store_path) = self.store_path {
            config.store.store_path = store_path;
        }
        if self.open {
            config.server.open_browser = true;
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
        Commands::Serve(args) => {
            let mut config = match &args.config {
                Some(path) => Config::from_file(path)?,
                None => Config::load()?,
            };
            args.apply(&mut config);

            init_logging(cli.log_level.as_deref(), &config.logging.level);
            serve::start_server(config).await?;
        }
    }

    Ok(())
}

/// Install the global subscriber.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then the config file.
fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .or_else(|| EnvFilter::try_new(config_level).ok())
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
