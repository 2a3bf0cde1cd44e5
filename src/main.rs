#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use publish_times::console::Console;
use publish_times::core::config::{self, ConfigSources};
use publish_times::shell_cmd::{self, ErrorPolicy, ShellOptions};
use publish_times::storage::{CollectionStore, Session};

#[derive(Parser, Debug)]
#[command(name = "publish-times")]
#[command(about = "Inspect publish durations, file counts and sizes from a publish log", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set PUBLISH_TIMES_LOG)
    #[arg(long)]
    verbose: bool,

    /// Publish log directory holding the collection json files
    #[arg(long, env = "PUBLISH_LOG_DIR")]
    publish_log_dir: Option<PathBuf>,

    /// Content root; the publish log defaults to <root>/zebedee/publish-log
    #[arg(long, env = "zebedee_root", hide_env_values = true)]
    zebedee_root: Option<PathBuf>,

    /// TOML file providing publish_log_dir and retention_cap
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of most recent publishes to keep (0 keeps all)
    #[arg(long, env = "PUBLISH_TIMES_LIMIT")]
    limit: Option<usize>,

    /// Report filesystem and record errors as warnings instead of exiting
    #[arg(long)]
    keep_going: bool,

    /// Disable coloured output (also honours NO_COLOR)
    #[arg(long)]
    no_color: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("PUBLISH_TIMES_LOG").unwrap_or_else(|_| {
        if verbose {
            "publish_times=debug".to_string()
        } else {
            "publish_times=warn".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::resolve(ConfigSources {
        publish_log_dir: cli.publish_log_dir,
        retention_cap: cli.limit,
        config_file: cli.config,
        zebedee_root: cli.zebedee_root,
    })?;
    info!(
        publish_log_dir = %config.publish_log_dir.display(),
        retention_cap = config.retention_cap,
        "configuration"
    );

    let mut session = Session::open(CollectionStore::from_config(&config)).with_context(|| {
        format!(
            "failed to load publish log {}",
            config.publish_log_dir.display()
        )
    })?;

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let options = ShellOptions {
        policy: if cli.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        },
        console: Console::new(color),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell_cmd::run(&mut session, stdin.lock(), &mut stdout, &options)?;
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
