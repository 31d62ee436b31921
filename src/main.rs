use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use spring_context_gen::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志 (stderr only, stdout 只输出文档)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid --log-level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = match args.to_config() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors.0 {
                eprintln!("{error}");
            }
            eprintln!("Type \"--help\" for help.");
            std::process::exit(1);
        }
    };

    cli::handle(&config, args.json)
}
