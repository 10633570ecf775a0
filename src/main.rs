use anyhow::Result;
use dumpload::{config::DEFAULT_CONFIG_PATH, process_data_dump, Config};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load config ──────────────────────────────────────────────
    let cfg = Config::load(DEFAULT_CONFIG_PATH)?;
    info!(
        url = %cfg.download_url,
        db = %cfg.database_path.display(),
        work_dir = %cfg.work_dir.display(),
        "config loaded"
    );

    // ─── 3) run the pipeline ─────────────────────────────────────────
    // failures are already logged with their stage by the pipeline
    match process_data_dump(&cfg).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
