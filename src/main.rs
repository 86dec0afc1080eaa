use anyhow::Result;
use podium::{
    config::{Config, OutputKind},
    fetch::HttpSheet,
    render::{ConsoleSink, JsonSink},
    schedule::Scheduler,
};
use reqwest::Client;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) configuration & HTTP client ──────────────────────────────
    let cfg = Config::from_env()?;
    info!(url = %cfg.sheet_url, refresh_secs = cfg.refresh.as_secs(), "startup");

    let client = Client::builder().timeout(cfg.request_timeout).build()?;
    let sheet = HttpSheet::new(client, cfg.sheet_url.clone());

    // ─── 3) wire ctrl-c to the shutdown channel ──────────────────────
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            let _ = stop_tx.send(true);
        }
    });

    // ─── 4) run the refresh loop until shutdown ──────────────────────
    match cfg.output {
        OutputKind::Console => {
            Scheduler::new(sheet, ConsoleSink::stdout(), cfg.refresh)
                .run(stop_rx)
                .await
        }
        OutputKind::Json => {
            Scheduler::new(sheet, JsonSink::stdout(), cfg.refresh)
                .run(stop_rx)
                .await
        }
    }

    info!("shutdown complete");
    Ok(())
}
