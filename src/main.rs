use anyhow::Context;
use clap::Parser;

use bookstack_kernel::settings::Settings;
use bookstack_kernel::{InitCtx, ModuleRegistry};

/// Book inventory service
#[derive(Debug, Parser)]
#[command(name = "bookstack-app", version, about = "Book inventory service")]
struct Args {
    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookstack settings")?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    bookstack_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        snapshot = ?settings.database.snapshot_path,
        "bookstack-app bootstrap starting"
    );

    let store = bookstack_db::Store::open(settings.database.snapshot_path.as_deref())
        .with_context(|| "failed to open record store")?;

    let mut registry = ModuleRegistry::new();
    bookstack_app::register_all(&mut registry, &store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    bookstack_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;

    tracing::info!("bookstack-app shutdown complete");
    Ok(())
}
