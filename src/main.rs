/*!
 * Sandbox Filesystem Server - Main Entry Point
 *
 * Serves per-alias sandboxed directories and a shared image directory
 * from the host filesystem.
 */

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use sandboxfs::{
    init_tracing, AliasLocks, Dispatcher, FileSystem, ImageStore, LocalFS, Router, SandboxRoots,
    Server, ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        base_path = %config.base_path.display(),
        image_dir = %config.image_dir.display(),
        bind = %config.bind,
        alias_locking = config.alias_locking,
        workers = config.workers,
        "sandboxfs starting"
    );

    let fs: Arc<dyn FileSystem> = Arc::new(LocalFS::new());

    let roots = SandboxRoots::new(fs.clone(), &config.base_path)
        .with_context(|| format!("cannot prepare base path {}", config.base_path.display()))?;
    if config.image_dir.starts_with(roots.base()) {
        warn!("Image directory lies inside the alias base path; an alias may shadow it");
    }
    let dispatcher = Dispatcher::new(fs.clone(), roots, AliasLocks::new(config.alias_locking));

    let images = ImageStore::new(fs.clone(), &config.image_dir)
        .with_context(|| format!("cannot prepare image directory {}", config.image_dir.display()))?;

    let router = Router::new(Arc::new(dispatcher), Arc::new(images));
    let server = Server::bind(config.bind, router)
        .with_context(|| format!("cannot bind {}", config.bind))?
        .with_max_body_bytes(config.max_body_bytes)
        .with_workers(config.workers);

    let stop = server.shutdown_handle();
    let serving = tokio::task::spawn_blocking(move || server.run());

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                stop.shutdown();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    info!("Press Ctrl+C to exit");
    serving.await.context("HTTP server thread panicked")??;

    info!("sandboxfs stopped");
    Ok(())
}
