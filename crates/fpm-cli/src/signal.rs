//! Ctrl-C handling
//!
//! The first interrupt raises the shared [`CancelFlag`]; fetch loops notice
//! it at their next check and the command unwinds with an "interrupted"
//! error. A second interrupt exits immediately.

use fpm_registry::CancelFlag;
use tracing::{debug, warn};

/// Exit status used when the user insists on stopping
const INTERRUPT_EXIT_CODE: i32 = 130;

/// Watch for Ctrl-C on a background thread.
pub fn spawn_interrupt_watcher(cancel: CancelFlag) {
    let spawned = std::thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!("Failed to start interrupt watcher: {}", e);
                    return;
                }
            };
            runtime.block_on(watch(cancel));
        });

    if let Err(e) = spawned {
        warn!("Failed to spawn interrupt watcher: {}", e);
    }
}

async fn watch(cancel: CancelFlag) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    debug!("Received Ctrl+C, cancelling");
    eprintln!("Interrupted, stopping after the current request (Ctrl+C again to abort)");
    cancel.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        std::process::exit(INTERRUPT_EXIT_CODE);
    }
}
