//! Keeping the REPL alive while a child command runs
//!
//! Termination signals are caught and dropped on a background thread. The
//! child process still receives them from the terminal, the parent does not
//! die with it.

use std::io;

/// Install handlers that swallow interrupt and termination signals.
///
/// Handlers are registered before this returns.
pub fn absorb_termination_signals() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let listeners = {
        let _guard = runtime.enter();
        register()?
    };

    std::thread::Builder::new()
        .name("dcr-signals".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                for listener in listeners {
                    tokio::spawn(listener.absorb());
                }
                std::future::pending::<()>().await
            })
        })?;

    Ok(())
}

#[cfg(unix)]
struct Listener {
    name: &'static str,
    signal: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Listener {
    async fn absorb(mut self) {
        while self.signal.recv().await.is_some() {
            tracing::debug!("Ignored {}", self.name);
        }
    }
}

#[cfg(unix)]
fn register() -> io::Result<Vec<Listener>> {
    use tokio::signal::unix::{signal, SignalKind};

    [
        ("SIGHUP", SignalKind::hangup()),
        ("SIGINT", SignalKind::interrupt()),
        ("SIGTERM", SignalKind::terminate()),
        ("SIGQUIT", SignalKind::quit()),
    ]
    .into_iter()
    .map(|(name, kind)| -> io::Result<Listener> {
        Ok(Listener {
            name,
            signal: signal(kind)?,
        })
    })
    .collect()
}

#[cfg(not(unix))]
struct Listener;

#[cfg(not(unix))]
impl Listener {
    async fn absorb(self) {
        while tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Ignored Ctrl-C");
        }
    }
}

#[cfg(not(unix))]
fn register() -> io::Result<Vec<Listener>> {
    Ok(vec![Listener])
}
