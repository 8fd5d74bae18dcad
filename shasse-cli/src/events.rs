//! Drive an async scrape while draining its progress events.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Upper bound on draining events once the task is done, in case a sender
/// clone outlives it.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, handing every event received on `events` to
/// `on_event`. Events still queued when the task finishes are handled before
/// returning.
pub(crate) async fn run_with_events<F, E, R>(
    task: F,
    mut events: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);

    let mut result = None;
    loop {
        tokio::select! {
            r = &mut task => {
                result = Some(r);
                break;
            }
            event = events.recv() => match event {
                Some(e) => on_event(e),
                None => break,
            },
        }
    }

    match result {
        Some(r) => {
            drain(&mut events, &mut on_event).await;
            r
        }
        // Every sender is gone; the task can finish on its own.
        None => task.await,
    }
}

async fn drain<E>(events: &mut mpsc::UnboundedReceiver<E>, on_event: &mut impl FnMut(E)) {
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Some(e)) => on_event(e),
            Ok(None) => break,
            Err(_) => {
                log::warn!(
                    "Stopped waiting for progress events after {}s",
                    DRAIN_TIMEOUT.as_secs()
                );
                break;
            }
        }
    }
}
