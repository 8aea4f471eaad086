use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval, MissedTickBehavior};

use crate::sequence::Ticket;

/// Destination of a poll loop: hands out tickets and applies finished fetches.
pub trait SequencedSink: Send + 'static {
    type Item: Send + 'static;

    fn begin(&self) -> Ticket;
    fn apply(&mut self, ticket: Ticket, item: Self::Item) -> bool;
}

/// Running poll loop. Dropping the handle also ends the loop.
pub struct PollerHandle {
    name: &'static str,
    stop_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stops the timer and aborts requests still in flight.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.join).await {
            log::error!("Poller {} ended abnormally: {}", self.name, e);
        }
    }
}

/// Fetches immediately, then once per `period`. Each fetch runs as its own
/// task so a slow request does not hold back the next tick; the sink decides
/// which responses are still current.
pub fn spawn_poll_loop<S, F, Fut>(
    name: &'static str,
    period: Duration,
    mut sink: S,
    fetch: F,
) -> PollerHandle
where
    S: SequencedSink,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = S::Item> + Send + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        log::info!("Starting {} poller (every {:?})", name, period);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut inflight: JoinSet<(Ticket, S::Item)> = JoinSet::new();

        loop {
            tokio::select! {
                _ = &mut stop_rx => {
                    inflight.abort_all();
                    break;
                }
                _ = ticker.tick() => {
                    let ticket = sink.begin();
                    log::debug!(
                        "{} poll {} issued ({} in flight)",
                        name,
                        ticket.value(),
                        inflight.len()
                    );
                    let request = fetch();
                    inflight.spawn(async move { (ticket, request.await) });
                }
                Some(joined) = inflight.join_next() => {
                    match joined {
                        Ok((ticket, item)) => {
                            sink.apply(ticket, item);
                        }
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => log::error!("{} poll task failed: {}", name, e),
                    }
                }
            }
        }

        while inflight.join_next().await.is_some() {}
        log::info!("Stopped {} poller", name);
    });

    PollerHandle {
        name,
        stop_tx: Some(stop_tx),
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{AppliedMark, Sequencer};
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        sequencer: Sequencer,
        mark: AppliedMark,
        applied: Arc<Mutex<Vec<u32>>>,
    }

    impl SequencedSink for Recorder {
        type Item = u32;

        fn begin(&self) -> Ticket {
            self.sequencer.next()
        }

        fn apply(&mut self, ticket: Ticket, item: u32) -> bool {
            if !self.mark.accept(ticket) {
                return false;
            }
            self.applied.lock().unwrap().push(item);
            true
        }
    }

    fn recorder() -> (Recorder, Arc<Mutex<Vec<u32>>>) {
        let applied = Arc::new(Mutex::new(Vec::new()));
        let sink = Recorder {
            sequencer: Sequencer::new(),
            mark: AppliedMark::default(),
            applied: applied.clone(),
        };
        (sink, applied)
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn first_fetch_is_immediate_and_applied() {
        let (sink, applied) = recorder();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let poller = spawn_poll_loop("test", Duration::from_secs(3600), sink, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { n }
        });

        for _ in 0..100 {
            if !applied.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        poller.stop().await;

        assert_eq!(*applied.lock().unwrap(), vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stop_aborts_requests_in_flight() {
        let (sink, applied) = recorder();
        let dropped = Arc::new(AtomicBool::new(false));
        let started = Arc::new(AtomicBool::new(false));
        let (flag, seen) = (dropped.clone(), started.clone());
        let poller = spawn_poll_loop("test", Duration::from_secs(3600), sink, move || {
            let guard = SetOnDrop(flag.clone());
            let seen = seen.clone();
            async move {
                seen.store(true, Ordering::SeqCst);
                let _guard = guard;
                std::future::pending::<u32>().await
            }
        });

        for _ in 0..100 {
            if started.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        poller.stop().await;

        assert!(started.load(Ordering::SeqCst));
        assert!(dropped.load(Ordering::SeqCst));
        assert!(applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dropping_the_handle_ends_the_loop() {
        let (sink, _applied) = recorder();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let poller = spawn_poll_loop("test", Duration::from_millis(10), sink, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { 0 }
        });
        drop(poller);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let after_drop = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_drop);
    }
}
