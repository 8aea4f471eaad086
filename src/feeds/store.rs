use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, IntoStaticStr};
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::api::ClientError;
use crate::poll::SequencedSink;
use crate::sequence::{AppliedMark, Sequencer, Ticket};

/// What a widget does with its data when a fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Keep the last good data and mark it stale.
    #[default]
    KeepStale,
    /// Show the feed's canned demonstration data, labeled as such.
    Demonstration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedStatus {
    Loading,
    Live,
    Stale,
    Unavailable,
    Demonstration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedState<T> {
    pub data: Option<T>,
    pub status: FeedStatus,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub sequence: u64,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: FeedStatus::Loading,
            last_success: None,
            last_error: None,
            sequence: 0,
        }
    }
}

pub struct FeedStore;

impl FeedStore {
    pub fn new<T>(
        name: &'static str,
        policy: FallbackPolicy,
        demonstration: Option<fn() -> T>,
    ) -> (FeedWriter<T>, FeedHandle<T>) {
        let (tx, rx) = watch::channel(FeedState::default());
        let writer = FeedWriter {
            name,
            tx,
            sequencer: Arc::new(Sequencer::new()),
            mark: AppliedMark::default(),
            policy,
            demonstration,
        };
        (writer, FeedHandle { rx })
    }
}

/// Single writer of one widget's state.
pub struct FeedWriter<T> {
    name: &'static str,
    tx: watch::Sender<FeedState<T>>,
    sequencer: Arc<Sequencer>,
    mark: AppliedMark,
    policy: FallbackPolicy,
    demonstration: Option<fn() -> T>,
}

impl<T> FeedWriter<T> {
    pub fn begin(&self) -> Ticket {
        self.sequencer.next()
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<T, ClientError>) -> bool {
        if !self.mark.accept(ticket) {
            log::debug!("Discarding stale {} response {}", self.name, ticket.value());
            return false;
        }

        let now = Utc::now();
        let name = self.name;
        let policy = self.policy;
        let demonstration = self.demonstration;
        self.tx.send_modify(|state| {
            state.sequence = ticket.value();
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.status = FeedStatus::Live;
                    state.last_success = Some(now);
                    state.last_error = None;
                }
                Err(e) => {
                    log::warn!("Failed to refresh {} feed: {}", name, e);
                    state.last_error = Some(e.to_string());
                    match (policy, demonstration) {
                        (FallbackPolicy::Demonstration, Some(demo)) => {
                            state.data = Some(demo());
                            state.status = FeedStatus::Demonstration;
                        }
                        _ if state.data.is_some() => state.status = FeedStatus::Stale,
                        _ => state.status = FeedStatus::Unavailable,
                    }
                }
            }
        });
        true
    }
}

impl<T: Send + Sync + 'static> SequencedSink for FeedWriter<T> {
    type Item = Result<T, ClientError>;

    fn begin(&self) -> Ticket {
        FeedWriter::begin(self)
    }

    fn apply(&mut self, ticket: Ticket, item: Self::Item) -> bool {
        FeedWriter::apply(self, ticket, item)
    }
}

pub struct FeedHandle<T> {
    rx: watch::Receiver<FeedState<T>>,
}

impl<T> Clone for FeedHandle<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: Clone> FeedHandle<T> {
    pub fn state(&self) -> FeedState<T> {
        self.rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FeedState<T>> {
        self.rx.clone()
    }
}

/// Logs each status transition of one feed. Returns once the writer is gone.
pub async fn log_status_changes<T: Clone>(name: &'static str, handle: FeedHandle<T>) {
    let mut rx = handle.watch();
    let mut last = rx.borrow_and_update().status;
    while rx.changed().await.is_ok() {
        let (status, error) = {
            let state = rx.borrow_and_update();
            (state.status, state.last_error.clone())
        };
        if status == last {
            continue;
        }
        match status {
            FeedStatus::Live => log::info!("{} feed is live ({} before)", name, last),
            FeedStatus::Loading => {}
            _ => log::warn!(
                "{} feed is now {}: {}",
                name,
                status,
                error.as_deref().unwrap_or("no error reported")
            ),
        }
        last = status;
    }
    log::debug!("{} feed closed", name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn upstream_down() -> ClientError {
        ClientError::Status {
            path: "/x".into(),
            status: StatusCode::BAD_GATEWAY,
        }
    }

    fn demo() -> Vec<u32> {
        vec![99]
    }

    const DEMO: Option<fn() -> Vec<u32>> = Some(demo);

    #[test]
    fn keep_stale_retains_previous_data() {
        let (mut writer, handle) = FeedStore::new("test", FallbackPolicy::KeepStale, DEMO);
        let t1 = writer.begin();
        writer.apply(t1, Ok(vec![1, 2]));
        let t2 = writer.begin();
        writer.apply(t2, Err(upstream_down()));

        let state = handle.state();
        assert_eq!(state.status, FeedStatus::Stale);
        assert_eq!(state.data, Some(vec![1, 2]));
        assert!(state.last_error.is_some());
        assert!(state.last_success.is_some());
    }

    #[test]
    fn failure_before_any_data_is_unavailable() {
        let (mut writer, handle) =
            FeedStore::new::<Vec<u32>>("test", FallbackPolicy::KeepStale, None);
        let t = writer.begin();
        writer.apply(t, Err(upstream_down()));

        let state = handle.state();
        assert_eq!(state.status, FeedStatus::Unavailable);
        assert_eq!(state.data, None);
        assert_ne!(state.status, FeedStatus::Loading);
    }

    #[test]
    fn demonstration_policy_substitutes_labeled_data() {
        let (mut writer, handle) =
            FeedStore::new("test", FallbackPolicy::Demonstration, DEMO);
        let t = writer.begin();
        writer.apply(t, Err(upstream_down()));

        let state = handle.state();
        assert_eq!(state.status, FeedStatus::Demonstration);
        assert_eq!(state.data, Some(vec![99]));
    }

    #[test]
    fn recovery_returns_to_live() {
        let (mut writer, handle) = FeedStore::new("test", FallbackPolicy::Demonstration, DEMO);
        let t1 = writer.begin();
        writer.apply(t1, Err(upstream_down()));
        let t2 = writer.begin();
        writer.apply(t2, Ok(vec![5]));

        let state = handle.state();
        assert_eq!(state.status, FeedStatus::Live);
        assert_eq!(state.data, Some(vec![5]));
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn late_response_does_not_overwrite_newer_one() {
        let (mut writer, handle) = FeedStore::new("test", FallbackPolicy::KeepStale, DEMO);
        let old = writer.begin();
        let new = writer.begin();
        assert!(writer.apply(new, Ok(vec![2])));
        assert!(!writer.apply(old, Ok(vec![1])));
        assert_eq!(handle.state().data, Some(vec![2]));
    }
}
