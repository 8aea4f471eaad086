use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;

use crate::api::{ApiClient, ClientError, ConjunctionEvent, ConjunctionEventsQuery};
use crate::poll::PollerHandle;

use super::store::{FallbackPolicy, FeedHandle, FeedStore, FeedWriter};
use super::spawn_feed;

pub const CONJUNCTION_PERIOD: Duration = Duration::from_secs(30);

pub type Conjunctions = Vec<ConjunctionEvent>;

pub fn conjunction_store(
    policy: FallbackPolicy,
) -> (FeedWriter<Conjunctions>, FeedHandle<Conjunctions>) {
    FeedStore::new("conjunctions", policy, Some(demonstration_events))
}

pub fn spawn_conjunction_feed(
    client: ApiClient,
    writer: FeedWriter<Conjunctions>,
    period: Duration,
) -> PollerHandle {
    spawn_feed("conjunctions", period, client, writer, |client| async move {
        fetch_conjunctions(&client).await
    })
}

/// Events from the last 24 hours above Pc 1e-6, risk labels lower-cased.
pub async fn fetch_conjunctions(client: &ApiClient) -> Result<Conjunctions, ClientError> {
    let events = client
        .conjunction_events(&ConjunctionEventsQuery::default())
        .await?;
    Ok(events.into_iter().map(normalize).collect())
}

fn normalize(mut event: ConjunctionEvent) -> ConjunctionEvent {
    event.risk_level = event.risk_level.trim().to_lowercase();
    event
}

/// The two canned events shown when the backend cannot be reached and the
/// demonstration fallback is enabled. Never presented as live.
pub fn demonstration_events() -> Conjunctions {
    let now = Utc::now();
    vec![
        ConjunctionEvent {
            id: 1,
            primary_norad_id: 25544,
            secondary_norad_id: 12345,
            tca_datetime: (now + ChronoDuration::hours(2)).to_rfc3339(),
            miss_distance_meters: 1200.0,
            probability: 2.4e-6,
            relative_velocity_mps: 7500.0,
            risk_level: "medium".into(),
        },
        ConjunctionEvent {
            id: 2,
            primary_norad_id: 49044,
            secondary_norad_id: 28096,
            tca_datetime: (now + ChronoDuration::hours(4)).to_rfc3339(),
            miss_distance_meters: 800.0,
            probability: 1.2e-4,
            relative_velocity_mps: 7200.0,
            risk_level: "high".into(),
        },
    ]
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0}m", meters)
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

pub fn format_probability(probability: f64) -> String {
    format!("{:.1e}", probability)
}

pub fn format_risk(risk_level: &str) -> String {
    risk_level.to_uppercase()
}
