use chrono::Utc;
use std::time::Duration;

use crate::api::{ApiClient, ClientError};
use crate::poll::PollerHandle;
use crate::tracking::Satellite;

use super::store::{FallbackPolicy, FeedHandle, FeedStore, FeedWriter};
use super::spawn_feed;

pub const CATALOG_PERIOD: Duration = Duration::from_secs(30);

pub fn catalog_store() -> (FeedWriter<Vec<Satellite>>, FeedHandle<Vec<Satellite>>) {
    FeedStore::new("catalog", FallbackPolicy::KeepStale, None)
}

pub fn spawn_catalog_feed(
    client: ApiClient,
    writer: FeedWriter<Vec<Satellite>>,
    period: Duration,
) -> PollerHandle {
    spawn_feed("catalog", period, client, writer, |client| async move {
        fetch_catalog(&client).await
    })
}

pub async fn fetch_catalog(client: &ApiClient) -> Result<Vec<Satellite>, ClientError> {
    let received_at = Utc::now();
    let records = client.satellite_catalog().await?;
    Ok(records
        .into_iter()
        .map(|record| Satellite::from_catalog(record, received_at))
        .collect())
}
