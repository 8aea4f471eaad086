use std::sync::Arc;

use crate::api::ApiClient;
use crate::content::Content;
use crate::feeds::Feeds;
use crate::tracking::TrackingHandle;

use super::config::Config;

/// Shared by every handler. Only read-only views of the polled data live
/// here; the writers belong to the poll loops.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: ApiClient,
    pub content: Arc<Content>,
    pub tracking: TrackingHandle,
    pub feeds: Feeds,
}
