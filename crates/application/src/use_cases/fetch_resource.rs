//! Unpaginated collection fetch.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use splitdeck_domain::{ApiEndpoint, ApiKey, ApiRequest, FetchFailure, FetchOutcome};
use tracing::debug;

use super::get_json;
use crate::ports::ApiTransport;

/// Reads a collection that the server returns as a single JSON array.
pub struct FetchResource<C: ApiTransport> {
    client: Arc<C>,
}

impl<C: ApiTransport> FetchResource<C> {
    /// Creates the routine.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Issues one GET for `endpoint` and decodes the whole body.
    ///
    /// The outcome is either `Complete` or `Failed`; there are no pages to
    /// be partial about.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &ApiEndpoint,
        api_key: &ApiKey,
    ) -> FetchOutcome<T> {
        let request = ApiRequest::get(endpoint.path(), api_key.clone());
        debug!(path = %request.path, "requesting collection");
        match get_json::<_, Vec<T>>(self.client.as_ref(), &request).await {
            Ok(items) => FetchOutcome::Complete(items),
            Err(cause) => FetchOutcome::Failed(FetchFailure::new(cause)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{PagedApi, api_key};
    use splitdeck_domain::{Environment, FailureCause, OutcomeKind, WorkspaceId};

    fn endpoint() -> ApiEndpoint {
        ApiEndpoint::Environments(WorkspaceId::new("ws-1").unwrap())
    }

    #[tokio::test]
    async fn test_environments_are_read_in_one_request() {
        let api = Arc::new(PagedApi::with_environments(3));
        let outcome = FetchResource::new(Arc::clone(&api))
            .execute::<Environment>(&endpoint(), &api_key())
            .await;

        assert_eq!(outcome.kind(), OutcomeKind::Complete);
        assert_eq!(outcome.items().len(), 3);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "v2/environments/ws/ws-1");
        assert!(requests[0].query.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_failed_without_items() {
        let api = Arc::new(PagedApi::with_environments(3).failing_at(0, 404));
        let outcome = FetchResource::new(api)
            .execute::<Environment>(&endpoint(), &api_key())
            .await;

        assert_eq!(outcome.kind(), OutcomeKind::Failed);
        let failure = outcome.failure().expect("failed outcome");
        assert_eq!(failure.offset, None);
        assert!(matches!(
            failure.cause,
            FailureCause::Status { status: 404, .. }
        ));
    }
}
