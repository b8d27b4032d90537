//! Paginated collection fetch.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use splitdeck_domain::{
    ApiEndpoint, ApiKey, ApiRequest, DomainResult, FetchFailure, FetchOutcome, Page, PageCursor,
};
use tracing::debug;

use super::get_json;
use crate::ports::ApiTransport;

/// Reads a whole server-side paginated collection.
///
/// Pages are requested strictly one after another: the number of pages
/// is only known from the `totalCount` of the page before. The loop
/// stops at the first failed page and reports what it had read so far.
///
/// # Example
///
/// ```ignore
/// let fetch = PaginatedFetch::new(Arc::new(client), 10)?;
/// let outcome = fetch.execute::<Workspace>(&ApiEndpoint::Workspaces, &key).await;
/// ```
pub struct PaginatedFetch<C: ApiTransport> {
    client: Arc<C>,
    first_page: PageCursor,
}

impl<C: ApiTransport> PaginatedFetch<C> {
    /// Creates the routine with the given page size.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageSize` for an unusable page size.
    pub fn new(client: Arc<C>, page_size: u32) -> DomainResult<Self> {
        Ok(Self {
            client,
            first_page: PageCursor::first(page_size)?,
        })
    }

    /// Page size used for every request.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.first_page.limit()
    }

    /// Fetches every page of `endpoint` with `limit`/`offset` paging.
    ///
    /// Each run owns its accumulator, so concurrent runs never see each
    /// other's items.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &ApiEndpoint,
        api_key: &ApiKey,
    ) -> FetchOutcome<T> {
        let path = endpoint.path();
        let mut cursor = self.first_page;
        let mut items = Vec::new();
        let mut pages_read = 0u64;

        loop {
            let page_request = cursor.request();
            let request = ApiRequest::get(path.clone(), api_key.clone()).with_page(page_request);
            debug!(
                path = %path,
                page = cursor.page_index(),
                limit = page_request.limit,
                offset = page_request.offset,
                "requesting page"
            );

            let page: Page<T> = match get_json(self.client.as_ref(), &request).await {
                Ok(page) => page,
                Err(cause) => {
                    let failure = FetchFailure::at_offset(cause, page_request.offset);
                    return FetchOutcome::interrupted(items, pages_read, failure);
                }
            };

            pages_read += 1;
            let total_count = page.total_count;
            if pages_read == 1 {
                debug!(
                    path = %path,
                    total_count,
                    pages = cursor.pages_required(total_count),
                    "collection size known"
                );
            }
            items.extend(page.objects);

            match cursor.advance(total_count) {
                Some(next) => cursor = next,
                None => {
                    debug!(path = %path, pages = pages_read, items = items.len(), "collection read");
                    return FetchOutcome::Complete(items);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{PagedApi, api_key};
    use pretty_assertions::assert_eq;
    use splitdeck_domain::{FailureCause, OutcomeKind, Workspace, WorkspaceId};

    fn fetch(api: &Arc<PagedApi>) -> PaginatedFetch<PagedApi> {
        PaginatedFetch::new(Arc::clone(api), 10).expect("valid page size")
    }

    #[tokio::test]
    async fn test_empty_collection_issues_one_request() {
        let api = Arc::new(PagedApi::with_workspaces(0));
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert_eq!(outcome.kind(), OutcomeKind::Complete);
        assert!(outcome.items().is_empty());
        assert_eq!(api.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_twenty_five_items_in_three_pages() {
        let api = Arc::new(PagedApi::with_workspaces(25));
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert_eq!(api.offsets(), vec![0, 10, 20]);
        let items = outcome.items();
        assert_eq!(items.len(), 25);
        assert_eq!(items[0].name, "workspace-0");
        assert_eq!(items[24].name, "workspace-24");
    }

    #[tokio::test]
    async fn test_page_count_for_many_totals() {
        for total in [1usize, 9, 10, 11, 30, 99, 100, 101] {
            let api = Arc::new(PagedApi::with_workspaces(total));
            let outcome = fetch(&api)
                .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
                .await;
            assert_eq!(api.offsets().len(), total.div_ceil(10).max(1), "total {total}");
            assert_eq!(outcome.items().len(), total);
        }
    }

    #[tokio::test]
    async fn test_requests_carry_limit_and_credential() {
        let api = Arc::new(PagedApi::with_workspaces(15));
        let _ = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        for request in api.requests() {
            assert_eq!(request.path, "v2/workspaces");
            assert_eq!(request.query_param("limit"), Some("10"));
            assert_eq!(request.api_key, api_key());
        }
    }

    #[tokio::test]
    async fn test_failure_on_second_page_is_partial() {
        let api = Arc::new(PagedApi::with_workspaces(25).failing_at(10, 500));
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert_eq!(api.offsets(), vec![0, 10]);
        assert_eq!(outcome.kind(), OutcomeKind::Partial);
        assert_eq!(outcome.items().len(), 10);

        let failure = outcome.failure().expect("partial has a failure");
        assert_eq!(failure.offset, Some(10));
        assert!(matches!(
            failure.cause,
            FailureCause::Status { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_failure_on_first_page_is_failed() {
        let api = Arc::new(PagedApi::with_workspaces(25).failing_at(0, 401));
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert_eq!(api.offsets(), vec![0]);
        assert_eq!(outcome.kind(), OutcomeKind::Failed);
    }

    #[tokio::test]
    async fn test_malformed_page_is_decode_failure() {
        let api = Arc::new(PagedApi::with_workspaces(5).malformed());
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert!(matches!(
            outcome.failure().map(|f| &f.cause),
            Some(FailureCause::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_error_stops_pagination() {
        let api = Arc::new(PagedApi::with_workspaces(25).unreachable_at(20));
        let outcome = fetch(&api)
            .execute::<Workspace>(&ApiEndpoint::Workspaces, &api_key())
            .await;

        assert_eq!(outcome.kind(), OutcomeKind::Partial);
        assert_eq!(outcome.items().len(), 20);
        assert!(matches!(
            outcome.failure().map(|f| &f.cause),
            Some(FailureCause::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_splits_endpoint_is_scoped_to_workspace() {
        let api = Arc::new(PagedApi::with_splits(3));
        let ws = WorkspaceId::new("ws-1").unwrap();
        let outcome = fetch(&api)
            .execute::<splitdeck_domain::Split>(&ApiEndpoint::Splits(ws), &api_key())
            .await;

        assert!(outcome.is_complete());
        assert_eq!(api.requests()[0].path, "v2/splits/ws/ws-1");
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        let api = Arc::new(PagedApi::with_workspaces(0));
        assert!(PaginatedFetch::new(api, 0).is_err());
    }
}
