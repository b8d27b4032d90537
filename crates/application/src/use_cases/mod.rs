//! Application use cases (business logic orchestration).

mod fetch_resource;
mod paginated_fetch;

pub use fetch_resource::FetchResource;
pub use paginated_fetch::PaginatedFetch;

use serde::de::DeserializeOwned;
use splitdeck_domain::{ApiRequest, FailureCause};
use tracing::{debug, error};

use crate::ports::ApiTransport;

/// Sends one request and decodes a 2xx JSON body.
///
/// Non-2xx bodies are read as text and logged at error level before
/// being returned as the failure cause.
async fn get_json<C, T>(client: &C, request: &ApiRequest) -> Result<T, FailureCause>
where
    C: ApiTransport + ?Sized,
    T: DeserializeOwned,
{
    let response = client.get(request).await.map_err(|e| {
        error!(path = %request.path, error = %e, "request failed");
        FailureCause::Transport {
            message: e.to_string(),
        }
    })?;

    if !response.is_ok() {
        let body = response.text();
        error!(
            path = %request.path,
            status = response.status.as_u16(),
            body = %body,
            "server returned an error"
        );
        return Err(FailureCause::Status {
            status: response.status.as_u16(),
            body,
        });
    }

    debug!(path = %request.path, bytes = response.body.len(), "response received");
    response.json().map_err(|e| {
        error!(path = %request.path, error = %e, "response is not the expected JSON");
        FailureCause::Decode {
            message: e.to_string(),
        }
    })
}
