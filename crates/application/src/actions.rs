//! Store actions.
//!
//! Actions run a fetch, then commit the result into the [`AdminStore`]
//! according to the configured [`CommitPolicy`], record a load state and
//! notify the user. Fetch failures never escape as errors: every action
//! returns a [`FetchReport`] describing what happened.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use splitdeck_domain::{
    ApiEndpoint, ApiKey, ClientSettings, CollectionKind, CommitPolicy, Environment,
    FailureCause, FetchFailure, FetchOutcome, LoadState, Notification, OutcomeKind, Split,
    Workspace, WorkspaceId, generate_run_id,
};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::error::ApplicationResult;
use crate::ports::{ApiTransport, Clock, Notifier};
use crate::store::AdminStore;
use crate::use_cases::{FetchResource, PaginatedFetch};

/// What one action run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    /// Collection the action targeted.
    pub collection: CollectionKind,
    /// Identifies the run in logs.
    pub run_id: Uuid,
    /// How far the fetch got.
    pub outcome: OutcomeKind,
    /// Number of items read.
    pub items: usize,
    /// Whether the items replaced the store's collection.
    pub committed: bool,
    /// What stopped the fetch, if anything.
    pub failure: Option<FetchFailure>,
}

impl FetchReport {
    /// Returns true if the collection was read completely and committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome == OutcomeKind::Complete && self.committed
    }
}

/// Orchestrates fetches against the store.
///
/// Each invocation owns its accumulator; running the same action twice
/// concurrently is safe and the run that commits last wins.
pub struct StoreActions<C: ApiTransport> {
    store: AdminStore,
    pages: PaginatedFetch<C>,
    resource: FetchResource<C>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    policy: CommitPolicy,
}

impl<C: ApiTransport> StoreActions<C> {
    /// Creates the actions for `store`, talking to the API through `client`.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` do not validate.
    pub fn new(
        store: AdminStore,
        client: Arc<C>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: &ClientSettings,
    ) -> ApplicationResult<Self> {
        settings.validate()?;
        Ok(Self {
            store,
            pages: PaginatedFetch::new(Arc::clone(&client), settings.page_size)?,
            resource: FetchResource::new(client),
            notifier,
            clock,
            policy: settings.commit_policy,
        })
    }

    /// The store this instance commits into.
    #[must_use]
    pub const fn store(&self) -> &AdminStore {
        &self.store
    }

    /// Sets the credential used by subsequent fetches.
    pub fn login(&self, api_key: ApiKey) {
        self.store.set_api_key(Some(api_key));
        info!("API key set");
    }

    /// Drops the credential.
    pub fn logout(&self) {
        self.store.set_api_key(None);
        info!("API key cleared");
    }

    /// Selects the workspace that environment and split fetches target.
    pub fn select_workspace(&self, workspace: WorkspaceId) {
        info!(workspace = %workspace, "workspace selected");
        self.store.set_current_workspace(Some(workspace));
    }

    /// Fetches every workspace and commits the list.
    pub async fn get_workspaces(&self) -> FetchReport {
        let kind = CollectionKind::Workspaces;
        let run_id = generate_run_id();
        async {
            let Some(api_key) = self.store.api_key() else {
                return self.reject(kind, run_id, FailureCause::MissingCredential);
            };
            self.store.set_load_state(kind, LoadState::loading(run_id));

            let outcome = self
                .read::<Workspace>(&ApiEndpoint::Workspaces, &api_key)
                .await;
            self.settle(kind, run_id, outcome, |store, items| {
                store.set_workspaces(items);
            })
        }
        .instrument(info_span!("get_workspaces", %run_id))
        .await
    }

    /// Fetches the environments of the selected workspace and commits them.
    pub async fn get_environments(&self) -> FetchReport {
        let kind = CollectionKind::Environments;
        let run_id = generate_run_id();
        async {
            let (api_key, workspace) = match self.scoped_preconditions() {
                Ok(found) => found,
                Err(cause) => return self.reject(kind, run_id, cause),
            };
            self.store.set_load_state(kind, LoadState::loading(run_id));

            let endpoint = ApiEndpoint::Environments(workspace.clone());
            let outcome = self.read::<Environment>(&endpoint, &api_key).await;
            self.settle(kind, run_id, outcome, move |store, items| {
                store.set_environments(workspace, items);
            })
        }
        .instrument(info_span!("get_environments", %run_id))
        .await
    }

    /// Fetches every split of the selected workspace and commits the list.
    pub async fn get_splits(&self) -> FetchReport {
        let kind = CollectionKind::Splits;
        let run_id = generate_run_id();
        async {
            let (api_key, workspace) = match self.scoped_preconditions() {
                Ok(found) => found,
                Err(cause) => return self.reject(kind, run_id, cause),
            };
            self.store.set_load_state(kind, LoadState::loading(run_id));

            let endpoint = ApiEndpoint::Splits(workspace.clone());
            let outcome = self.read::<Split>(&endpoint, &api_key).await;
            self.settle(kind, run_id, outcome, move |store, items| {
                store.set_splits(workspace, items);
            })
        }
        .instrument(info_span!("get_splits", %run_id))
        .await
    }

    /// Reads an endpoint with the routine matching its shape.
    async fn read<T: DeserializeOwned>(
        &self,
        endpoint: &ApiEndpoint,
        api_key: &ApiKey,
    ) -> FetchOutcome<T> {
        debug!(
            collection = %endpoint.collection(),
            paginated = endpoint.is_paginated(),
            "fetch started"
        );
        if endpoint.is_paginated() {
            self.pages.execute(endpoint, api_key).await
        } else {
            self.resource.execute(endpoint, api_key).await
        }
    }

    /// Credential and workspace captured at the start of a scoped fetch.
    fn scoped_preconditions(&self) -> Result<(ApiKey, WorkspaceId), FailureCause> {
        let api_key = self.store.api_key().ok_or(FailureCause::MissingCredential)?;
        let workspace = self
            .store
            .current_workspace()
            .ok_or(FailureCause::NoWorkspaceSelected)?;
        Ok((api_key, workspace))
    }

    /// Reports an action that could not start.
    fn reject(&self, kind: CollectionKind, run_id: Uuid, cause: FailureCause) -> FetchReport {
        let failure = FetchFailure::new(cause);
        warn!(collection = %kind, reason = %failure, "fetch not started");
        self.store
            .set_load_state(kind, LoadState::failed(&failure, self.clock.now()));
        self.notifier.notify(Notification::error(format!(
            "Could not load {kind}: {failure}"
        )));
        FetchReport {
            collection: kind,
            run_id,
            outcome: OutcomeKind::Failed,
            items: 0,
            committed: false,
            failure: Some(failure),
        }
    }

    /// Applies the commit policy to a finished fetch.
    fn settle<T>(
        &self,
        kind: CollectionKind,
        run_id: Uuid,
        outcome: FetchOutcome<T>,
        commit: impl FnOnce(&AdminStore, Vec<T>),
    ) -> FetchReport {
        let outcome_kind = outcome.kind();
        let (items, failure) = outcome.into_parts();
        let count = items.len();
        let now = self.clock.now();

        let committed = match (outcome_kind, self.policy, &failure) {
            (OutcomeKind::Complete, _, _) => {
                commit(&self.store, items);
                self.store
                    .set_load_state(kind, LoadState::loaded(count, true, now));
                info!(collection = %kind, items = count, "collection committed");
                self.notifier
                    .notify(Notification::success(kind.success_message()));
                true
            }
            (OutcomeKind::Partial, CommitPolicy::KeepPartial, Some(failure)) => {
                commit(&self.store, items);
                self.store
                    .set_load_state(kind, LoadState::loaded(count, false, now));
                warn!(
                    collection = %kind,
                    items = count,
                    reason = %failure,
                    "incomplete collection committed"
                );
                self.notifier.notify(Notification::warning(format!(
                    "Loaded {count} {kind} before an error: {failure}"
                )));
                true
            }
            (_, _, Some(failure)) => {
                self.store
                    .set_load_state(kind, LoadState::failed(failure, now));
                error!(
                    collection = %kind,
                    outcome = ?outcome_kind,
                    items_discarded = count,
                    reason = %failure,
                    "collection not committed"
                );
                self.notifier.notify(Notification::error(format!(
                    "Could not load {kind}: {failure}"
                )));
                false
            }
            // Partial and Failed outcomes always carry a failure.
            (_, _, None) => false,
        };

        FetchReport {
            collection: kind,
            run_id,
            outcome: outcome_kind,
            items: count,
            committed,
            failure,
        }
    }
}
