//! The admin store.
//!
//! An explicit state container passed by handle to whoever needs it. All
//! mutations are synchronous whole-field replacements that publish a
//! [`StoreEvent`] naming the field; front ends re-render by subscribing.

mod snapshot;

use std::sync::Arc;

use parking_lot::RwLock;
use splitdeck_domain::{
    ApiKey, CollectionKind, Environment, LoadState, Split, Workspace, WorkspaceId,
};
use tokio::sync::broadcast;

pub use snapshot::StoreSnapshot;

/// Events buffered per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 64;

/// A field of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreField {
    /// The API credential.
    ApiKey,
    /// The workspace list.
    Workspaces,
    /// The selected workspace.
    CurrentWorkspace,
    /// The environment list.
    Environments,
    /// The split list.
    Splits,
    /// The load state of a collection.
    LoadState(CollectionKind),
}

/// Published after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    /// The field that was replaced.
    pub field: StoreField,
}

#[derive(Debug, Default)]
struct StoreState {
    api_key: Option<ApiKey>,
    workspaces: Vec<Workspace>,
    current_workspace: Option<WorkspaceId>,
    environments: Vec<Environment>,
    environments_scope: Option<WorkspaceId>,
    splits: Vec<Split>,
    splits_scope: Option<WorkspaceId>,
    workspaces_status: LoadState,
    environments_status: LoadState,
    splits_status: LoadState,
}

impl StoreState {
    const fn status(&self, kind: CollectionKind) -> &LoadState {
        match kind {
            CollectionKind::Workspaces => &self.workspaces_status,
            CollectionKind::Environments => &self.environments_status,
            CollectionKind::Splits => &self.splits_status,
        }
    }

    const fn status_mut(&mut self, kind: CollectionKind) -> &mut LoadState {
        match kind {
            CollectionKind::Workspaces => &mut self.workspaces_status,
            CollectionKind::Environments => &mut self.environments_status,
            CollectionKind::Splits => &mut self.splits_status,
        }
    }
}

/// Shared handle to the admin state.
///
/// Cloning the handle shares the state. Locks are held only for the
/// duration of one accessor or mutation, never across an await.
#[derive(Debug, Clone)]
pub struct AdminStore {
    state: Arc<RwLock<StoreState>>,
    events: broadcast::Sender<StoreEvent>,
}

impl AdminStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            events,
        }
    }

    /// Subscribes to change events published after each mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn publish(&self, field: StoreField) {
        // No subscribers is fine.
        let _ = self.events.send(StoreEvent { field });
    }

    // --- Accessors ---

    /// The credential, if logged in.
    #[must_use]
    pub fn api_key(&self) -> Option<ApiKey> {
        self.state.read().api_key.clone()
    }

    /// Returns true if a credential is set.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().api_key.is_some()
    }

    /// The workspace list.
    #[must_use]
    pub fn workspaces(&self) -> Vec<Workspace> {
        self.state.read().workspaces.clone()
    }

    /// The selected workspace.
    #[must_use]
    pub fn current_workspace(&self) -> Option<WorkspaceId> {
        self.state.read().current_workspace.clone()
    }

    /// The environment list.
    #[must_use]
    pub fn environments(&self) -> Vec<Environment> {
        self.state.read().environments.clone()
    }

    /// The split list.
    #[must_use]
    pub fn splits(&self) -> Vec<Split> {
        self.state.read().splits.clone()
    }

    // --- Lookups ---
    //
    // Names are compared exactly, after trimming the query.

    /// The first workspace called `name`.
    #[must_use]
    pub fn find_workspace(&self, name: &str) -> Option<Workspace> {
        let name = name.trim();
        self.state
            .read()
            .workspaces
            .iter()
            .find(|workspace| workspace.name == name)
            .cloned()
    }

    /// Every environment called `name` in the environment list.
    #[must_use]
    pub fn find_environments(&self, name: &str) -> Vec<Environment> {
        let name = name.trim();
        self.state
            .read()
            .environments
            .iter()
            .filter(|environment| environment.name == name)
            .cloned()
            .collect()
    }

    /// Every split called `name` in the split list.
    #[must_use]
    pub fn find_splits(&self, name: &str) -> Vec<Split> {
        let name = name.trim();
        self.state
            .read()
            .splits
            .iter()
            .filter(|split| split.name == name)
            .cloned()
            .collect()
    }

    /// Returns true if the environment list belongs to a workspace other
    /// than the selected one.
    #[must_use]
    pub fn environments_are_stale(&self) -> bool {
        let state = self.state.read();
        state.environments_scope.is_some() && state.environments_scope != state.current_workspace
    }

    /// Returns true if the split list belongs to a workspace other than
    /// the selected one.
    #[must_use]
    pub fn splits_are_stale(&self) -> bool {
        let state = self.state.read();
        state.splits_scope.is_some() && state.splits_scope != state.current_workspace
    }

    /// Load state of a collection.
    #[must_use]
    pub fn load_state(&self, kind: CollectionKind) -> LoadState {
        self.state.read().status(kind).clone()
    }

    /// Copies the collections and selection out of the store.
    ///
    /// The credential is never part of a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            workspaces: state.workspaces.clone(),
            current_workspace: state.current_workspace.clone(),
            environments: state.environments.clone(),
            environments_workspace: state.environments_scope.clone(),
            splits: state.splits.clone(),
            splits_workspace: state.splits_scope.clone(),
        }
    }

    // --- Mutations ---

    /// Replaces the credential; `None` logs out.
    pub fn set_api_key(&self, api_key: Option<ApiKey>) {
        self.state.write().api_key = api_key;
        self.publish(StoreField::ApiKey);
    }

    /// Replaces the workspace list.
    pub fn set_workspaces(&self, workspaces: Vec<Workspace>) {
        self.state.write().workspaces = workspaces;
        self.publish(StoreField::Workspaces);
    }

    /// Replaces the selected workspace.
    ///
    /// Environment and split lists are left as they are; use
    /// [`Self::environments_are_stale`] to detect the mismatch.
    pub fn set_current_workspace(&self, workspace: Option<WorkspaceId>) {
        self.state.write().current_workspace = workspace;
        self.publish(StoreField::CurrentWorkspace);
    }

    /// Replaces the environment list fetched for `scope`.
    pub fn set_environments(&self, scope: WorkspaceId, environments: Vec<Environment>) {
        {
            let mut state = self.state.write();
            state.environments = environments;
            state.environments_scope = Some(scope);
        }
        self.publish(StoreField::Environments);
    }

    /// Replaces the split list fetched for `scope`.
    pub fn set_splits(&self, scope: WorkspaceId, splits: Vec<Split>) {
        {
            let mut state = self.state.write();
            state.splits = splits;
            state.splits_scope = Some(scope);
        }
        self.publish(StoreField::Splits);
    }

    /// Replaces the load state of a collection.
    pub fn set_load_state(&self, kind: CollectionKind, load_state: LoadState) {
        *self.state.write().status_mut(kind) = load_state;
        self.publish(StoreField::LoadState(kind));
    }
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::new()
    }
}
