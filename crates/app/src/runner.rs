//! Command execution.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use splitdeck_application::{AdminStore, ApplicationError, FetchReport, StoreActions};
use splitdeck_domain::{
    ApiKey, ClientSettings, CollectionKind, CommitPolicy, FailureCause, WorkspaceId,
};
use splitdeck_infrastructure::{
    ConfigError, ConfigLoader, ExportError, ReqwestApiClient, SnapshotExporter, SystemClock,
    TracingNotifier,
};

use crate::cli::{Cli, Command, SearchArgs};
use crate::output;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every requested collection was read completely.
    Success,
    /// Bad arguments, bad configuration or an unmet precondition.
    Usage,
    /// A fetch failed or stopped part-way.
    Failure,
}

impl ExitStatus {
    /// Numeric exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Usage => 1,
            Self::Failure => 2,
        }
    }

    /// Folds fetch reports into one status. Unmet preconditions win over
    /// fetch failures.
    #[must_use]
    pub fn from_reports(reports: &[FetchReport]) -> Self {
        reports
            .iter()
            .filter(|report| !report.is_complete())
            .map(|report| match report.failure.as_ref().map(|f| &f.cause) {
                Some(FailureCause::MissingCredential | FailureCause::NoWorkspaceSelected) => {
                    Self::Usage
                }
                _ => Self::Failure,
            })
            .min_by_key(|status| match status {
                Self::Usage => 0,
                Self::Failure => 1,
                Self::Success => 2,
            })
            .unwrap_or(Self::Success)
    }

    /// Status for an error that stopped [`run`]. Configuration problems
    /// are usage errors; failing to write an export or the results is a
    /// failure.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<ConfigError>()) {
            return Self::Usage;
        }
        if err
            .chain()
            .any(|cause| cause.is::<ExportError>() || cause.is::<std::io::Error>())
        {
            Self::Failure
        } else {
            Self::Usage
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

/// Applies command-line overrides on top of loaded settings.
#[must_use]
pub fn apply_cli(cli: &Cli, mut settings: ClientSettings) -> ClientSettings {
    if let Some(base_url) = &cli.base_url {
        settings.base_url.clone_from(base_url);
    }
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size;
    }
    if cli.keep_partial {
        settings.commit_policy = CommitPolicy::KeepPartial;
    }
    settings
}

/// Runs one command, writing results to `out`.
///
/// Fetch problems are reported through the returned [`ExitStatus`].
///
/// # Errors
///
/// Returns an error for invalid configuration or arguments, or if the
/// results cannot be written.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<ExitStatus> {
    let loaded = ConfigLoader::new(cli.config.clone())
        .load()
        .await
        .context("failed to load configuration")?;
    let settings = apply_cli(&cli, loaded);
    tracing::debug!(
        base_url = %settings.base_url,
        page_size = settings.page_size,
        commit_policy = %settings.commit_policy,
        "settings resolved"
    );

    let client = ReqwestApiClient::new(&settings.base_url).map_err(ApplicationError::from)?;
    let actions = StoreActions::new(
        AdminStore::new(),
        Arc::new(client),
        Arc::new(TracingNotifier::new()),
        Arc::new(SystemClock::new()),
        &settings,
    )?;

    if let Some(key) = cli.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
        actions.login(ApiKey::new(key)?);
    }

    match &cli.command {
        Command::Workspaces => {
            let report = actions.get_workspaces().await;
            output::write_listing(out, cli.json, &report, &actions.store().workspaces())?;
            Ok(ExitStatus::from_reports(&[report]))
        }
        Command::Environments(args) => {
            actions.select_workspace(parse_workspace(&args.workspace)?);
            let report = actions.get_environments().await;
            output::write_listing(out, cli.json, &report, &actions.store().environments())?;
            Ok(ExitStatus::from_reports(&[report]))
        }
        Command::Splits(args) => {
            actions.select_workspace(parse_workspace(&args.workspace)?);
            let report = actions.get_splits().await;
            output::write_listing(out, cli.json, &report, &actions.store().splits())?;
            Ok(ExitStatus::from_reports(&[report]))
        }
        Command::Search(args) => search(&actions, cli.json, args, out).await,
        Command::Export(args) => {
            let workspace = parse_workspace(&args.workspace)?;
            let mut reports = vec![actions.get_workspaces().await];
            actions.select_workspace(workspace);
            reports.push(actions.get_environments().await);
            reports.push(actions.get_splits().await);

            let files = if reports.iter().all(|report| report.committed) {
                SnapshotExporter::new(&args.out)
                    .with_format(args.format.into())
                    .export(&actions.store().snapshot())
                    .await?
            } else {
                tracing::warn!("nothing exported: not every collection could be loaded");
                Vec::new()
            };

            output::write_export(out, cli.json, &reports, &files)?;
            Ok(ExitStatus::from_reports(&reports))
        }
    }
}

async fn search<W: Write>(
    actions: &StoreActions<ReqwestApiClient>,
    json: bool,
    args: &SearchArgs,
    out: &mut W,
) -> anyhow::Result<ExitStatus> {
    let kind = args.kind.collection();
    match (&args.workspace, kind.is_workspace_scoped()) {
        (Some(raw), true) => actions.select_workspace(parse_workspace(raw)?),
        (Some(_), false) => tracing::warn!("--workspace is ignored when searching {kind}"),
        (None, _) => {}
    }

    let store = actions.store();
    let report = match kind {
        CollectionKind::Workspaces => {
            let report = actions.get_workspaces().await;
            let matches: Vec<_> = store.find_workspace(&args.name).into_iter().collect();
            output::write_search(out, json, &report, &args.name, &matches)?;
            report
        }
        CollectionKind::Environments => {
            let report = actions.get_environments().await;
            let matches = store.find_environments(&args.name);
            output::write_search(out, json, &report, &args.name, &matches)?;
            report
        }
        CollectionKind::Splits => {
            let report = actions.get_splits().await;
            let matches = store.find_splits(&args.name);
            output::write_search(out, json, &report, &args.name, &matches)?;
            report
        }
    };
    Ok(ExitStatus::from_reports(&[report]))
}

fn parse_workspace(raw: &str) -> anyhow::Result<WorkspaceId> {
    WorkspaceId::new(raw).with_context(|| format!("invalid workspace id '{raw}'"))
}
