//! Human and JSON rendering of fetch results.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use splitdeck_application::FetchReport;
use splitdeck_domain::{Environment, Split, Workspace};

/// One line of human output per entity.
pub trait Row {
    /// Renders the entity as a tab-separated line.
    fn row(&self) -> String;
}

impl Row for Workspace {
    fn row(&self) -> String {
        format!("{}\t{}", self.id, self.name)
    }
}

impl Row for Environment {
    fn row(&self) -> String {
        let kind = match self.production {
            Some(true) => "production",
            Some(false) => "non-production",
            None => "-",
        };
        format!("{}\t{}\t{kind}", self.id, self.name)
    }
}

impl Row for Split {
    fn row(&self) -> String {
        let traffic_type = self.traffic_type.as_ref().map_or("-", |t| t.name.as_str());
        let status = self
            .rollout_status
            .as_ref()
            .map_or("-", |s| s.name.as_str());
        format!("{}\t{traffic_type}\t{status}", self.name)
    }
}

/// Writes a listing, or a `{report, items}` document in JSON mode.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_listing<W, T>(
    out: &mut W,
    json: bool,
    report: &FetchReport,
    items: &[T],
) -> anyhow::Result<()>
where
    W: Write,
    T: Row + Serialize,
{
    if json {
        let document = json!({ "report": report, "items": items });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    for item in items {
        writeln!(out, "{}", item.row())?;
    }
    if !report.is_complete() && report.committed {
        writeln!(out, "(incomplete: {} {} read)", report.items, report.collection)?;
    }
    Ok(())
}

/// Writes the matches of a search, or a `{report, name, matches}`
/// document in JSON mode.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_search<W, T>(
    out: &mut W,
    json: bool,
    report: &FetchReport,
    name: &str,
    matches: &[T],
) -> anyhow::Result<()>
where
    W: Write,
    T: Row + Serialize,
{
    if json {
        let document = json!({ "report": report, "name": name, "matches": matches });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    for item in matches {
        writeln!(out, "{}", item.row())?;
    }
    if matches.is_empty() && report.committed {
        writeln!(out, "no match for '{}' in {}", name.trim(), report.collection)?;
    }
    Ok(())
}

/// Writes the result of an export.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_export<W: Write>(
    out: &mut W,
    json: bool,
    reports: &[FetchReport],
    files: &[PathBuf],
) -> anyhow::Result<()> {
    if json {
        let document = json!({ "reports": reports, "files": files });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    for report in reports {
        writeln!(
            out,
            "{}\t{} items\t{}",
            report.collection,
            report.items,
            if report.committed { "ok" } else { "failed" }
        )?;
    }
    for file in files {
        writeln!(out, "wrote {}", file.display())?;
    }
    Ok(())
}
