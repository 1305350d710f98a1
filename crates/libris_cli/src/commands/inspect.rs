//! Inspect command implementation.

use super::CliResult;
use libris_core::{CatalogStats, Config, Library, Store};
use libris_storage::FileBackend;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Catalog inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Snapshot path.
    pub path: String,
    /// Whether the snapshot file exists.
    pub exists: bool,
    /// Raw record counts.
    pub stats: CatalogStats,
    /// Books not currently checked out.
    pub available: usize,
    /// Validation failure, if any record is rejected on load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the inspect command.
///
/// Reads the snapshot without taking the lock, so it can be pointed at a
/// catalog another process has open.
pub fn run(path: &Path, format: &str, out: &mut dyn Write) -> CliResult<()> {
    info!("Inspecting catalog at {:?}", path);

    let (stats, error) = match Store::open(Box::new(FileBackend::open_unlocked(path))) {
        Ok(store) => {
            // Rebuilding the managers runs every validator over the stored records
            let error = Library::with_backend(
                Box::new(FileBackend::open_unlocked(path)),
                Config::new().path(path),
            )
            .err()
            .map(|e| e.to_string());
            (store.stats(), error)
        }
        Err(e) => (CatalogStats::default(), Some(e.to_string())),
    };

    let result = InspectResult {
        path: path.display().to_string(),
        exists: path.exists(),
        stats,
        available: stats.available,
        error,
    };

    match format {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        _ => print_text_output(&result, out)?,
    }
    Ok(())
}

fn print_text_output(result: &InspectResult, out: &mut dyn Write) -> CliResult<()> {
    writeln!(out, "Catalog: {}", result.path)?;
    if !result.exists {
        writeln!(out, "  (no snapshot yet)")?;
    }
    writeln!(out, "  Books:     {}", result.stats.books)?;
    writeln!(out, "  Users:     {}", result.stats.users)?;
    writeln!(out, "  Checkouts: {}", result.stats.checkouts)?;
    writeln!(out, "  Available: {}", result.available)?;
    match &result.error {
        Some(error) => writeln!(out, "  Status:    INVALID ({error})")?,
        None => writeln!(out, "  Status:    OK")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn inspect_missing_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut out = Vec::new();

        run(&path, "text", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(no snapshot yet)"));
        assert!(text.contains("Status:    OK"));
    }

    #[test]
    fn inspect_reports_invalid_records_as_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(
            &path,
            r#"{"books": [{"title": "T", "author": "A", "isbn": "12345"}]}"#,
        )
        .unwrap();
        let mut out = Vec::new();

        run(&path, "json", &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["stats"]["books"], 1);
        assert!(value["error"].as_str().unwrap().contains("ISBN"));
    }

    #[test]
    fn inspect_reports_unreadable_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{not json").unwrap();
        let mut out = Vec::new();

        run(&path, "text", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Books:     0"));
        assert!(text.contains("Status:    INVALID (corrupt data"));
    }

    #[test]
    fn inspect_does_not_need_the_lock() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut library = Library::open(&path).unwrap();
        library.users_mut().add_user("Jane Doe", "002").unwrap();

        let mut out = Vec::new();
        run(&path, "text", &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Users:     1"));
    }
}
