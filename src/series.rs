use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const DICOM_EXTENSIONS: &[&str] = &["dcm", "dicom"];

/// One openable row in the series/worklist list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesEntry {
    pub label: String,
    pub path: PathBuf,
}

pub fn scan_series_folder(dir: &Path) -> Result<Vec<SeriesEntry>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Could not read folder {}", dir.display()))?;

    let mut series = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Could not list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !has_dicom_extension(&path) {
            continue;
        }

        let label = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("DICOM")
            .to_string();
        series.push(SeriesEntry { label, path });
    }

    series.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(series)
}

fn has_dicom_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            DICOM_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
