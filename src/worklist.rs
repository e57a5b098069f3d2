use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::config::BackendConfig;

const WORKLIST_PATH: &str = "/api/worklist/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklistEntry {
    pub label: String,
    /// Path (or reference) handed to the decoder when the entry is opened.
    pub reference: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorklistPayload {
    Items(Vec<WorklistItem>),
    Wrapped {
        #[serde(default)]
        worklist: Vec<WorklistItem>,
    },
}

#[derive(Deserialize)]
struct WorklistItem {
    #[serde(default)]
    patient_name: Option<String>,
    #[serde(default)]
    study_description: Option<String>,
    #[serde(default)]
    dicom_path: Option<String>,
}

pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}

pub fn worklist_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), WORKLIST_PATH)
}

pub fn fetch_worklist(client: &Client, backend: &BackendConfig) -> Result<Vec<WorklistEntry>> {
    let url = worklist_url(&backend.base_url);
    let mut request = client.get(&url).header(ACCEPT, "application/json");
    if let Some(token) = backend.token() {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = request
        .send()
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned an error status"))?
        .text()
        .with_context(|| format!("Could not read response body from {url}"))?;

    parse_worklist(&body)
}

pub fn parse_worklist(json: &str) -> Result<Vec<WorklistEntry>> {
    let payload: WorklistPayload = serde_json::from_str(json).context("Invalid worklist JSON")?;
    let items = match payload {
        WorklistPayload::Items(items) => items,
        WorklistPayload::Wrapped { worklist } => worklist,
    };

    Ok(items
        .into_iter()
        .map(|item| WorklistEntry {
            label: format!(
                "{} - {}",
                item.patient_name.unwrap_or_default(),
                item.study_description.unwrap_or_default()
            ),
            reference: item.dicom_path.unwrap_or_default(),
        })
        .collect())
}
