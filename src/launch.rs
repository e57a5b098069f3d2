use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewerConfig;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "greyscope", version, about = "DICOM image viewer with worklist integration")]
pub struct LaunchArgs {
    /// DICOM file or series folder to open on startup
    pub path: Option<PathBuf>,

    /// DICOM file to open on startup
    #[arg(long, value_name = "FILE", conflicts_with_all = ["path", "folder"])]
    pub open: Option<PathBuf>,

    /// Folder whose DICOM files are listed as a series
    #[arg(long, value_name = "DIR", conflicts_with = "path")]
    pub folder: Option<PathBuf>,

    /// Backend base URL for this session (worklist is read from <URL>/api/worklist/)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer token for the backend for this session
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    File(PathBuf),
    Folder(PathBuf),
}

impl LaunchArgs {
    pub fn launch_request(&self) -> Option<LaunchRequest> {
        if let Some(file) = &self.open {
            return Some(LaunchRequest::File(file.clone()));
        }
        if let Some(folder) = &self.folder {
            return Some(LaunchRequest::Folder(folder.clone()));
        }
        self.path.as_ref().map(|path| {
            if path.is_dir() {
                LaunchRequest::Folder(path.clone())
            } else {
                LaunchRequest::File(path.clone())
            }
        })
    }

    /// Applies the session-only overrides; they are never written back.
    pub fn apply_overrides(&self, config: &mut ViewerConfig) {
        if let Some(base_url) = &self.base_url {
            config.backend.base_url = base_url.trim().to_string();
        }
        if let Some(token) = &self.token {
            config.backend.auth_token = Some(token.clone());
        }
    }
}
