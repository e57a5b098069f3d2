use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use log::{debug, warn};

use crate::config::BackendConfig;
use crate::dicom::{load_dicom, DecodedDicom};
use crate::error::LoadError;
use crate::generation::Ticket;
use crate::worklist::{build_http_client, fetch_worklist, WorklistEntry};

/// Completions delivered from background threads to the UI thread.
#[derive(Debug)]
pub enum JobResult {
    Decoded {
        ticket: Ticket,
        path: PathBuf,
        result: Result<DecodedDicom, LoadError>,
    },
    Worklist {
        ticket: Ticket,
        result: Result<Vec<WorklistEntry>, String>,
    },
}

pub struct Worker {
    sender: Sender<JobResult>,
    receiver: Receiver<JobResult>,
    /// Newest decode generation handed out; older decodes are abandoned.
    latest_decode: Arc<AtomicU64>,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            latest_decode: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn spawn_decode(&self, ticket: Ticket, path: PathBuf) {
        self.latest_decode
            .fetch_max(ticket.generation(), Ordering::SeqCst);
        let latest = Arc::clone(&self.latest_decode);
        let sender = self.sender.clone();
        thread::spawn(move || {
            if is_superseded(&latest, ticket) {
                debug!("Skipping superseded decode of {}", path.display());
                return;
            }
            debug!("Decoding {} (generation {})", path.display(), ticket.generation());
            let result = load_dicom(&path).map_err(|err| LoadError::decode(&path, &err));
            if is_superseded(&latest, ticket) {
                debug!("Dropping superseded decode of {}", path.display());
                return;
            }
            if let Err(err) = &result {
                warn!("{err}");
            }
            let _ = sender.send(JobResult::Decoded {
                ticket,
                path,
                result,
            });
        });
    }

    pub fn spawn_worklist_fetch(&self, ticket: Ticket, backend: BackendConfig) {
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = build_http_client()
                .and_then(|client| fetch_worklist(&client, &backend))
                .map_err(|err| {
                    warn!("Worklist fetch failed: {err:#}");
                    format!("{err:#}")
                });
            let _ = sender.send(JobResult::Worklist { ticket, result });
        });
    }

    /// Next finished job, if any. Never blocks.
    pub fn try_next(&self) -> Option<JobResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            // The worker keeps its own sender, so the channel cannot disconnect.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

fn is_superseded(latest: &AtomicU64, ticket: Ticket) -> bool {
    latest.load(Ordering::SeqCst) > ticket.generation()
}
