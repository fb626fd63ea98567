use std::sync::mpsc::{channel, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::traverse::TraverseRecord;

use super::{Pipeline, PipelineOutput, Progress};

/// A pipeline running on its own thread.
///
/// `progress` yields milestones until the run ends; `result` then yields
/// exactly one terminal message.
pub struct Worker {
    pub progress: Receiver<String>,
    pub result: Receiver<Result<PipelineOutput>>,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Block until the terminal message arrives, discarding any unread
    /// progress.
    pub fn wait(self) -> Result<PipelineOutput> {
        let outcome = self.result.recv();
        let _ = self.handle.join();
        match outcome {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerLost),
        }
    }
}

/// Run `pipeline` over `records` on a dedicated thread.
pub fn spawn(pipeline: Pipeline, records: Vec<TraverseRecord>) -> Worker {
    let (progress_tx, progress) = channel();
    let (result_tx, result) = channel();

    let handle = thread::spawn(move || {
        let progress = Progress::new(progress_tx);
        let outcome = pipeline.run(&records, &progress);
        if let Err(e) = &outcome {
            tracing::error!("pipeline failed: {e}");
        }
        let _ = result_tx.send(outcome);
    });

    Worker { progress, result, handle }
}
