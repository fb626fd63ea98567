use std::sync::mpsc::Sender;

/// Best-effort sink for human-readable milestones.
///
/// Sending never fails the run: a dropped receiver just stops delivery.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    tx: Option<Sender<String>>,
}

impl Progress {
    pub fn new(tx: Sender<String>) -> Self { Self { tx: Some(tx) } }

    /// Milestones go to the log only.
    pub fn silent() -> Self { Self::default() }

    pub fn emit(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "openparcel::progress", "{message}");
        if let Some(tx) = &self.tx {
            let _ = tx.send(message);
        }
    }
}
