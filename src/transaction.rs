use std::sync::Mutex;

/// How a transaction ended, as far as the adapter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxFinished {
    /// Committed by the orchestrator.
    Commit,
    /// The server already rolled the transaction back (deadlock victim).
    Rollback,
}

/// Handle to a transaction owned by an external orchestrator.
///
/// The adapter only ever writes `Rollback` into it; committing and rolling back
/// on the wire stays with the caller.
#[derive(Debug, Default)]
pub struct Transaction {
    id: String,
    finished: Mutex<Option<TxFinished>>,
}

impl Transaction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            finished: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn finished(&self) -> Option<TxFinished> {
        match self.finished.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_finished(&self, state: TxFinished) {
        let mut guard = match self.finished.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(state);
    }

    /// Record that the server rolled this transaction back.
    pub fn mark_rollback(&self) {
        self.set_finished(TxFinished::Rollback);
    }
}
