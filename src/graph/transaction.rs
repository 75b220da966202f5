//! In-memory transactions
//!
//! `begin` saves a copy of the graph's store and reifier; `abort` puts the
//! copy back and `commit` drops it. Transactions do not nest.

use super::{GraphError, GraphResult};
use crate::reifier::Reifier;
use crate::store::TripleStore;
use tracing::debug;

/// Saved graph state
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) store: TripleStore,
    pub(crate) reifier: Reifier,
}

/// Transaction state of one graph
#[derive(Debug, Clone)]
pub struct TransactionHandler {
    supported: bool,
    snapshot: Option<Snapshot>,
}

impl TransactionHandler {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            snapshot: None,
        }
    }

    pub fn transactions_supported(&self) -> bool {
        self.supported
    }

    /// Whether a transaction is open
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    fn ensure_supported(&self, operation: &'static str) -> GraphResult<()> {
        if self.supported {
            Ok(())
        } else {
            Err(GraphError::Unsupported(operation))
        }
    }

    pub(crate) fn begin(&mut self, save: impl FnOnce() -> Snapshot) -> GraphResult<()> {
        self.ensure_supported("begin")?;
        if self.is_active() {
            return Err(GraphError::TransactionActive);
        }
        debug!("transaction begin");
        self.snapshot = Some(save());
        Ok(())
    }

    pub(crate) fn commit(&mut self) -> GraphResult<()> {
        self.ensure_supported("commit")?;
        self.snapshot.take().ok_or(GraphError::NoTransaction)?;
        debug!("transaction commit");
        Ok(())
    }

    pub(crate) fn abort(&mut self) -> GraphResult<Snapshot> {
        self.ensure_supported("abort")?;
        let snapshot = self.snapshot.take().ok_or(GraphError::NoTransaction)?;
        debug!("transaction abort");
        Ok(snapshot)
    }

    /// Forget any open transaction
    pub(crate) fn reset(&mut self) {
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reifier::ReificationStyle;

    fn empty() -> Snapshot {
        Snapshot {
            store: TripleStore::new(),
            reifier: Reifier::new(ReificationStyle::Minimal),
        }
    }

    #[test]
    fn test_unsupported() {
        let mut handler = TransactionHandler::new(false);
        assert!(!handler.transactions_supported());
        assert_eq!(handler.begin(empty), Err(GraphError::Unsupported("begin")));
        assert_eq!(handler.commit(), Err(GraphError::Unsupported("commit")));
        assert!(matches!(handler.abort(), Err(GraphError::Unsupported("abort"))));
    }

    #[test]
    fn test_lifecycle() {
        let mut handler = TransactionHandler::new(true);
        assert_eq!(handler.commit(), Err(GraphError::NoTransaction));
        handler.begin(empty).unwrap();
        assert!(handler.is_active());
        assert_eq!(handler.begin(empty), Err(GraphError::TransactionActive));
        handler.commit().unwrap();
        assert!(!handler.is_active());
        handler.begin(empty).unwrap();
        assert!(handler.abort().is_ok());
        assert!(matches!(handler.abort(), Err(GraphError::NoTransaction)));
    }
}
