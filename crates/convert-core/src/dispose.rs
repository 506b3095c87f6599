//! Disposal token marking the lifetime of a consuming view.
//!
//! A submission task outlives the call that started it. Before it writes its
//! outcome back, it checks the token under the state lock so that a view which has already been torn
//! down never receives a late update.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag set once the view that owns a controller is gone.
///
/// Clones observe the same flag. Disposal is one-way.
///
/// # Example
///
/// ```
/// use convert_core::dispose::DisposalToken;
///
/// let token = DisposalToken::new();
/// let task_copy = token.clone();
///
/// token.dispose();
/// assert!(task_copy.is_disposed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DisposalToken {
    disposed: Arc<AtomicBool>,
}

impl DisposalToken {
    pub fn new() -> Self {
        Self {
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the owning view as gone. All clones observe it.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
