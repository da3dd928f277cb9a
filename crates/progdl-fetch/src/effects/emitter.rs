use std::sync::Arc;

use crate::data::ProgressData;
use crate::error::Error;

pub type ProgressListener = Arc<dyn Fn(&ProgressData) + Send + Sync>;
pub type ErrorListener = Arc<dyn Fn(&Error) + Send + Sync>;

/// Ordered listeners for the two event kinds a session emits.
///
/// Listeners are invoked synchronously, in registration order.
#[derive(Clone, Default)]
pub struct Listeners {
    progress: Vec<ProgressListener>,
    error:    Vec<ErrorListener>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("progress", &self.progress.len())
            .field("error", &self.error.len())
            .finish()
    }
}

impl Listeners {
    pub fn add_progress(&mut self, listener: ProgressListener) { self.progress.push(listener); }

    pub fn add_error(&mut self, listener: ErrorListener) { self.error.push(listener); }

    pub fn clear(&mut self) {
        self.progress.clear();
        self.error.clear();
    }

    pub fn emit_progress(&self, data: &ProgressData) {
        for listener in &self.progress {
            listener(data);
        }
    }

    pub fn emit_error(&self, error: &Error) {
        for listener in &self.error {
            listener(error);
        }
    }
}
