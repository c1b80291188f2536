//! Diagnostic accumulator shared by the input readers, the search and the
//! exporter.

use crate::diagnostic::Diagnostic;
use std::sync::{Mutex, MutexGuard};

/// Collects diagnostics until the CLI drains and renders them.
///
/// Emitting only needs `&self`, so one sink can be lent to every stage of a
/// run at once.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `diag`.
    pub fn emit(&self, diag: Diagnostic) {
        self.lock().push(diag);
    }

    /// `true` if an undrained error is waiting in the sink.
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|d| d.severity.is_error())
    }

    /// Drains every recorded diagnostic in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_and_notes_are_not_errors() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(201, "port skipped"));
        sink.emit(Diagnostic::note(302, "depth bound reached"));
        assert!(!sink.has_errors());
        assert_eq!(sink.take_all().len(), 2);
    }

    #[test]
    fn take_all_drains_in_order() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error(105, "unknown block"));
        sink.emit(Diagnostic::note(301, "no ports"));
        assert!(sink.has_errors());
        let codes: Vec<String> = sink.take_all().iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, vec!["E105", "N301"]);
        assert!(sink.take_all().is_empty());
        assert!(!sink.has_errors());
    }

    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for _ in 0..25 {
                        sink.emit(Diagnostic::warning(202, "line ignored"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.take_all().len(), 100);
    }
}
