//! Scan progress reporting.

/// Progress through one of the NFO scanning phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    pub processed: usize,
    pub total: usize,
    pub message: String,
}

/// Receives the scan's log lines and progress updates.
///
/// Both methods default to no-ops. Nothing an observer does affects the
/// scan's result.
pub trait ScanObserver {
    /// A human-readable line describing a scan stage.
    fn log(&mut self, _line: &str) {}

    /// Progress within a long-running phase.
    fn progress(&mut self, _progress: ScanProgress) {}
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ScanObserver for NullObserver {}

/// Observer that keeps everything it is sent.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub lines: Vec<String>,
    pub progress: Vec<ScanProgress>,
}

impl ScanObserver for RecordingObserver {
    fn log(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn progress(&mut self, progress: ScanProgress) {
        self.progress.push(progress);
    }
}

/// Report every `stride`th item and the last one.
pub(crate) fn report_progress(
    observer: &mut dyn ScanObserver,
    index: usize,
    total: usize,
    stride: usize,
    label: &str,
) {
    let processed = index + 1;
    if processed % stride == 0 || processed == total {
        observer.progress(ScanProgress {
            processed,
            total,
            message: format!("{}... ({}/{})", label, processed, total),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_progress_stride_and_last() {
        let mut observer = RecordingObserver::default();
        for i in 0..250 {
            report_progress(&mut observer, i, 250, 100, "Scanning movies for NFOs");
        }

        let processed: Vec<usize> = observer.progress.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![100, 200, 250]);
        assert_eq!(
            observer.progress[2].message,
            "Scanning movies for NFOs... (250/250)"
        );
    }

    #[test]
    fn test_report_progress_exact_multiple_reports_once() {
        let mut observer = RecordingObserver::default();
        for i in 0..100 {
            report_progress(&mut observer, i, 100, 50, "x");
        }
        assert_eq!(observer.progress.len(), 2);
    }
}
