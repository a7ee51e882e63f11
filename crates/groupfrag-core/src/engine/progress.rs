/// Events emitted while fragmenting molecules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Pattern matching finished for one molecule.
    MatchesCollected { groups: usize, occurrences: usize },
    /// The suppression search entered the tier that suppresses `size` of `candidates`
    /// occurrences at a time.
    SearchTier { size: usize, candidates: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a `PhaseStart` and a `PhaseFinish` event.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::SearchTier {
            size: 1,
            candidates: 3,
        });
        assert_eq!(reporter.phase("noop", || 7), 7);
    }

    #[test]
    fn phase_brackets_work_with_start_and_finish_events() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(format!("{event:?}"));
        }));
        let value = reporter.phase("Collect", || {
            reporter.report(Progress::TaskIncrement);
            42
        });
        drop(reporter);
        assert_eq!(value, 42);
        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                "PhaseStart { name: \"Collect\" }".to_string(),
                "TaskIncrement".to_string(),
                "PhaseFinish".to_string(),
            ]
        );
    }
}
