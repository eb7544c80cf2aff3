/// Events emitted while building a force field and minimizing it.
///
/// A minimization is reported as one task whose length is the iteration cap; the task
/// usually finishes early, when the minimizer converges.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// One accepted minimizer step and the energy it reached.
    Iteration { iteration: usize, energy: f64 },

    Message(String),
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

    /// Sends a free-form message; the text is only built when a callback is installed.
    pub fn message(&self, text: impl FnOnce() -> String) {
        if self.callback.is_some() {
            self.report(Progress::Message(text()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_never_builds_messages() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "noop" });
        reporter.message(|| panic!("message text built without a callback"));
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));
        reporter.report(Progress::TaskStart { total_steps: 2 });
        reporter.report(Progress::Iteration {
            iteration: 1,
            energy: -3.5,
        });
        reporter.report(Progress::TaskFinish);
        reporter.message(|| "done".to_string());
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(matches!(seen[0], Progress::TaskStart { total_steps: 2 }));
        assert!(matches!(
            seen[1],
            Progress::Iteration { iteration: 1, energy } if energy == -3.5
        ));
        assert!(matches!(seen[2], Progress::TaskFinish));
        assert!(matches!(&seen[3], Progress::Message(text) if text == "done"));
    }
}
