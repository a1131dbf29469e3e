/// Events emitted while a batch of corrections is turned into rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    BatchStart { total: usize },
    /// The pair at `index` produced a rule remapping `remapped` atoms.
    PairDone { index: usize, remapped: usize },
    BatchFinish,

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));
        reporter.report(Progress::BatchStart { total: 2 });
        reporter.report(Progress::BatchFinish);
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![Progress::BatchStart { total: 2 }, Progress::BatchFinish]
        );
    }

    #[test]
    fn silent_reporter_ignores_events() {
        ProgressReporter::new().report(Progress::Message("ignored".into()));
    }
}
