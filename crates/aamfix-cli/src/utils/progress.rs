use aamfix::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const BAR_TEMPLATE: &str = "{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})";

/// Draws batch extraction progress on stderr.
///
/// The bar stays hidden until a batch starts, so commands that never report
/// progress print nothing.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
    remapped_total: Arc<AtomicUsize>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(Self::bar_style());
        pb.finish_and_clear();
        Self {
            pb,
            remapped_total: Default::default(),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        let remapped_total = self.remapped_total.clone();

        Box::new(move |progress: Progress| match progress {
            Progress::BatchStart { total } => {
                pb.reset();
                pb.set_length(total as u64);
                pb.set_message("Extracting rules");
                remapped_total.store(0, Ordering::Relaxed);
            }
            Progress::PairDone { remapped, .. } => {
                remapped_total.fetch_add(remapped, Ordering::Relaxed);
                pb.inc(1);
            }
            Progress::BatchFinish => {
                let remapped = remapped_total.load(Ordering::Relaxed);
                pb.finish_with_message(format!("Done, {remapped} atoms remapped"));
            }
            Progress::Message(msg) => pb.println(format!("  {}", msg)),
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::new();
        assert_eq!(handler.pb.length(), Some(0));
        assert!(handler.pb.is_finished());
    }

    #[test]
    fn batch_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::BatchStart { total: 3 });
        assert_eq!(handler.pb.length(), Some(3));
        assert_eq!(handler.pb.position(), 0);
        assert!(!handler.pb.is_finished());

        callback(Progress::PairDone { index: 0, remapped: 2 });
        callback(Progress::PairDone { index: 1, remapped: 0 });
        callback(Progress::PairDone { index: 2, remapped: 4 });
        assert_eq!(handler.pb.position(), 3);

        callback(Progress::BatchFinish);
        assert!(handler.pb.is_finished());
        assert_eq!(handler.pb.message(), "Done, 6 atoms remapped");
    }

    #[test]
    fn callback_is_usable_from_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::BatchStart { total: 1 });
            callback(Progress::Message("pair 0 skipped".to_string()));
            callback(Progress::PairDone { index: 0, remapped: 1 });
            callback(Progress::BatchFinish);
        })
        .join()
        .unwrap();

        assert!(handler.pb.is_finished());
        assert_eq!(handler.pb.position(), 1);
    }
}
