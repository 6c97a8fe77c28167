use indicatif::ProgressBar;
use std::time::Duration;

/// Progress bar over the script URLs of one page. Hidden when stdout is not
/// a terminal so piped output stays clean.
pub fn script_bar(total: usize) -> ProgressBar {
    if console::Term::stdout().is_term() {
        ProgressBar::new(total as u64).with_message("Fetching scripts")
    } else {
        ProgressBar::hidden()
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        Self { pb }
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}
