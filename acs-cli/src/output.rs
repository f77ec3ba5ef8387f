//! Output formatting for post results

use acs_http_client::PostTarget;
use chrono::{DateTime, Local};

/// Output formatter for post results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print the success line unless in quiet mode
    pub fn print_posted(&self, target: PostTarget, posted_at: DateTime<Local>) {
        if self.quiet {
            return;
        }
        println!(
            "{} (took {:.2}s)",
            format_posted(target, posted_at),
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Format the success line
fn format_posted(target: PostTarget, posted_at: DateTime<Local>) -> String {
    format!(
        "Posted to community {} / board {} at {}",
        target.community_id,
        target.bbs_id,
        posted_at.format("%H:%M:%S")
    )
}
