//! ui::progress
//!
//! Text progress indicator advanced once per processed file.
//!
//! Rendered as ` 2/4 [==============>-------------]  50%`.

const BAR_WIDTH: usize = 28;

/// Progress over a fixed number of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    current: usize,
    total: usize,
}

impl Progress {
    /// Start at zero of `total` steps.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Advance by one step, saturating at `total`.
    pub fn advance(&mut self) {
        if self.current < self.total {
            self.current += 1;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Render the indicator as a single line.
    pub fn render(&self) -> String {
        let percent = if self.total == 0 {
            100
        } else {
            self.current * 100 / self.total
        };
        let filled = if self.total == 0 {
            BAR_WIDTH
        } else {
            self.current * BAR_WIDTH / self.total
        };

        let bar = if filled >= BAR_WIDTH {
            "=".repeat(BAR_WIDTH)
        } else if filled == 0 {
            "-".repeat(BAR_WIDTH)
        } else {
            format!(
                "{}>{}",
                "=".repeat(filled - 1),
                "-".repeat(BAR_WIDTH - filled)
            )
        };

        let digits = self.total.to_string().len();
        format!(
            " {:>digits$}/{} [{}] {:>3}%",
            self.current,
            self.total,
            bar,
            percent,
            digits = digits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let progress = Progress::new(4);
        assert_eq!(progress.render(), format!(" 0/4 [{}]   0%", "-".repeat(28)));
    }

    #[test]
    fn half_way() {
        let mut progress = Progress::new(4);
        progress.advance();
        progress.advance();
        assert_eq!(
            progress.render(),
            format!(" 2/4 [{}>{}]  50%", "=".repeat(13), "-".repeat(14))
        );
    }

    #[test]
    fn finished() {
        let mut progress = Progress::new(2);
        progress.advance();
        progress.advance();
        assert_eq!(progress.current(), progress.total());
        assert_eq!(progress.render(), format!(" 2/2 [{}] 100%", "=".repeat(28)));
    }

    #[test]
    fn advance_saturates() {
        let mut progress = Progress::new(1);
        progress.advance();
        progress.advance();
        assert_eq!(progress.current(), 1);
    }

    #[test]
    fn pads_current_to_total_width() {
        let mut progress = Progress::new(10);
        progress.advance();
        assert!(progress.render().starts_with("  1/10 ["));
    }
}
