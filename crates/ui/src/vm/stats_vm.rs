use services::PracticeStats;

#[derive(Clone, Debug, PartialEq)]
pub struct StatsVm {
    pub practice_count: u32,
    pub coverage_str: String,
    /// Progress bar fill in `[0, 1]`.
    pub progress: f64,
    pub caption: String,
}

impl From<&PracticeStats> for StatsVm {
    fn from(stats: &PracticeStats) -> Self {
        Self {
            practice_count: stats.practice_count,
            coverage_str: format!("{:.1}%", stats.coverage_percent()),
            progress: stats.coverage.clamp(0.0, 1.0),
            caption: format!(
                "You've practiced {} out of {} unique sentences",
                stats.seen, stats.total
            ),
        }
    }
}

impl StatsVm {
    /// Width for the progress bar fill, e.g. `"40.0%"`.
    #[must_use]
    pub fn progress_width(&self) -> String {
        format!("{:.1}%", self.progress * 100.0)
    }
}
