//! Derived records and operation results.

mod alert;
mod current_score;
mod history_window;
mod mode_change;
mod score_cache;
mod sweep_report;

pub use alert::WarmthAlert;
pub use current_score::CurrentScore;
pub use history_window::HistoryWindow;
pub use mode_change::ModeChange;
pub use score_cache::ScoreCache;
pub use sweep_report::SweepReport;
