mod chat_vm;
mod dashboard_vm;
mod markdown_vm;
mod profile_vm;
mod readiness_vm;
mod resume_vm;
mod time_fmt;
mod track_vm;

pub use chat_vm::{ChatLineVm, map_chat_lines};
pub use dashboard_vm::{DashboardVm, map_dashboard};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use profile_vm::{ActivityVm, LevelBarVm, ProfileVm, map_profile};
pub use readiness_vm::{BreakdownBarVm, ReadinessVm, map_readiness};
pub use resume_vm::{SavedResumeVm, TrendCardVm, TrendsVm, map_saved_resumes, map_trends};
pub use time_fmt::format_clock;
pub use track_vm::{TaskRowVm, TrackCardVm, kind_label, map_task_row, map_track_card, map_track_cards};
