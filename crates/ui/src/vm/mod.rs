mod notice;
mod quiz_vm;
mod stats_vm;

pub use notice::{Notice, NoticeKind};
pub use quiz_vm::{OptionState, OptionVm, QuizScreen, QuizVm, VerdictVm};
pub use stats_vm::{QuestionStatVm, StatsVm, format_accuracy, map_stats};
