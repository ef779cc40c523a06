mod practice_vm;
mod stats_vm;
mod time_fmt;

pub use practice_vm::{FieldVm, SentenceCardVm, TableInfoVm, value_class};
pub use stats_vm::StatsVm;
pub use time_fmt::format_datetime;
