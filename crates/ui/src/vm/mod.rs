mod result_vm;
mod time_fmt;

pub use result_vm::{DoshaBarVm, map_result_bars};
pub use time_fmt::format_datetime;
