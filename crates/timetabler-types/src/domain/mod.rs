pub mod period;
pub mod subject;
pub mod timetable;

pub use period::*;
pub use subject::*;
pub use timetable::*;
