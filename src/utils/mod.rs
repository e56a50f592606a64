pub mod text;
pub mod time;
pub mod url;

pub use text::normalize_text;
pub use time::{Clock, SystemClock};
