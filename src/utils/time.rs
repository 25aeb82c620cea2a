use chrono::{Datelike, Utc};

pub fn current_year() -> i32 {
    Utc::now().year()
}
