use chrono::prelude::*;

/// 2021-05-10 09:00 UTC, a monday morning
pub fn monday_morning() -> i64 {
    Utc.ymd(2021, 5, 10).and_hms(9, 0, 0).timestamp_millis()
}

pub fn hours(n: i64) -> i64 {
    1000 * 60 * 60 * n
}
