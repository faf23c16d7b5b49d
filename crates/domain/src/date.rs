use chrono::prelude::*;
use chrono_tz::Tz;

/// Last millisecond of the calendar day containing `ts` in `tz`.
///
/// This is the horizon a snooze runs to: snoozing an alert suppresses
/// reminders through 23:59:59.999 of the current day in the reference
/// time zone, and reminders resume the next day.
pub fn end_of_day_millis(ts: i64, tz: Tz) -> i64 {
    let next_day = tz.timestamp_millis(ts).date().naive_local().succ();
    first_instant_of_day(next_day, tz).timestamp_millis() - 1
}

/// Whether two timestamps fall on the same calendar day in `tz`
pub fn same_calendar_day(a: i64, b: i64, tz: Tz) -> bool {
    tz.timestamp_millis(a).date() == tz.timestamp_millis(b).date()
}

/// The instant a calendar day begins in `tz`. Normally local midnight,
/// but a DST jump can skip it (America/Santiago turns 00:00 into 01:00
/// when DST starts), so scan for the first hour the day does have. A
/// midnight repeated by a rollback resolves to its first occurrence.
fn first_instant_of_day(mut day: NaiveDate, tz: Tz) -> DateTime<Tz> {
    loop {
        let first = (0..24)
            .filter_map(|hour| tz.from_local_datetime(&day.and_hms(hour, 0, 0)).earliest())
            .next();
        match first {
            Some(instant) => return instant,
            // An offset change can skip the whole day (Pacific/Apia
            // lost 2011-12-30); it then begins when the next one does
            None => day = day.succ(),
        }
    }
}
