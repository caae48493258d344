use chrono::{DateTime, Utc};

const SECS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_MONTH: f64 = 30.4375;

/// "5 minutes ago" / "in 2 days" style description of `then` seen from `now`.
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - then).num_milliseconds();
    let phrase = describe(millis.unsigned_abs() as f64 / 1000.0);
    if millis < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn describe(secs: f64) -> String {
    let seconds = secs.round() as i64;
    let minutes = (secs / 60.0).round() as i64;
    let hours = (secs / 3600.0).round() as i64;
    let days = (secs / SECS_PER_DAY).round() as i64;
    let months_f = secs / SECS_PER_DAY / DAYS_PER_MONTH;
    let months = months_f.round() as i64;

    if seconds <= 44 {
        "a few seconds".to_string()
    } else if seconds <= 89 {
        "a minute".to_string()
    } else if minutes <= 44 {
        format!("{} minutes", minutes)
    } else if minutes <= 89 {
        "an hour".to_string()
    } else if hours <= 21 {
        format!("{} hours", hours)
    } else if hours <= 35 {
        "a day".to_string()
    } else if days <= 25 {
        format!("{} days", days)
    } else if days <= 45 {
        "a month".to_string()
    } else if months <= 10 {
        format!("{} months", months)
    } else if months <= 17 {
        "a year".to_string()
    } else {
        format!("{} years", (months_f / 12.0).round() as i64)
    }
}
