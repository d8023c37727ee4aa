use regex::Regex;
use std::sync::LazyLock;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^P
        (?:(?P<days>\d+(?:\.\d+)?)D)?
        (?:T
            (?:(?P<hours>\d+(?:\.\d+)?)H)?
            (?:(?:\d+(?:\.\d+)?-)?(?P<minutes>\d+(?:\.\d+)?)M)?
            (?:(?P<seconds>\d+(?:\.\d+)?)S)?
        )?$",
    )
    .unwrap()
});

/// Convert an ISO 8601 duration to whole minutes
///
/// e.g. PT30M -> 30, PT1H30M -> 90, PT5400.0S -> 90. A minute range such as
/// PT15-20M counts as its upper bound. Bare numbers are taken as minutes.
pub fn duration_minutes(duration: &str) -> Option<u32> {
    let duration = duration.trim();
    if duration.is_empty() {
        return None;
    }
    if let Ok(minutes) = duration.parse::<f64>() {
        return Some(minutes.max(0.0).round() as u32);
    }

    let caps = ISO_DURATION.captures(duration)?;
    let part = |name: &str| {
        caps.name(name)
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };

    let (days, hours, minutes, seconds) =
        (part("days"), part("hours"), part("minutes"), part("seconds"));
    if days.is_none() && hours.is_none() && minutes.is_none() && seconds.is_none() {
        return None;
    }

    let total = days.unwrap_or(0.0) * 1440.0
        + hours.unwrap_or(0.0) * 60.0
        + minutes.unwrap_or(0.0)
        + seconds.unwrap_or(0.0) / 60.0;
    Some(total.round() as u32)
}
