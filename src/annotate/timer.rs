use regex::Regex;
use std::sync::LazyLock;

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+|\d+\.\d+|\d+-\d+|\d+ to \d+) (min(?:utes)?|hours?|days?)").unwrap()
});

/// Rewrite every duration such as "10-12 minutes" as a timer token `~{10-12%minutes}`
pub fn annotate_timers(text: &str) -> String {
    DURATION.replace_all(text, "~{${1}%${2}}").into_owned()
}
