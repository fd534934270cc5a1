/// "{n}s" countdown label
pub fn time_left_label(secs: u32) -> String {
    format!("Time Left: {secs}s")
}

/// Elapsed time with one decimal, as shown in the results row
pub fn elapsed_label(secs: f64) -> String {
    format!("{secs:.1}s")
}

pub fn wpm_label(wpm: Option<u32>) -> String {
    match wpm {
        Some(wpm) => format!("{wpm} WPM"),
        None => "- WPM".to_string(),
    }
}

pub fn percent_label(val: f64) -> String {
    format!("{}%", val.round() as u32)
}

/// Human phrasing of a test duration, e.g. "60 seconds" or "1 second"
pub fn duration_phrase(secs: u32) -> String {
    match secs {
        1 => "1 second".to_string(),
        n => format!("{n} seconds"),
    }
}
