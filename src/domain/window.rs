use serde::{Deserialize, Serialize};
use std::fmt;

/// A daily `HH:MM`-`HH:MM` window (price time slot, service hours).
///
/// Overnight windows (end before start) are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    /// Parses `"06:00-22:30"`.
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.split_once('-')?;
        let (start, end) = (start.trim(), end.trim());
        if !is_clock(start) || !is_clock(end) {
            return None;
        }
        Some(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

fn is_clock(value: &str) -> bool {
    let Some((h, m)) = value.split_once(':') else {
        return false;
    };
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return false;
    }
    matches!((h.parse::<u8>(), m.parse::<u8>()), (Ok(h), Ok(m)) if h < 24 && m < 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_window() {
        let w = TimeWindow::parse("06:00 - 22:30").unwrap();
        assert_eq!(w.start, "06:00");
        assert_eq!(w.end, "22:30");
        assert_eq!(w.to_string(), "06:00-22:30");
    }

    #[test]
    fn accepts_overnight_window() {
        assert!(TimeWindow::parse("22:00-05:00").is_some());
    }

    #[test]
    fn rejects_malformed_clock() {
        assert!(TimeWindow::parse("6:00-22:00").is_none());
        assert!(TimeWindow::parse("24:00-01:00").is_none());
        assert!(TimeWindow::parse("10:60-11:00").is_none());
        assert!(TimeWindow::parse("10:00").is_none());
    }

    #[test]
    fn rejects_signed_components() {
        assert!(TimeWindow::parse("+9:00-10:00").is_none());
        assert!(TimeWindow::parse("09:+5-10:00").is_none());
        assert!(TimeWindow::parse("09:00-1 :00").is_none());
    }
}
