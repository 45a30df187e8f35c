//! iCalendar import/export for reminders
//!
//! A reminder is exchanged as a VEVENT with SUMMARY = task text and an
//! all-day DTSTART. Import is lenient: folded lines are unfolded,
//! DATE and DATE-TIME forms are both accepted and normalized to
//! `YYYY-MM-DD`, and any event missing a usable summary or date is
//! skipped rather than failing the whole document.

use chrono::NaiveDate;

/// Render (task, `YYYY-MM-DD` due date) pairs as a VCALENDAR document.
/// Pairs whose date does not parse are skipped.
pub fn write_calendar(events: &[(String, String)]) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\r\n");
    out.push_str("VERSION:2.0\r\n");
    out.push_str("PRODID:-//Flora//Reminders//EN\r\n");

    for (index, (task, date)) in events.iter().enumerate() {
        let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            tracing::warn!("Skipping reminder with unparseable date: {}", date);
            continue;
        };

        out.push_str("BEGIN:VEVENT\r\n");
        out.push_str(&format!("UID:flora-{}-{}@flora\r\n", index, parsed.format("%Y%m%d")));
        out.push_str(&format!("DTSTART;VALUE=DATE:{}\r\n", parsed.format("%Y%m%d")));
        out.push_str(&format!("SUMMARY:{}\r\n", escape_text(task)));
        out.push_str("END:VEVENT\r\n");
    }

    out.push_str("END:VCALENDAR\r\n");
    out
}

/// Parse a calendar document into (task, `YYYY-MM-DD`) pairs, skipping
/// malformed events.
pub fn parse_calendar(input: &str) -> Vec<(String, String)> {
    let mut events = Vec::new();
    let mut current: Option<(Option<String>, Option<String>)> = None;

    for line in unfold_lines(input) {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.eq_ignore_ascii_case("BEGIN:VEVENT") {
            current = Some((None, None));
            continue;
        }

        if line.eq_ignore_ascii_case("END:VEVENT") {
            if let Some((Some(task), Some(date))) = current.take() {
                events.push((task, date));
            } else {
                tracing::debug!("Skipping incomplete VEVENT");
            }
            continue;
        }

        let Some((summary, dtstart)) = current.as_mut() else {
            continue;
        };

        let Some((name, value)) = split_content_line(line) else {
            continue;
        };

        match name.to_ascii_uppercase().as_str() {
            "SUMMARY" => {
                let text = unescape_text(value);
                if !text.trim().is_empty() {
                    *summary = Some(text);
                }
            }
            "DTSTART" => {
                if let Some(date) = normalize_date(value) {
                    *dtstart = Some(date);
                } else {
                    tracing::debug!("Skipping unparseable DTSTART: {}", value);
                }
            }
            _ => {}
        }
    }

    events
}

/// Join folded continuation lines (leading space or tab) to their
/// parent line.
fn unfold_lines(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw in input.lines() {
        if let Some(rest) = raw.strip_prefix(' ').or_else(|| raw.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(raw.to_string());
    }

    lines
}

/// Split `NAME;PARAMS:VALUE` into the bare property name and value
fn split_content_line(line: &str) -> Option<(&str, &str)> {
    let (lhs, value) = line.split_once(':')?;
    let name = lhs.split(';').next().unwrap_or(lhs);
    Some((name, value))
}

/// Accept `YYYYMMDD`, `YYYYMMDDTHHMMSS`, and the trailing-Z variant;
/// normalize to `YYYY-MM-DD`.
fn normalize_date(value: &str) -> Option<String> {
    let date_part = value.split('T').next().unwrap_or(value).trim();
    NaiveDate::parse_from_str(date_part, "%Y%m%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }

    out
}
