//! Command templates with wake-up placeholders
//!
//! `{timestamp}` expands to integer epoch seconds and `{iso}` to RFC 3339
//! text. A format spec after a colon (`{timestamp:.0f}`) is accepted and
//! ignored. `{{` and `}}` produce literal braces.

use chrono::{DateTime, Utc};
use drowse_util::{format_epoch, format_iso};
use std::fmt;
use thiserror::Error;

/// Template parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}' (expected timestamp or iso)")]
    UnknownPlaceholder(String),

    #[error("unclosed '{{' at offset {0}")]
    Unclosed(usize),

    #[error("unmatched '}}' at offset {0}")]
    Unmatched(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Timestamp,
    Iso,
}

/// A parsed command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl CommandTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        field.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(offset));
                    }

                    let name = field.split(':').next().unwrap_or_default().trim();
                    let segment = match name {
                        "timestamp" => Segment::Timestamp,
                        "iso" => Segment::Iso,
                        _ => return Err(TemplateError::UnknownPlaceholder(name.to_string())),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::Unmatched(offset)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Substitute the wake-up instant into the template
    pub fn render(&self, wakeup_at: &DateTime<Utc>) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Timestamp => out.push_str(&format_epoch(wakeup_at)),
                Segment::Iso => out.push_str(&format_iso(wakeup_at)),
            }
        }
        out
    }

    /// The template text as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn renders_both_placeholders() {
        let template = CommandTemplate::parse("rtcwake -m no -t {timestamp} # {iso}").unwrap();
        assert_eq!(
            template.render(&at()),
            "rtcwake -m no -t 1704110400 # 2024-01-01T12:00:00+00:00"
        );
    }

    #[test]
    fn format_spec_is_ignored() {
        let template =
            CommandTemplate::parse("echo {timestamp:.0f} > /sys/class/rtc/rtc0/wakealarm").unwrap();
        assert_eq!(
            template.render(&at()),
            "echo 1704110400 > /sys/class/rtc/rtc0/wakealarm"
        );
    }

    #[test]
    fn escaped_braces() {
        let template = CommandTemplate::parse("awk '{{print $1}}' {iso}").unwrap();
        assert_eq!(
            template.render(&at()),
            "awk '{print $1}' 2024-01-01T12:00:00+00:00"
        );
    }

    #[test]
    fn plain_text_renders_unchanged() {
        let template = CommandTemplate::parse("systemctl suspend").unwrap();
        assert_eq!(template.render(&at()), "systemctl suspend");
        assert_eq!(template.as_str(), "systemctl suspend");
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(
            CommandTemplate::parse("echo {when}"),
            Err(TemplateError::UnknownPlaceholder("when".into()))
        );
        assert_eq!(
            CommandTemplate::parse("echo {timestamp"),
            Err(TemplateError::Unclosed(5))
        );
        assert_eq!(
            CommandTemplate::parse("echo }"),
            Err(TemplateError::Unmatched(5))
        );
    }
}
