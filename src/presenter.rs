use std::io::{self, Write};

use console::Style;
use reqwest::{header::HeaderMap, StatusCode, Version};

/// Styles for everything the program prints besides the body itself.
///
/// Built once per run. With color disabled every style is forced plain,
/// otherwise `console` decides per stream whether the terminal wants escapes.
#[derive(Clone, Debug)]
pub struct Presenter {
    heading: Style,
    report: Style,
    alarm: Style,
}

impl Presenter {
    pub fn new(color: bool) -> Self {
        let mut heading = Style::new().cyan();
        let mut report = Style::new().red().for_stderr();
        let mut alarm = Style::new().white().bright().on_red().for_stderr();

        if !color {
            heading = heading.force_styling(false);
            report = report.force_styling(false);
            alarm = alarm.force_styling(false);
        }

        Self {
            heading,
            report,
            alarm,
        }
    }

    /// Writes the status line, one line per header value and the blank
    /// separator line.
    ///
    /// Header names come out lower-cased, as `http` stores them.
    pub fn write_head<W: Write>(
        &self,
        out: &mut W,
        version: Version,
        status: StatusCode,
        headers: &HeaderMap,
    ) -> io::Result<()> {
        let line = format!(
            "{:?} {} {}",
            version,
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        writeln!(out, "{}", self.heading.apply_to(line))?;

        for key in headers.keys() {
            for value in headers.get_all(key) {
                let value = String::from_utf8_lossy(value.as_bytes());
                writeln!(out, "{}: {}", self.heading.apply_to(key.as_str()), value)?;
            }
        }

        writeln!(out)
    }

    pub(crate) fn report_text(&self, text: &str) -> String {
        self.report.apply_to(text).to_string()
    }

    pub(crate) fn alarm_text(&self, text: &str) -> String {
        self.alarm.apply_to(text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};

    use super::*;

    #[test]
    fn renders_head_like_raw_http() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let mut out = Vec::new();
        Presenter::new(false)
            .write_head(&mut out, Version::HTTP_11, StatusCode::OK, &headers)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HTTP/1.1 200 OK\n\
             content-type: text/plain\n\
             set-cookie: a=1\n\
             set-cookie: b=2\n\
             \n"
        );
    }

    #[test]
    fn unknown_status_has_empty_reason() {
        let mut out = Vec::new();
        let status = StatusCode::from_u16(599).unwrap();
        Presenter::new(false)
            .write_head(&mut out, Version::HTTP_2, status, &HeaderMap::new())
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "HTTP/2.0 599 \n\n");
    }

    #[test]
    fn plain_presenter_adds_no_escapes() {
        let presenter = Presenter::new(false);
        assert_eq!(presenter.report_text("END"), "END");
        assert_eq!(presenter.alarm_text("(LONG)"), "(LONG)");
    }
}
