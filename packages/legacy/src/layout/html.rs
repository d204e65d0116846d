use std::any::Any;

use super::{Layout, LINE_SEP};
use crate::LoggingEvent;

pub const DEFAULT_TITLE: &str = "Log4J Log Messages";

/// Renders each event as a table row of an HTML document.
#[derive(Clone, Debug)]
pub struct HtmlLayout {
    title: String,
    location_info: bool,
}

impl HtmlLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location_info: false,
        }
    }

    pub fn with_location_info(mut self, enabled: bool) -> Self {
        self.location_info = enabled;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for HtmlLayout {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl Layout for HtmlLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut row = String::with_capacity(256 + event.message.len());
        row.push_str(LINE_SEP);
        row.push_str("<tr>");
        row.push_str(LINE_SEP);
        row.push_str(&format!("<td>{}</td>{}", event.relative_time(), LINE_SEP));
        let thread = escape(&event.thread_name);
        row.push_str(&format!(
            "<td title=\"{} thread\">{}</td>{}",
            thread, thread, LINE_SEP
        ));
        row.push_str(&format!(
            "<td title=\"Level\">{}</td>{}",
            escape(event.level.name()),
            LINE_SEP
        ));
        let logger = escape(&event.logger_name);
        row.push_str(&format!(
            "<td title=\"{} category\">{}</td>{}",
            logger, logger, LINE_SEP
        ));
        if self.location_info {
            row.push_str(&format!("<td>?</td>{}", LINE_SEP));
        }
        row.push_str(&format!(
            "<td title=\"Message\">{}</td>{}",
            escape(&event.message),
            LINE_SEP
        ));
        row.push_str("</tr>");
        row.push_str(LINE_SEP);
        if let Some(thrown) = &event.thrown {
            row.push_str(&format!(
                "<tr><td colspan=\"{}\">{}</td></tr>{}",
                if self.location_info { 6 } else { 5 },
                escape(thrown),
                LINE_SEP
            ));
        }
        row
    }

    fn content_type(&self) -> &str {
        "text/html"
    }

    fn header(&self) -> Option<String> {
        let title = escape(&self.title);
        let mut header = String::new();
        header.push_str("<!DOCTYPE html>");
        header.push_str(LINE_SEP);
        header.push_str(&format!(
            "<html><head><title>{}</title></head>{}",
            title, LINE_SEP
        ));
        header.push_str("<body>");
        header.push_str(LINE_SEP);
        header.push_str("<table cellspacing=\"0\" cellpadding=\"4\" border=\"1\" width=\"100%\">");
        header.push_str(LINE_SEP);
        header.push_str("<tr><th>Time</th><th>Thread</th><th>Level</th><th>Category</th>");
        if self.location_info {
            header.push_str("<th>File:Line</th>");
        }
        header.push_str("<th>Message</th></tr>");
        header.push_str(LINE_SEP);
        Some(header)
    }

    fn footer(&self) -> Option<String> {
        Some(format!("</table>{}</body></html>{}", LINE_SEP, LINE_SEP))
    }

    fn ignores_throwable(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
