use std::any::Any;

use super::{Layout, LINE_SEP};
use crate::LoggingEvent;

/// `LEVEL - message`.
#[derive(Clone, Debug, Default)]
pub struct SimpleLayout;

impl Layout for SimpleLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        format!("{} - {}{}", event.level, event.message, LINE_SEP)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn level_dash_message() {
        let event = LoggingEvent::new("a.b", Level::Warn, "careful");
        assert_eq!(SimpleLayout.format(&event), "WARN - careful\n");
    }
}
