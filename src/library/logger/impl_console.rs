use crate::library::logger::interface::{join_namespace, Level, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

/// Prints `[timestamp] LEVEL namespace: message` lines to stderr. Stdout is
/// reserved for the rendered report.
#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: Level, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, level, namespace, message),
            None => format!("[{}] {} {}", formatted, level, message),
        }
    }

    fn write_line<W: Write>(
        &self,
        out: &mut W,
        level: Level,
        message: &str,
    ) -> std::io::Result<()> {
        writeln!(out, "{}", self.format_line(level, message))
    }
}

impl Logger for LoggerConsole {
    fn log(&self, level: Level, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write_line(&mut std::io::stderr().lock(), level, message)?;
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            timezone: self.timezone,
        })
    }
}
