use crate::library::logger::interface::{join_namespace, Level, Logger};
use std::sync::{Arc, Mutex};

/// Keeps log lines in memory so tests can assert on what was reported.
#[derive(Debug, Clone, Default)]
pub struct LoggerMemory {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LoggerMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, line)| line)
            .collect()
    }
}

impl Logger for LoggerMemory {
    fn log(&self, level: Level, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = match &self.namespace {
            Some(namespace) => format!("{}: {}", namespace, message),
            None => message.to_string(),
        };
        self.lines
            .lock()
            .map_err(|e| e.to_string())?
            .push((level, line));
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerMemory {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            lines: self.lines.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_loggers_share_lines() {
        let logger = LoggerMemory::new();
        let child = logger.with_namespace("app").with_namespace("content");

        logger.info("starting").unwrap();
        child.warn("no content for `x`").unwrap();

        assert_eq!(
            logger.lines(),
            vec![
                (Level::Info, "starting".to_string()),
                (Level::Warn, "app:content: no content for `x`".to_string()),
            ]
        );
        assert_eq!(logger.warnings(), vec!["app:content: no content for `x`".to_string()]);
    }
}
