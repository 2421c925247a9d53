//! Status reporting sinks: notices, warnings and the final failure report

use std::io::Write;
use std::sync::Mutex;

/// Side channel for run progress. The traversal never reads anything back.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Routes everything through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn failure(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Emits GitHub Actions workflow commands so warnings and the failure show
/// up as annotations on the run.
pub struct ActionsReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ActionsReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ActionsReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, line: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::debug!("failed to write workflow command: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Reporter for ActionsReporter<W> {
    fn info(&self, message: &str) {
        self.emit(message);
    }

    fn warning(&self, message: &str) {
        self.emit(&format!("::warning::{}", escape_data(message)));
    }

    fn failure(&self, message: &str) {
        self.emit(&format!("::error::{}", escape_data(message)));
    }
}

/// Workflow command data escaping (`%`, CR and LF).
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_reporter_commands() {
        let reporter = ActionsReporter::new(Vec::new());
        reporter.info("a.txt is successfully uploaded");
        reporter.warning("Failed to create a new node \"sub\": denied");
        reporter.failure("Failed to upload: b.png");

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "a.txt is successfully uploaded\n\
             ::warning::Failed to create a new node \"sub\": denied\n\
             ::error::Failed to upload: b.png\n"
        );
    }

    #[test]
    fn test_actions_reporter_info_is_not_escaped() {
        let reporter = ActionsReporter::new(Vec::new());
        reporter.info("dist/100%/a.txt is successfully uploaded");
        reporter.warning("dist/100%/b could not be uploaded");

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "dist/100%/a.txt is successfully uploaded\n\
             ::warning::dist/100%25/b could not be uploaded\n"
        );
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("100%\nnext\r"), "100%25%0Anext%0D");
    }
}
