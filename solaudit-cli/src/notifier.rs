//! Terminal notifications
//!
//! Success and error notifications are printed to stderr so they never mix
//! with rendered output on stdout.

use std::io::Write;
use std::sync::Mutex;

use colored::Colorize;
use solaudit_client::{Notification, NotificationLevel, Notifier};

/// Prints notifications to a writer (stderr by default).
pub struct TerminalNotifier {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl TerminalNotifier {
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }
}

/// One notification line.
pub fn format_notification(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("{} {}", "✓".green().bold(), notification.message),
        NotificationLevel::Error => format!("{} {}", "✗".red().bold(), notification.message.red()),
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{line}") {
            tracing::debug!(error = %e, "failed to write notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_notifications_are_written_one_per_line() {
        colored::control::set_override(false);
        let buffer = SharedBuffer::default();
        let notifier = TerminalNotifier::with_writer(Box::new(buffer.clone()));

        notifier.notify(Notification::success("Report deleted successfully.").persistent());
        notifier.notify(Notification::error("Upload failed"));

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "✓ Report deleted successfully.\n✗ Upload failed\n");
    }
}
