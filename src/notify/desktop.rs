//! notify::desktop
//!
//! OS desktop notifications through the platform's notification helper:
//! `notify-send` on Linux and the BSDs, `osascript` on macOS.

use std::process::Command;

use super::traits::{Notification, Notifier, NotifyError};

/// Sends notifications through the platform helper.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    /// Build the helper invocation for a notification on this platform.
    fn command_for(notification: &Notification) -> Result<Command, NotifyError> {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                applescript_escape(&notification.body),
                applescript_escape(&notification.title)
            );
            let mut cmd = Command::new("osascript");
            cmd.arg("-e").arg(script);
            return Ok(cmd);
        }

        if cfg!(unix) {
            let program = which::which("notify-send").map_err(|_| NotifyError::Unsupported)?;
            let mut cmd = Command::new(program);
            cmd.arg(format!("--icon={}", notification.icon.freedesktop_name()))
                .arg("--app-name=refactorit")
                .arg(&notification.title)
                .arg(&notification.body);
            return Ok(cmd);
        }

        Err(NotifyError::Unsupported)
    }
}

impl Notifier for DesktopNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut cmd = Self::command_for(notification)?;
        let program = cmd.get_program().to_string_lossy().into_owned();

        let output = cmd.output().map_err(|e| NotifyError::Launch {
            program: program.clone(),
            source: e,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed {
                program,
                status: output.status.to_string(),
            })
        }
    }
}

/// Notifier used when notifications are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::debug!(title = %notification.title, "notifications disabled, not sending");
        Ok(())
    }
}

fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
