//! Backend-to-UI events and error modeling for the desktop GUI.

use client_core::ControllerSnapshot;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    StateChanged(ControllerSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    FileAccess,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FileSelection,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("failed to read")
            || message_lower.contains("no such file")
            || message_lower.contains("permission denied")
        {
            UiErrorCategory::FileAccess
        } else if message_lower.contains("backend url")
            || message_lower.contains("invalid url")
            || message_lower.contains("http or https")
        {
            UiErrorCategory::Configuration
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    /// One-line description for the status bar, e.g. "File selection failed: ...".
    pub fn summary(&self) -> String {
        format!("{} failed: {}", context_label(self.context), self.message)
    }
}

pub fn context_label(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "Backend startup",
        UiErrorContext::FileSelection => "File selection",
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::FileAccess => "File",
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
