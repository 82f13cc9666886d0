//! Outcome message aggregation.
//!
//! Core operations report what happened as an ordered list of
//! severity-tagged messages. The API layer owns presentation: the JSON
//! adapter serializes the grouped messages directly, the interactive
//! adapter pushes them onto a flash queue and redirects. Core never
//! formats responses.

use serde::Serialize;

/// Message severity.
///
/// `Danger` marks an external-engine rejection (e.g. insufficient
/// stock); when grouping for the wire it folds into the warning bucket,
/// as only success/warning groups are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

/// A single outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeMessage {
    pub severity: Severity,
    pub text: String,
}

/// Accumulated messages for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationOutcome {
    messages: Vec<OutcomeMessage>,
}

impl OperationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&mut self, text: impl Into<String>) {
        self.messages.push(OutcomeMessage {
            severity: Severity::Success,
            text: text.into(),
        });
    }

    pub fn push_warning(&mut self, text: impl Into<String>) {
        self.messages.push(OutcomeMessage {
            severity: Severity::Warning,
            text: text.into(),
        });
    }

    pub fn push_danger(&mut self, text: impl Into<String>) {
        self.messages.push(OutcomeMessage {
            severity: Severity::Danger,
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages, in the order they were recorded.
    pub fn messages(&self) -> &[OutcomeMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<OutcomeMessage> {
        self.messages
    }

    /// Partition into `(success, warning)` text groups, preserving
    /// order within each group. Danger messages join the warning group.
    pub fn into_groups(self) -> (Vec<String>, Vec<String>) {
        let mut success = Vec::new();
        let mut warning = Vec::new();
        for msg in self.messages {
            match msg.severity {
                Severity::Success => success.push(msg.text),
                Severity::Warning | Severity::Danger => warning.push(msg.text),
            }
        }
        (success, warning)
    }
}
