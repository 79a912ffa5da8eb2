//! Task handles for long-running server-side jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{Envelope, Resource};
use crate::error::EnvelopeError;

/// Lifecycle states reported by the server-side task queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Waiting,
    Received,
    Running,
    Done,
    Error,
}

impl TaskState {
    /// Whether the task has begun executing.
    pub fn is_started(self) -> bool {
        matches!(self, Self::Running | Self::Done | Self::Error)
    }

    /// Whether the task has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// A server-side job in progress.
///
/// Operations that trigger asynchronous work (installs, backups, key and
/// user management, cache purges, copies) return one of these. The client
/// only observes state; the server drives all transitions. There is no
/// built-in polling: to reach a final state, re-fetch the task by id until
/// [`Task::completed`] reports `true`.
#[derive(Debug, Clone)]
pub struct Task(Envelope);

impl From<Envelope> for Task {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Task {
    const PRIMARY_FIELD: &'static str = "id";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Task {
    /// Task identifier.
    pub fn id(&self) -> Result<String, EnvelopeError> {
        self.0.text_field("id")
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Result<TaskState, EnvelopeError> {
        let raw = self.0.value_field("state")?;
        serde_json::from_value(raw.clone())
            .map_err(|_| EnvelopeError::wrong_shape("state", "waiting|received|running|done|error"))
    }

    /// True once the task has begun executing. Derived from the state, not
    /// stored independently.
    pub fn started(&self) -> Result<bool, EnvelopeError> {
        Ok(self.state()?.is_started())
    }

    /// True once the task has reached a terminal state. Derived from the
    /// state, not stored independently.
    pub fn completed(&self) -> Result<bool, EnvelopeError> {
        Ok(self.state()?.is_terminal())
    }

    /// Job payload, in whatever shape the originating operation queued it.
    pub fn body(&self) -> Result<&Value, EnvelopeError> {
        self.0.value_field("body")
    }

    /// Whether the platform hides this task from activity listings.
    pub fn hidden(&self) -> Result<bool, EnvelopeError> {
        self.0.bool_field("hidden")
    }

    /// Human-readable description of the job.
    pub fn description(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("description")
    }

    /// Job outcome; `None` until the server populates it, which means "not
    /// yet known" rather than failure.
    pub fn result(&self) -> Result<Option<String>, EnvelopeError> {
        self.0.opt_text_field("result")
    }

    /// When the task was queued.
    pub fn created(&self) -> Result<DateTime<Utc>, EnvelopeError> {
        self.0.timestamp_field("created")
    }

    /// Name of the queue the task runs on.
    pub fn queue(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("queue")
    }

    /// Structured value the queue carries alongside the job, if any.
    pub fn cookie(&self) -> Result<Option<&Value>, EnvelopeError> {
        self.0.opt_value_field("cookie")
    }

    /// Worker host the task was handed to, if any yet.
    pub fn recipient(&self) -> Result<Option<String>, EnvelopeError> {
        self.0.opt_text_field("recipient")
    }

    /// Component that queued the task.
    pub fn sender(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("sender")
    }

    /// Completion percentage; `None` until the server reports progress.
    pub fn percentage(&self) -> Result<Option<u64>, EnvelopeError> {
        self.0.opt_u64_field("percentage")
    }
}
