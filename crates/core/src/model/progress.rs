use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("a progress session needs at least one stage")]
    NoStages,
}

//
// ─── STAGES ───────────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of stage labels shown during one loading episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stages(Vec<String>);

impl Stages {
    /// Builds a stage list from one or more labels.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::NoStages` if `labels` is empty.
    pub fn new<I, S>(labels: I) -> Result<Self, ProgressError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ProgressError::NoStages);
        }
        Ok(Self(labels))
    }

    /// A single stage; single-stage sessions are never sub-divided.
    #[must_use]
    pub fn single(label: impl Into<String>) -> Self {
        Self(vec![label.into()])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl From<&str> for Stages {
    fn from(label: &str) -> Self {
        Self::single(label)
    }
}

impl From<String> for Stages {
    fn from(label: String) -> Self {
        Self::single(label)
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Result of moving a running session to its next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAdvance {
    /// The session now shows the stage at this index.
    Advanced(usize),
    /// The last stage was passed; the session must complete.
    Exhausted,
}

/// How a running session returned to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Cancelled,
    TimedOut,
}

/// In-memory state of one running loading episode.
///
/// The idle state is represented by the absence of a session; owners hold an
/// `Option<ProgressSession>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSession {
    stages: Stages,
    stage_index: usize,
    message: String,
}

impl ProgressSession {
    /// Starts at stage 0 with its label as the displayed message.
    #[must_use]
    pub fn start(stages: Stages) -> Self {
        let message = stages.label(0).unwrap_or_default().to_string();
        Self {
            stages,
            stage_index: 0,
            message,
        }
    }

    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn stages(&self) -> &Stages {
        &self.stages
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Overwrites the displayed label without touching stage or progress.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Completed fraction in `(0, 1]`.
    ///
    /// One stage reports `1.0` immediately; otherwise stage `i` of `n` is
    /// `(i + 1) / n`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        let total = self.stages.len();
        if total <= 1 {
            return 1.0;
        }
        (self.stage_index + 1) as f64 / total as f64
    }

    /// `fraction()` as a whole percentage for the progress bar width.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Moves to the next stage, resetting the message to that stage's label.
    pub fn advance(&mut self) -> StageAdvance {
        let next = self.stage_index + 1;
        match self.stages.label(next) {
            Some(label) => {
                self.message = label.to_string();
                self.stage_index = next;
                StageAdvance::Advanced(next)
            }
            None => StageAdvance::Exhausted,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
