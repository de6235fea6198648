/// Run stage definitions for the gallery pipeline
use crate::GalleryError;
use std::fmt;
use std::time::{Duration, Instant};

/// Represents the current stage of a gallery run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStage {
    /// Command line arguments are being parsed
    ParsingArgs,

    /// The target page is being fetched to the scratch file
    FetchingPage,

    /// The output folder is being created or reused
    PreparingOutput,

    /// Image sources are being extracted and resolved
    Extracting,

    /// Images are being downloaded
    Downloading,

    /// Downloaded files are being thumbnailed
    Thumbnailing,

    /// The gallery page is being written
    Rendering,

    // ===== Terminal States =====
    /// The gallery was written
    Finished,

    /// A stage failed and the run was aborted
    Failed,
}

impl RunStage {
    /// Returns true if no further stage may follow
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }

    /// Returns the stage that follows this one on success
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::ParsingArgs => Some(Self::FetchingPage),
            Self::FetchingPage => Some(Self::PreparingOutput),
            Self::PreparingOutput => Some(Self::Extracting),
            Self::Extracting => Some(Self::Downloading),
            Self::Downloading => Some(Self::Thumbnailing),
            Self::Thumbnailing => Some(Self::Rendering),
            Self::Rendering => Some(Self::Finished),
            Self::Finished | Self::Failed => None,
        }
    }

    /// Returns true if moving from `self` to `to` is allowed
    pub fn can_transition_to(&self, to: RunStage) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Self::Failed || self.next() == Some(to)
    }

    /// Short lowercase label used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParsingArgs => "parsing_args",
            Self::FetchingPage => "fetching_page",
            Self::PreparingOutput => "preparing_output",
            Self::Extracting => "extracting",
            Self::Downloading => "downloading",
            Self::Thumbnailing => "thumbnailing",
            Self::Rendering => "rendering",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the current stage of a run and how long each stage took
#[derive(Debug)]
pub struct StageTracker {
    current: RunStage,
    entered_at: Instant,
    timings: Vec<(RunStage, Duration)>,
}

impl StageTracker {
    /// Creates a tracker positioned at `ParsingArgs`
    pub fn new() -> Self {
        Self {
            current: RunStage::ParsingArgs,
            entered_at: Instant::now(),
            timings: Vec::new(),
        }
    }

    pub fn current(&self) -> RunStage {
        self.current
    }

    /// Moves to `to`, recording the time spent in the stage being left
    pub fn advance(&mut self, to: RunStage) -> Result<(), GalleryError> {
        if !self.current.can_transition_to(to) {
            return Err(GalleryError::InvalidTransition {
                from: self.current,
                to,
            });
        }

        let now = Instant::now();
        self.timings
            .push((self.current, now.duration_since(self.entered_at)));
        tracing::debug!("Stage {} -> {}", self.current, to);

        self.current = to;
        self.entered_at = now;
        Ok(())
    }

    /// Marks the run as failed from whatever stage it was in
    pub fn fail(&mut self) {
        if !self.current.is_terminal() {
            tracing::debug!("Stage {} failed", self.current);
            self.current = RunStage::Failed;
        }
    }

    /// Time spent in each completed stage, in order
    pub fn timings(&self) -> &[(RunStage, Duration)] {
        &self.timings
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
