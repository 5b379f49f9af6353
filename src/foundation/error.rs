/// Convenience result type used across the crate.
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Which of the two overlay text lines a failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextLine {
    /// The bold title line above the separator.
    Title,
    /// The regular subtitle line below the separator.
    Subtitle,
}

impl std::fmt::Display for TextLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Subtitle => f.write_str("subtitle"),
        }
    }
}

/// Top-level error taxonomy used by the render, fetch and install APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReleaseError {
    /// A required input was absent or degenerate (missing background, missing face, zero area).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Font bytes could not be parsed or a face could not be built at the requested size.
    #[error("font error: {0}")]
    Font(String),

    /// A measured text line does not fit inside the safe margin of the canvas.
    #[error(
        "render: {line} text is too long for the selected image resolution, please reduce the text"
    )]
    TooLong {
        /// The offending line.
        line: TextLine,
    },

    /// Background search or download failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Writing artifacts into the root filesystem failed.
    #[error("install error: {0}")]
    Install(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReleaseError {
    /// Build a [`ReleaseError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`ReleaseError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ReleaseError::TooLong`] value.
    pub fn too_long(line: TextLine) -> Self {
        Self::TooLong { line }
    }

    /// Build a [`ReleaseError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ReleaseError::Install`] value.
    pub fn install(msg: impl Into<String>) -> Self {
        Self::Install(msg.into())
    }

    /// Prefix the message with the pipeline stage that observed the failure.
    ///
    /// `TooLong` already names its stage and `Other` keeps its source chain intact,
    /// so those two pass through unchanged.
    pub fn in_stage(self, stage: &str) -> Self {
        match self {
            Self::Precondition(msg) => Self::Precondition(format!("{stage}: {msg}")),
            Self::Font(msg) => Self::Font(format!("{stage}: {msg}")),
            Self::Fetch(msg) => Self::Fetch(format!("{stage}: {msg}")),
            Self::Install(msg) => Self::Install(format!("{stage}: {msg}")),
            Self::TooLong { .. } | Self::Other(_) => self,
        }
    }

    /// True for the "text does not fit" family of failures.
    pub fn is_too_long(&self) -> bool {
        matches!(self, Self::TooLong { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
