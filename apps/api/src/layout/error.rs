use thiserror::Error;

/// Failure to render a single block's payload on the measurement surface.
///
/// Never aborts a pass: the sandbox swaps the block for a placeholder and
/// records a warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidDimension { field: &'static str, value: f32 },

    #[error("text scale must be positive (got {0})")]
    InvalidScale(f32),

    #[error("grid needs at least one column")]
    ZeroColumns,

    #[error("no horizontal room for text: {available:.1}px available")]
    NoHorizontalSpace { available: f32 },
}

/// Errors raised before or around a layout pass (bad style knobs, session state).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("font size {value}pt is outside the supported range {min}–{max}pt")]
    InvalidFontSize { value: f32, min: f32, max: f32 },

    #[error("unknown font family '{0}'")]
    UnknownFont(String),

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("layout session state is unavailable: {0}")]
    SessionUnavailable(&'static str),
}
