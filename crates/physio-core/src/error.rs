use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("polygon needs at least 3 points, got {0}")]
    DegeneratePolygon(usize),

    #[error("intensity {0} is outside range [0, 10]")]
    IntensityOutOfRange(u8),

    #[error("unknown step number: {0}")]
    UnknownStep(usize),
}
