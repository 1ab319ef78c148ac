use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QuatError {
    /// Inverse requested for a quaternion whose squared norm is exactly 0.0.
    DivisionByZero,
    /// Strict parse rejected the input.
    InvalidFormat(String),
}

impl fmt::Display for QuatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuatError::DivisionByZero => write!(f, "square of quaternion equals 0"),
            QuatError::InvalidFormat(input) => write!(f, "invalid quaternion format: {input:?}"),
        }
    }
}

impl std::error::Error for QuatError {}

pub type Result<T> = std::result::Result<T, QuatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            QuatError::DivisionByZero.to_string(),
            "square of quaternion equals 0"
        );
        assert_eq!(
            QuatError::InvalidFormat("abc".into()).to_string(),
            "invalid quaternion format: \"abc\""
        );
    }
}
