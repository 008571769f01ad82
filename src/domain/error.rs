use std::fmt;

/// Everything that can stop the simulation from starting.
///
/// Kernels themselves never fail; errors only come out of construction,
/// configuration and host-surface checks.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A field buffer could not be reserved.
    Allocation { field: &'static str, cells: usize },
    /// Configuration that would produce silently wrong output.
    Misconfigured(String),
    /// Configuration JSON that does not parse.
    Config(String),
    /// Host surface whose pixel buffer does not match its declared size.
    SurfaceSize { expected: usize, actual: usize },
}

impl SimError {
    pub(crate) fn for_field(self, name: &'static str) -> Self {
        match self {
            SimError::Allocation { cells, .. } => SimError::Allocation { field: name, cells },
            other => other,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Allocation { field, cells } => {
                write!(f, "failed to allocate {} buffer ({} cells)", field, cells)
            }
            SimError::Misconfigured(msg) => write!(f, "invalid configuration: {}", msg),
            SimError::Config(msg) => write!(f, "config parse error: {}", msg),
            SimError::SurfaceSize { expected, actual } => write!(
                f,
                "surface buffer has {} pixels, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_error_names_the_field() {
        let err = SimError::Allocation { field: "field", cells: 16 }.for_field("pressure");
        assert_eq!(err.to_string(), "failed to allocate pressure buffer (16 cells)");
    }
}
