use crate::ray::Ray;

/// Failures while tracing a single ray.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The ray has a zero or non-finite direction, or a non-finite origin.
    #[error("degenerate ray: origin {:?}, direction {:?}", .0.origin, .0.direction)]
    DegenerateRay(Ray),
}

/// Rejected physical or scene parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("time step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("disk inner radius {inner} must be smaller than outer radius {outer}")]
    EmptyDisk { inner: f64, outer: f64 },
    #[error("step budget must be at least one")]
    NoSteps,
}

pub type TraceResult<T> = Result<T, TraceError>;
