use thiserror::Error;

/// Top-level error type for the ball-track core.
#[derive(Debug, Error)]
pub enum BalltrackError {
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to trajectory evaluation and bounce detection.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("no ground crossing at y = {ground} for t in [{t_min}, {t_max}]")]
    NoGroundCrossing { ground: f64, t_min: f64, t_max: f64 },

    #[error("time domain [{t_min}, {t_max}] is empty or not finite")]
    InvalidDomain { t_min: f64, t_max: f64 },

    #[error("{axis} coefficients are not finite")]
    NonFiniteCoefficients { axis: char },

    #[error("sampling step {0} must be finite and positive")]
    InvalidStep(f64),
}

/// Errors related to tube mesh construction.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("tube path needs at least 2 points, got {points}")]
    InsufficientPathLength { points: usize },

    #[error("{vertices} vertices do not fit a 16-bit index buffer (max {max})")]
    IndexOverflow { vertices: usize, max: usize },

    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors reported at the rendering-engine and asset seams.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    #[error("scene handle not found: {0}")]
    HandleNotFound(&'static str),

    #[error("rendering engine rejected submission: {0}")]
    Rejected(String),
}

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl BalltrackError {
    /// Returns `true` when the error is a normal outcome that should be shown
    /// to the user as a notice rather than treated as a fault.
    #[must_use]
    pub fn is_user_notice(&self) -> bool {
        matches!(
            self,
            Self::Trajectory(TrajectoryError::NoGroundCrossing { .. })
        )
    }
}

/// Convenience type alias for results using [`BalltrackError`].
pub type Result<T> = std::result::Result<T, BalltrackError>;
