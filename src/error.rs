use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A grid was constructed with a non-positive width or height.
    #[error("invalid grid dimensions {width}x{height}, both must be > 0")]
    InvalidDimensions { width: i32, height: i32 },

    /// A coordinate outside of the grid was accessed.
    #[error("point [{x}, {y}] is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// `calculate_path` was called before a grid was bound with `set_map`.
    #[error("no grid has been set, call `set_map` first")]
    NotConfigured,

    /// The parameters given to [crate::Grid::fill] can't produce a cost field.
    #[error("invalid fill parameters: {0}")]
    InvalidFill(String),

    /// A name that doesn't match any [crate::AlgorithmKind].
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// Cell costs must be finite and non-negative.
    #[error("invalid cost {cost} at [{x}, {y}]")]
    NegativeCost { x: i32, y: i32, cost: f64 },
}
