//! Error types for the `citadel-world` crate.

/// Errors that can occur during city map operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// The coordinates lie outside the map.
    #[error("tile {x}/{y} is outside a map of size {size}")]
    OutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Edge length of the square map.
        size: u32,
    },

    /// A map must be at least one tile wide.
    #[error("map size must be positive")]
    EmptyMap,
}
