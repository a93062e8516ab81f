//! Errors from building or querying a spectral grid.

use thiserror::Error;

pub type GridResult<T> = Result<T, GridError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A window ID at or beyond the number of windows.
    #[error("Spectral window {id} does not exist; the grid has {num_windows} window(s)")]
    InvalidWindowId { id: usize, num_windows: usize },

    /// A channel index at or beyond a window's channel count.
    #[error("Channel {channel} does not exist in spectral window {window}, which has {num_chan} channel(s)")]
    InvalidChannel {
        window: usize,
        channel: usize,
        num_chan: usize,
    },

    /// Construction parameters that can't describe a window.
    #[error("Invalid spectral window parameters: {0}")]
    InvalidArgument(String),
}
