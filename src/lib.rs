//! Spectral grids for heterodyne receiver chains.
//!
//! A [`SpectralGrid`] is an append-only collection of spectral windows. Each
//! window is a contiguous band of channel frequencies, and all windows share a
//! single flat array of channel frequencies \[Hz\]. Windows may be paired as
//! lower/upper sidebands around a local oscillator.

mod error;
pub mod frequency;
pub mod grid;

pub use error::{GridError, GridResult};
pub use frequency::{unit_factor, Frequency};
pub use grid::{
    legacy::LegacyView, RegularWindowSpec, SidebandSide, SidebandType, SpectralGrid, Window,
};

/// The largest deviation \[Hz\] between consecutive channel spacings for an
/// explicit channel list to still count as regularly spaced. Also used to nudge
/// the rounding when inferring a reference channel.
pub const REGULARITY_TOLERANCE_HZ: f64 = 1e-12;

/// The value returned by [`LegacyView`] accessors when handed a window ID that
/// doesn't exist.
pub const LEGACY_SENTINEL: f64 = 32767.0;

#[cfg(test)]
pub(crate) fn setup_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
