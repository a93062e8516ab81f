//! Accessors for callers that expect a sentinel value rather than an error for
//! a bad window ID.
//!
//! Every accessor here logs a warning and returns [`LEGACY_SENTINEL`] (or
//! `32767` for integers, or an empty string/list) when the window doesn't
//! exist. A sentinel can't be told apart from real data by its value alone;
//! prefer the [`Result`]-returning accessors on [`SpectralGrid`].

use log::warn;

use super::SpectralGrid;
use crate::{GridResult, LEGACY_SENTINEL};

const LEGACY_SENTINEL_INT: i64 = 32767;

/// A borrowed view of a [`SpectralGrid`] with sentinel-returning accessors.
/// Get one with [`SpectralGrid::legacy`].
#[derive(Debug, Clone, Copy)]
pub struct LegacyView<'a> {
    grid: &'a SpectralGrid,
}

impl SpectralGrid {
    pub fn legacy(&self) -> LegacyView<'_> {
        LegacyView { grid: self }
    }
}

/// Unwrap a lookup, substituting `sentinel` (and complaining) on error.
fn or_sentinel<T>(result: GridResult<T>, sentinel: T) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            warn!("{e}; returning a sentinel value");
            sentinel
        }
    }
}

impl<'a> LegacyView<'a> {
    pub fn num_windows(&self) -> usize {
        self.grid.num_windows()
    }

    pub fn num_channels(&self, window_id: usize) -> usize {
        or_sentinel(
            self.grid.num_channels(window_id),
            LEGACY_SENTINEL_INT as usize,
        )
    }

    pub fn reference_channel(&self, window_id: usize) -> i64 {
        or_sentinel(self.grid.reference_channel(window_id), LEGACY_SENTINEL_INT)
    }

    pub fn reference_frequency(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.reference_frequency(window_id), LEGACY_SENTINEL)
    }

    pub fn channel_separation(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.channel_separation(window_id), LEGACY_SENTINEL)
    }

    pub fn min_frequency(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.min_frequency(window_id), LEGACY_SENTINEL)
    }

    pub fn max_frequency(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.max_frequency(window_id), LEGACY_SENTINEL)
    }

    pub fn bandwidth(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.bandwidth(window_id), LEGACY_SENTINEL)
    }

    pub fn lo_frequency(&self, window_id: usize) -> f64 {
        or_sentinel(self.grid.lo_frequency(window_id), LEGACY_SENTINEL)
    }

    pub fn channel_frequency(&self, window_id: usize, chan: usize) -> f64 {
        or_sentinel(self.grid.channel_frequency(window_id, chan), LEGACY_SENTINEL)
    }

    pub fn channel_number(&self, window_id: usize, freq_hz: f64) -> f64 {
        or_sentinel(self.grid.channel_number(window_id, freq_hz), LEGACY_SENTINEL)
    }

    pub fn spectral_window(&self, window_id: usize) -> &'a [f64] {
        or_sentinel(self.grid.spectral_window(window_id), Default::default())
    }

    pub fn associated_window_ids(&self, window_id: usize) -> &'a [usize] {
        or_sentinel(self.grid.associated_window_ids(window_id), Default::default())
    }

    pub fn associated_natures(&self, window_id: usize) -> &'a [String] {
        or_sentinel(self.grid.associated_natures(window_id), Default::default())
    }

    /// For each window ID, its first associated window, or the ID itself if it
    /// has none. Bad IDs are passed through unchanged.
    pub fn first_associated_window_ids(&self, window_ids: &[usize]) -> Vec<usize> {
        window_ids
            .iter()
            .map(|&id| {
                self.associated_window_ids(id)
                    .first()
                    .copied()
                    .unwrap_or(id)
            })
            .collect()
    }

    pub fn sideband_side_label(&self, window_id: usize) -> &'static str {
        or_sentinel(self.grid.sideband_side_label(window_id), "")
    }

    pub fn sideband_type_label(&self, window_id: usize) -> &'static str {
        or_sentinel(self.grid.sideband_type_label(window_id), "")
    }

    pub fn sideband_label(&self, window_id: usize) -> String {
        or_sentinel(self.grid.sideband_label(window_id), String::new())
    }
}
