//! The spectral grid: every spectral window's metadata, plus the flat array of
//! channel frequencies they all index into.

mod irregular;
pub mod legacy;
mod regular;
mod sideband;

use log::trace;
use vec1::Vec1;

pub use regular::RegularWindowSpec;

use crate::{GridError, GridResult};

/// Which side of the local oscillator a window sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebandSide {
    #[default]
    NoSideband,
    Lsb,
    Usb,
}

impl SidebandSide {
    pub fn label(self) -> &'static str {
        match self {
            SidebandSide::NoSideband => "NoSB",
            SidebandSide::Lsb => "LSB",
            SidebandSide::Usb => "USB",
        }
    }

    /// The side a window's partner sits on.
    pub(crate) fn opposite(self) -> SidebandSide {
        match self {
            SidebandSide::NoSideband => SidebandSide::NoSideband,
            SidebandSide::Lsb => SidebandSide::Usb,
            SidebandSide::Usb => SidebandSide::Lsb,
        }
    }
}

/// The receiver's sideband mode. The discriminants are the values used in
/// stored metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i8)]
pub enum SidebandType {
    #[default]
    NoType = -1,
    /// Double sideband (no rejection).
    Dsb = 0,
    /// Single sideband (the image is rejected).
    Ssb = 1,
    /// Two sidebands, separated.
    TwoSb = 2,
}

impl SidebandType {
    pub fn label(self) -> &'static str {
        match self {
            SidebandType::NoType => "",
            SidebandType::Dsb => " DSB",
            SidebandType::Ssb => " SSB",
            SidebandType::TwoSb => " 2SB",
        }
    }
}

/// The metadata of a single spectral window. All frequencies are in \[Hz\].
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub num_chan: usize,

    /// The (1-based) anchor channel. This doesn't need to be within the
    /// window; an inferred anchor can sit beyond either edge. 0 for irregular
    /// windows that were only given a reference frequency.
    pub ref_chan: i64,

    pub ref_freq: f64,

    /// The signed spacing between adjacent channels. 0 if and only if the
    /// window has a single channel or isn't regularly spaced.
    pub chan_sep: f64,

    pub min_freq: f64,
    pub max_freq: f64,

    pub intermediate_freq: f64,

    /// Only meaningful for sideband-paired windows.
    pub lo_freq: f64,

    pub sideband_side: SidebandSide,
    pub sideband_type: SidebandType,

    /// The IDs of windows associated with this one. Parallel with
    /// `assoc_natures`.
    pub assoc_window_ids: Vec<usize>,

    /// For each associated window, the side *that* window is on (e.g. "USB" on
    /// an LSB window).
    pub assoc_natures: Vec<String>,

    /// The index of this window's first channel in the grid's flat channel
    /// array.
    pub channel_offset: usize,
}

impl Window {
    /// Always non-negative.
    pub fn bandwidth(&self) -> f64 {
        self.max_freq - self.min_freq
    }

    pub fn is_regular(&self) -> bool {
        self.chan_sep != 0.0
    }

    pub fn is_sideband_paired(&self) -> bool {
        !self.assoc_window_ids.is_empty()
    }

    /// The range of this window's channels in the grid's flat array.
    pub fn channel_range(&self) -> std::ops::Range<usize> {
        self.channel_offset..self.channel_offset + self.num_chan
    }
}

/// A window that has been built but not yet added to a grid. Its
/// `channel_offset` is set when it's appended.
#[derive(Debug)]
pub(crate) struct NewWindow {
    pub(crate) window: Window,
    pub(crate) chan_freqs: Vec<f64>,
}

/// An append-only collection of spectral windows. There is always at least one
/// window.
///
/// Building a grid mutates several things at once; finish building it before
/// sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralGrid {
    windows: Vec1<Window>,

    /// The concatenation of every window's channel frequencies \[Hz\], in
    /// window order.
    chan_freqs: Vec<f64>,
}

impl SpectralGrid {
    pub(crate) fn from_first_window(first: NewWindow) -> SpectralGrid {
        let NewWindow {
            mut window,
            chan_freqs,
        } = first;
        window.channel_offset = 0;
        trace!(
            "Window 0: {} channels at offset 0, {} Hz -> {} Hz",
            window.num_chan,
            window.min_freq,
            window.max_freq
        );
        let grid = SpectralGrid {
            windows: Vec1::new(window),
            chan_freqs,
        };
        grid.check_invariants();
        grid
    }

    /// Append a built window, returning its ID.
    pub(crate) fn push_window(&mut self, new: NewWindow) -> usize {
        let NewWindow {
            mut window,
            chan_freqs,
        } = new;
        let id = self.windows.len();
        window.channel_offset = self.chan_freqs.len();
        trace!(
            "Window {id}: {} channels at offset {}, {} Hz -> {} Hz",
            window.num_chan,
            window.channel_offset,
            window.min_freq,
            window.max_freq
        );
        self.chan_freqs.extend(chan_freqs);
        self.windows.push(window);
        self.check_invariants();
        id
    }

    /// Check that the channel offsets tile the flat channel array exactly.
    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            let mut expected_offset = 0;
            for (i, w) in self.windows.iter().enumerate() {
                debug_assert_eq!(w.channel_offset, expected_offset, "window {i}");
                debug_assert_eq!(w.assoc_window_ids.len(), w.assoc_natures.len());
                expected_offset += w.num_chan;
            }
            debug_assert_eq!(self.chan_freqs.len(), expected_offset);
        }
    }

    pub fn num_windows(&self) -> usize {
        self.windows.len()
    }

    /// Get a window's metadata.
    pub fn window(&self, window_id: usize) -> GridResult<&Window> {
        self.windows
            .get(window_id)
            .ok_or(GridError::InvalidWindowId {
                id: window_id,
                num_windows: self.windows.len(),
            })
    }

    /// The first window, which always exists. Use this where the window ID
    /// would otherwise default to 0.
    pub fn first_window(&self) -> &Window {
        self.windows.first()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> + '_ {
        self.windows.iter()
    }

    /// Every channel frequency of every window \[Hz\].
    pub fn channel_frequencies(&self) -> &[f64] {
        &self.chan_freqs
    }

    /// The number of channels across all windows.
    pub fn total_channels(&self) -> usize {
        self.chan_freqs.len()
    }

    /// The channel frequencies of a single window \[Hz\].
    pub fn spectral_window(&self, window_id: usize) -> GridResult<&[f64]> {
        let w = self.window(window_id)?;
        Ok(&self.chan_freqs[w.channel_range()])
    }

    pub fn channel_offset(&self, window_id: usize) -> GridResult<usize> {
        Ok(self.window(window_id)?.channel_offset)
    }

    pub fn num_channels(&self, window_id: usize) -> GridResult<usize> {
        Ok(self.window(window_id)?.num_chan)
    }

    pub fn reference_channel(&self, window_id: usize) -> GridResult<i64> {
        Ok(self.window(window_id)?.ref_chan)
    }

    pub fn reference_frequency(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.ref_freq)
    }

    pub fn channel_separation(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.chan_sep)
    }

    pub fn min_frequency(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.min_freq)
    }

    pub fn max_frequency(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.max_freq)
    }

    pub fn bandwidth(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.bandwidth())
    }

    pub fn is_regular(&self, window_id: usize) -> GridResult<bool> {
        Ok(self.window(window_id)?.is_regular())
    }

    pub fn intermediate_frequency(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.intermediate_freq)
    }

    /// The local-oscillator frequency. This is only meaningful for windows made
    /// as part of a sideband pair; don't use it to decide whether a window is
    /// paired.
    pub fn lo_frequency(&self, window_id: usize) -> GridResult<f64> {
        Ok(self.window(window_id)?.lo_freq)
    }

    pub fn sideband_side(&self, window_id: usize) -> GridResult<SidebandSide> {
        Ok(self.window(window_id)?.sideband_side)
    }

    pub fn sideband_type(&self, window_id: usize) -> GridResult<SidebandType> {
        Ok(self.window(window_id)?.sideband_type)
    }

    /// The frequency of channel `chan` (0-based) of a window \[Hz\].
    pub fn channel_frequency(&self, window_id: usize, chan: usize) -> GridResult<f64> {
        let w = self.window(window_id)?;
        if chan >= w.num_chan {
            return Err(GridError::InvalidChannel {
                window: window_id,
                channel: chan,
                num_chan: w.num_chan,
            });
        }
        Ok(self.chan_freqs[w.channel_offset + chan])
    }

    /// The position of a frequency on a window's channel grid, relative to the
    /// reference channel (which sits at 0).
    ///
    /// For regular windows the result is fractional and not clamped, so it can
    /// be used to interpolate between channels. For irregular windows the
    /// nearest channel is found by a linear scan. A single-channel window
    /// always gives 1.
    pub fn channel_number(&self, window_id: usize, freq_hz: f64) -> GridResult<f64> {
        let w = self.window(window_id)?;
        if w.num_chan == 1 {
            return Ok(1.0);
        }
        if w.is_regular() {
            return Ok((freq_hz - w.ref_freq) / w.chan_sep);
        }

        let chans = &self.chan_freqs[w.channel_range()];
        let mut nearest = 0;
        let mut nearest_diff = f64::INFINITY;
        for (k, &f) in chans.iter().enumerate() {
            let diff = (f - freq_hz).abs();
            if diff < nearest_diff {
                nearest = k;
                nearest_diff = diff;
            }
        }
        Ok(1.0 - w.ref_chan as f64 + nearest as f64)
    }

    pub fn associated_window_ids(&self, window_id: usize) -> GridResult<&[usize]> {
        Ok(&self.window(window_id)?.assoc_window_ids)
    }

    pub fn associated_natures(&self, window_id: usize) -> GridResult<&[String]> {
        Ok(&self.window(window_id)?.assoc_natures)
    }

    /// For each window ID, the first window associated with it, or the ID
    /// itself if it has no associations.
    pub fn first_associated_window_ids(&self, window_ids: &[usize]) -> GridResult<Vec<usize>> {
        window_ids
            .iter()
            .map(|&id| {
                let w = self.window(id)?;
                Ok(w.assoc_window_ids.first().copied().unwrap_or(id))
            })
            .collect()
    }

    /// "LSB", "USB" or "NoSB" for a paired window, or an empty string if the
    /// window isn't paired.
    pub fn sideband_side_label(&self, window_id: usize) -> GridResult<&'static str> {
        let w = self.window(window_id)?;
        if !w.is_sideband_paired() {
            return Ok("");
        }
        Ok(w.sideband_side.label())
    }

    /// " DSB", " SSB" or " 2SB" for a paired window, or an empty string if the
    /// window isn't paired.
    pub fn sideband_type_label(&self, window_id: usize) -> GridResult<&'static str> {
        let w = self.window(window_id)?;
        if !w.is_sideband_paired() {
            return Ok("");
        }
        Ok(w.sideband_type.label())
    }

    /// The side and type labels together, e.g. "LSB DSB".
    pub fn sideband_label(&self, window_id: usize) -> GridResult<String> {
        let side = self.sideband_side_label(window_id)?;
        let sb_type = self.sideband_type_label(window_id)?;
        Ok(format!("{side}{sb_type}"))
    }
}
