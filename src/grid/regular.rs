//! Regularly-spaced windows, described by a channel count, a reference
//! channel/frequency and a channel separation.

use log::debug;

use super::{NewWindow, SidebandSide, SidebandType, SpectralGrid, Window};
use crate::{Frequency, GridError, GridResult};

/// The parameters of a regular window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularWindowSpec {
    pub num_chan: usize,
    /// 1-based; may lie outside the window.
    pub ref_chan: i64,
    pub ref_freq: Frequency,
    /// Signed.
    pub chan_sep: Frequency,
}

/// Generate the channels of a regular window. Channel `i` (0-based) has the
/// frequency `ref_freq - chan_sep * (ref_chan - 1) + i * chan_sep`.
///
/// A zero `chan_sep` with more than one channel is allowed; every channel then
/// sits at `ref_freq`.
pub(crate) fn build_regular(
    num_chan: usize,
    ref_chan: i64,
    ref_freq: f64,
    chan_sep: f64,
) -> GridResult<NewWindow> {
    if num_chan == 0 {
        return Err(GridError::InvalidArgument(
            "a spectral window needs at least one channel".to_string(),
        ));
    }
    if !ref_freq.is_finite() || !chan_sep.is_finite() {
        return Err(GridError::InvalidArgument(format!(
            "non-finite reference frequency ({ref_freq} Hz) or channel separation ({chan_sep} Hz)"
        )));
    }

    // In floating point, so extreme anchors can't overflow.
    let offset = ref_freq - chan_sep * (ref_chan as f64 - 1.0);
    let chan_freqs: Vec<f64> = (0..num_chan)
        .map(|i| offset + i as f64 * chan_sep)
        .collect();

    // The channels are monotonic, so the ordering of the first two tells us
    // which end is which.
    let first = chan_freqs[0];
    let last = chan_freqs[num_chan - 1];
    let (min_freq, max_freq) = match chan_freqs.get(1) {
        Some(&second) if second < first => (last, first),
        _ => (first, last),
    };

    debug!(
        "Regular window: {num_chan} channels, ref. channel {ref_chan} at {ref_freq} Hz, separation {chan_sep} Hz"
    );
    Ok(NewWindow {
        window: Window {
            num_chan,
            ref_chan,
            ref_freq,
            // A single channel has no separation.
            chan_sep: if num_chan == 1 { 0.0 } else { chan_sep },
            min_freq,
            max_freq,
            intermediate_freq: 0.0,
            lo_freq: 0.0,
            sideband_side: SidebandSide::NoSideband,
            sideband_type: SidebandType::NoType,
            assoc_window_ids: vec![],
            assoc_natures: vec![],
            channel_offset: 0,
        },
        chan_freqs,
    })
}

impl SpectralGrid {
    /// Make a new grid whose first window is regular.
    pub fn new_regular<F1: Into<Frequency>, F2: Into<Frequency>>(
        num_chan: usize,
        ref_chan: i64,
        ref_freq: F1,
        chan_sep: F2,
    ) -> GridResult<SpectralGrid> {
        let new = build_regular(num_chan, ref_chan, ref_freq.into().get(), chan_sep.into().get())?;
        Ok(SpectralGrid::from_first_window(new))
    }

    /// Make a new grid from a list of regular windows, in order. The list must
    /// not be empty.
    pub fn from_windows(specs: &[RegularWindowSpec]) -> GridResult<SpectralGrid> {
        let (first, rest) = specs.split_first().ok_or_else(|| {
            GridError::InvalidArgument("no spectral windows were supplied".to_string())
        })?;
        // Build everything before assembling, so nothing is half-made on error.
        let first = build_regular(
            first.num_chan,
            first.ref_chan,
            first.ref_freq.get(),
            first.chan_sep.get(),
        )?;
        let rest = rest
            .iter()
            .map(|s| build_regular(s.num_chan, s.ref_chan, s.ref_freq.get(), s.chan_sep.get()))
            .collect::<GridResult<Vec<_>>>()?;

        let mut grid = SpectralGrid::from_first_window(first);
        for new in rest {
            grid.push_window(new);
        }
        Ok(grid)
    }

    /// Append a regular window, returning its ID.
    pub fn add_regular_window<F1: Into<Frequency>, F2: Into<Frequency>>(
        &mut self,
        num_chan: usize,
        ref_chan: i64,
        ref_freq: F1,
        chan_sep: F2,
    ) -> GridResult<usize> {
        let new = build_regular(num_chan, ref_chan, ref_freq.into().get(), chan_sep.into().get())?;
        Ok(self.push_window(new))
    }
}
