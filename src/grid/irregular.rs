//! Windows built from an explicit list of channel frequencies. If the list
//! turns out to be evenly spaced, the window is stored as a regular one.

use itertools::{Itertools, MinMaxResult};
use log::debug;

use super::{NewWindow, SidebandSide, SidebandType, SpectralGrid, Window};
use crate::{frequency::unit_factor, Frequency, GridError, GridResult, REGULARITY_TOLERANCE_HZ};

/// How an explicit channel list is tied to the channel grid.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    /// A 1-based channel within the list.
    RefChan(i64),
    /// A frequency \[Hz\], which need not coincide with any channel.
    RefFreq(f64),
}

fn build_from_list(chan_freqs: Vec<f64>, anchor: Anchor) -> GridResult<NewWindow> {
    let num_chan = chan_freqs.len();
    // A full scan; the list needn't be monotonic.
    let (min_freq, max_freq) = match chan_freqs.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => {
            return Err(GridError::InvalidArgument(
                "the channel frequency list is empty".to_string(),
            ))
        }
        MinMaxResult::OneElement(f) => (f, f),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    if let Some(bad) = chan_freqs.iter().find(|f| !f.is_finite()) {
        return Err(GridError::InvalidArgument(format!(
            "non-finite channel frequency ({bad} Hz)"
        )));
    }
    let ref_freq = match anchor {
        Anchor::RefChan(ref_chan) => {
            if ref_chan < 1 || ref_chan as usize > num_chan {
                return Err(GridError::InvalidArgument(format!(
                    "reference channel {ref_chan} is outside of the {num_chan} supplied channels"
                )));
            }
            chan_freqs[ref_chan as usize - 1]
        }
        Anchor::RefFreq(ref_freq) => {
            if !ref_freq.is_finite() {
                return Err(GridError::InvalidArgument(format!(
                    "non-finite reference frequency ({ref_freq} Hz)"
                )));
            }
            ref_freq
        }
    };

    let (chan_sep, ref_chan) = if num_chan == 1 {
        let ref_chan = match anchor {
            Anchor::RefChan(ref_chan) => ref_chan,
            Anchor::RefFreq(_) => 1,
        };
        (0.0, ref_chan)
    } else {
        let d0 = chan_freqs[1] - chan_freqs[0];
        // All channels at the same frequency can't be described by a
        // separation, so they count as irregular.
        let regular = d0 != 0.0
            && chan_freqs
                .iter()
                .tuple_windows()
                .all(|(a, b)| (b - a - d0).abs() <= REGULARITY_TOLERANCE_HZ);
        match (regular, anchor) {
            (true, Anchor::RefChan(ref_chan)) => (d0, ref_chan),
            (true, Anchor::RefFreq(ref_freq)) => {
                let ref_chan = (1.0 + (ref_freq - chan_freqs[0] + REGULARITY_TOLERANCE_HZ) / d0)
                    .round() as i64;
                (d0, ref_chan)
            }
            (false, Anchor::RefChan(ref_chan)) => (0.0, ref_chan),
            (false, Anchor::RefFreq(_)) => (0.0, 0),
        }
    };

    debug!(
        "Window from a list: {num_chan} channels, ref. channel {ref_chan} at {ref_freq} Hz, {}",
        if chan_sep != 0.0 {
            format!("regular with separation {chan_sep} Hz")
        } else {
            "irregular".to_string()
        }
    );
    Ok(NewWindow {
        window: Window {
            num_chan,
            ref_chan,
            ref_freq,
            chan_sep,
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

fn to_hz(chan_freqs: &[f64], units: &str) -> Vec<f64> {
    let factor = unit_factor(units);
    chan_freqs.iter().map(|f| f * factor).collect()
}

impl SpectralGrid {
    /// Make a new grid whose first window has the listed channel frequencies
    /// (in `units`, e.g. "GHz"). `ref_chan` is the 1-based channel in the list
    /// to use as the reference.
    pub fn new_anchored_list(
        ref_chan: i64,
        chan_freqs: &[f64],
        units: &str,
    ) -> GridResult<SpectralGrid> {
        let new = build_from_list(to_hz(chan_freqs, units), Anchor::RefChan(ref_chan))?;
        Ok(SpectralGrid::from_first_window(new))
    }

    /// Append a window with the listed channel frequencies (in `units`).
    /// `ref_chan` is the 1-based channel in the list to use as the reference.
    pub fn add_anchored_list(
        &mut self,
        ref_chan: i64,
        chan_freqs: &[f64],
        units: &str,
    ) -> GridResult<usize> {
        let new = build_from_list(to_hz(chan_freqs, units), Anchor::RefChan(ref_chan))?;
        Ok(self.push_window(new))
    }

    /// Make a new grid whose first window has the listed channel frequencies
    /// (in `units`). If the channels are evenly spaced, the reference channel
    /// is inferred from `ref_freq`; otherwise it's 0.
    pub fn new_referenced_list<F: Into<Frequency>>(
        ref_freq: F,
        chan_freqs: &[f64],
        units: &str,
    ) -> GridResult<SpectralGrid> {
        let new = build_from_list(
            to_hz(chan_freqs, units),
            Anchor::RefFreq(ref_freq.into().get()),
        )?;
        Ok(SpectralGrid::from_first_window(new))
    }

    /// Append a window with the listed channel frequencies (in `units`). If the
    /// channels are evenly spaced, the reference channel is inferred from
    /// `ref_freq`; otherwise it's 0.
    pub fn add_referenced_list<F: Into<Frequency>>(
        &mut self,
        ref_freq: F,
        chan_freqs: &[f64],
        units: &str,
    ) -> GridResult<usize> {
        let new = build_from_list(
            to_hz(chan_freqs, units),
            Anchor::RefFreq(ref_freq.into().get()),
        )?;
        Ok(self.push_window(new))
    }

    /// Make a new grid whose first window has the given channel frequencies.
    /// The first channel is the reference frequency.
    pub fn from_frequencies(chan_freqs: &[Frequency]) -> GridResult<SpectralGrid> {
        let hz: Vec<f64> = chan_freqs.iter().map(Frequency::get).collect();
        let ref_freq = hz.first().copied().unwrap_or_default();
        let new = build_from_list(hz, Anchor::RefFreq(ref_freq))?;
        Ok(SpectralGrid::from_first_window(new))
    }

    /// Append a window with the given channel frequencies. The first channel is
    /// the reference frequency.
    pub fn add_frequencies(&mut self, chan_freqs: &[Frequency]) -> GridResult<usize> {
        let hz: Vec<f64> = chan_freqs.iter().map(Frequency::get).collect();
        let ref_freq = hz.first().copied().unwrap_or_default();
        let new = build_from_list(hz, Anchor::RefFreq(ref_freq))?;
        Ok(self.push_window(new))
    }
}
