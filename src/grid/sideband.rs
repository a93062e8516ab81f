//! Pairs of windows either side of a local oscillator.

use log::debug;

use super::{regular::build_regular, NewWindow, SidebandSide, SidebandType, SpectralGrid};
use crate::{Frequency, GridError, GridResult};

/// Build a sideband pair. The first window is the one described by the
/// arguments; the second is its image on the other side of the LO, and gets
/// the ID after `first_id`.
///
/// The image window keeps the same reference channel. With its reference
/// frequency moved by twice the IF and its separation negated, channel `i` of
/// the image is then exactly the LO image of channel `i` of the first window.
/// Also shifting the reference channel by `2 * IF / chan_sep` would count the
/// move twice.
#[allow(clippy::too_many_arguments)]
fn build_pair(
    first_id: usize,
    num_chan: usize,
    ref_chan: i64,
    ref_freq: f64,
    chan_sep: f64,
    intermediate_freq: f64,
    side: SidebandSide,
    sb_type: SidebandType,
) -> GridResult<(NewWindow, NewWindow)> {
    if !intermediate_freq.is_finite() {
        return Err(GridError::InvalidArgument(format!(
            "non-finite intermediate frequency ({intermediate_freq} Hz)"
        )));
    }
    let (lo_freq, image_ref_freq) = match side {
        SidebandSide::Lsb => (
            ref_freq + intermediate_freq,
            ref_freq + 2.0 * intermediate_freq,
        ),
        SidebandSide::Usb => (
            ref_freq - intermediate_freq,
            ref_freq - 2.0 * intermediate_freq,
        ),
        SidebandSide::NoSideband => {
            return Err(GridError::InvalidArgument(
                "a sideband pair needs its first window to be LSB or USB".to_string(),
            ))
        }
    };

    let mut a = build_regular(num_chan, ref_chan, ref_freq, chan_sep)?;
    let mut b = build_regular(num_chan, ref_chan, image_ref_freq, -chan_sep)?;
    let image_side = side.opposite();
    debug!(
        "Sideband pair: {} window {first_id} and {} window {}, LO {lo_freq} Hz, IF {intermediate_freq} Hz",
        side.label(),
        image_side.label(),
        first_id + 1
    );

    for (new, this_side, other_id, other_side) in [
        (&mut a, side, first_id + 1, image_side),
        (&mut b, image_side, first_id, side),
    ] {
        let w = &mut new.window;
        w.sideband_side = this_side;
        w.sideband_type = sb_type;
        w.intermediate_freq = intermediate_freq;
        w.lo_freq = lo_freq;
        w.assoc_window_ids.push(other_id);
        w.assoc_natures.push(other_side.label().to_string());
    }
    Ok((a, b))
}

impl SpectralGrid {
    /// Make a new grid whose first two windows are a sideband pair. See
    /// [`SpectralGrid::add_sideband_pair`].
    pub fn new_sideband_pair<F1: Into<Frequency>, F2: Into<Frequency>, F3: Into<Frequency>>(
        num_chan: usize,
        ref_chan: i64,
        ref_freq: F1,
        chan_sep: F2,
        intermediate_freq: F3,
        side: SidebandSide,
        sb_type: SidebandType,
    ) -> GridResult<SpectralGrid> {
        let (a, b) = build_pair(
            0,
            num_chan,
            ref_chan,
            ref_freq.into().get(),
            chan_sep.into().get(),
            intermediate_freq.into().get(),
            side,
            sb_type,
        )?;
        let mut grid = SpectralGrid::from_first_window(a);
        grid.push_window(b);
        Ok(grid)
    }

    /// Append two windows either side of a local oscillator, returning their
    /// IDs.
    ///
    /// The first window is regular, on `side`, and described by the arguments.
    /// The LO sits `intermediate_freq` above (LSB) or below (USB) its reference
    /// frequency. The second window is the image on the other side: reference
    /// frequency moved by twice the IF, separation negated, same reference
    /// channel. Each window is associated with the other.
    #[allow(clippy::too_many_arguments)]
    pub fn add_sideband_pair<F1: Into<Frequency>, F2: Into<Frequency>, F3: Into<Frequency>>(
        &mut self,
        num_chan: usize,
        ref_chan: i64,
        ref_freq: F1,
        chan_sep: F2,
        intermediate_freq: F3,
        side: SidebandSide,
        sb_type: SidebandType,
    ) -> GridResult<(usize, usize)> {
        let (a, b) = build_pair(
            self.num_windows(),
            num_chan,
            ref_chan,
            ref_freq.into().get(),
            chan_sep.into().get(),
            intermediate_freq.into().get(),
            side,
            sb_type,
        )?;
        let id_a = self.push_window(a);
        let id_b = self.push_window(b);
        Ok((id_a, id_b))
    }
}
