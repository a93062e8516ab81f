//! End-to-end behaviour of grids built from mixed window kinds.

use approx::assert_abs_diff_eq;
use spectral_grid::{Frequency, GridError, SidebandSide, SidebandType, SpectralGrid};

fn setup_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A grid with one of every kind of window.
fn mixed_grid() -> SpectralGrid {
    let mut grid = SpectralGrid::new_regular(64, 32, Frequency::new(90.0, "GHz"), 1e7).unwrap();
    grid.add_regular_window(16, 1, Frequency::new(345.0, "GHz"), Frequency::new(-0.5, "MHz"))
        .unwrap();
    grid.add_anchored_list(1, &[183.0, 183.5, 184.5, 186.0], "GHz")
        .unwrap();
    grid.add_referenced_list(Frequency::new(22.0, "GHz"), &[21.0, 22.0, 23.0], "GHz")
        .unwrap();
    grid.add_sideband_pair(
        8,
        4,
        Frequency::new(230.0, "GHz"),
        Frequency::new(2.0, "MHz"),
        Frequency::new(6.0, "GHz"),
        SidebandSide::Usb,
        SidebandType::Ssb,
    )
    .unwrap();
    grid
}

#[test]
fn test_small_regular_window() {
    setup_logging();
    let grid = SpectralGrid::new_regular(4, 2, 100e9, 1e9).unwrap();
    assert_eq!(
        grid.spectral_window(0).unwrap(),
        &[99e9, 100e9, 101e9, 102e9]
    );
    assert_eq!(grid.channel_frequency(0, 1).unwrap(), 100e9);
    assert_eq!(grid.min_frequency(0).unwrap(), 99e9);
    assert_eq!(grid.max_frequency(0).unwrap(), 102e9);
    assert_eq!(grid.bandwidth(0).unwrap(), 3e9);
    assert!(grid.is_regular(0).unwrap());
}

#[test]
fn test_small_irregular_window() {
    setup_logging();
    let grid = SpectralGrid::new_referenced_list(100e9, &[100e9, 101e9, 100.5e9], "Hz").unwrap();
    assert!(!grid.is_regular(0).unwrap());
    assert_eq!(grid.channel_separation(0).unwrap(), 0.0);
    let ref_chan = grid.reference_channel(0).unwrap();
    assert_eq!(
        grid.channel_number(0, 100.5e9).unwrap(),
        (1 - ref_chan + 2) as f64
    );
}

#[test]
fn test_window_count_and_channel_total() {
    setup_logging();
    let mut grid = SpectralGrid::new_regular(10, 1, 1e9, 1e6).unwrap();
    for k in 1..=5 {
        grid.add_regular_window(k, 1, 2e9 * k as f64, 1e6).unwrap();
        assert_eq!(grid.num_windows(), 1 + k);
        let total: usize = (0..grid.num_windows())
            .map(|w| grid.num_channels(w).unwrap())
            .sum();
        assert_eq!(grid.total_channels(), total);
        assert_eq!(grid.channel_frequencies().len(), total);
    }
}

#[test]
fn test_properties_hold_for_every_window() {
    setup_logging();
    let grid = mixed_grid();
    assert_eq!(grid.num_windows(), 6);

    let mut expected_offset = 0;
    for w in 0..grid.num_windows() {
        let window = grid.window(w).unwrap();
        assert_eq!(window.channel_offset, expected_offset);
        expected_offset += window.num_chan;

        assert_eq!(
            grid.is_regular(w).unwrap(),
            grid.channel_separation(w).unwrap() != 0.0
        );
        let bandwidth = grid.bandwidth(w).unwrap();
        assert!(bandwidth >= 0.0);
        assert_eq!(
            bandwidth,
            grid.max_frequency(w).unwrap() - grid.min_frequency(w).unwrap()
        );

        let chans = grid.spectral_window(w).unwrap();
        for (i, &f) in chans.iter().enumerate() {
            assert_eq!(grid.channel_frequency(w, i).unwrap(), f);
            assert!(f >= grid.min_frequency(w).unwrap());
            assert!(f <= grid.max_frequency(w).unwrap());
        }
    }
    assert_eq!(grid.total_channels(), expected_offset);
}

#[test]
fn test_regular_windows_follow_the_formula() {
    let grid = mixed_grid();
    for w in [0, 1, 4, 5] {
        let window = grid.window(w).unwrap();
        let offset = window.ref_freq - window.chan_sep * (window.ref_chan as f64 - 1.0);
        for i in 0..window.num_chan {
            assert_eq!(
                grid.channel_frequency(w, i).unwrap(),
                offset + i as f64 * window.chan_sep
            );
        }
    }
    assert_eq!(grid.channel_frequency(0, 31).unwrap(), 90e9);
}

#[test]
fn test_list_windows() {
    let grid = mixed_grid();

    // Irregular, anchored on the first channel.
    assert!(!grid.is_regular(2).unwrap());
    assert_eq!(grid.min_frequency(2).unwrap(), 183e9);
    assert_eq!(grid.max_frequency(2).unwrap(), 186e9);
    for (k, &f) in grid.spectral_window(2).unwrap().iter().enumerate() {
        assert_eq!(grid.channel_number(2, f).unwrap(), k as f64);
    }

    // Regular, with the reference channel inferred.
    assert!(grid.is_regular(3).unwrap());
    assert_eq!(grid.channel_separation(3).unwrap(), 1e9);
    assert_eq!(grid.reference_channel(3).unwrap(), 2);
    assert_abs_diff_eq!(grid.channel_number(3, 22.5e9).unwrap(), 0.5, epsilon = 1e-12);
}

#[test]
fn test_sideband_pair_in_a_mixed_grid() {
    let grid = mixed_grid();
    let (usb, lsb) = (4, 5);
    assert_eq!(grid.associated_window_ids(usb).unwrap(), &[lsb]);
    assert_eq!(grid.associated_window_ids(lsb).unwrap(), &[usb]);
    assert_eq!(grid.associated_natures(usb).unwrap(), &["LSB".to_string()]);
    assert_eq!(grid.associated_natures(lsb).unwrap(), &["USB".to_string()]);
    assert_eq!(
        grid.lo_frequency(usb).unwrap(),
        grid.lo_frequency(lsb).unwrap()
    );
    assert_eq!(grid.lo_frequency(usb).unwrap(), 224e9);
    assert_eq!(grid.reference_frequency(lsb).unwrap(), 218e9);
    assert_eq!(grid.sideband_label(usb).unwrap(), "USB SSB");
    assert_eq!(grid.sideband_label(lsb).unwrap(), "LSB SSB");

    let lo = grid.lo_frequency(usb).unwrap();
    for i in 0..8 {
        assert_abs_diff_eq!(
            grid.channel_frequency(lsb, i).unwrap(),
            2.0 * lo - grid.channel_frequency(usb, i).unwrap(),
            epsilon = 1e-3
        );
    }

    assert_eq!(
        grid.first_associated_window_ids(&[0, 4, 5, 2]).unwrap(),
        vec![0, 5, 4, 2]
    );
    for w in 0..4 {
        assert_eq!(grid.sideband_label(w).unwrap(), "");
    }
}

#[test]
fn test_sideband_pair_first() {
    let grid = SpectralGrid::new_sideband_pair(
        4,
        2,
        100e9,
        1e9,
        4e9,
        SidebandSide::Lsb,
        SidebandType::Dsb,
    )
    .unwrap();
    assert_eq!(grid.associated_window_ids(0).unwrap(), &[1]);
    assert_eq!(grid.associated_window_ids(1).unwrap(), &[0]);
    assert_eq!(grid.associated_natures(0).unwrap(), &["USB".to_string()]);
    assert_eq!(grid.associated_natures(1).unwrap(), &["LSB".to_string()]);
    assert_eq!(grid.lo_frequency(0).unwrap(), grid.lo_frequency(1).unwrap());
}

#[test]
fn test_errors_and_legacy_sentinels() {
    setup_logging();
    let grid = mixed_grid();
    assert_eq!(
        grid.bandwidth(6),
        Err(GridError::InvalidWindowId {
            id: 6,
            num_windows: 6
        })
    );
    assert_eq!(
        grid.bandwidth(6).unwrap_err().to_string(),
        "Spectral window 6 does not exist; the grid has 6 window(s)"
    );
    assert_eq!(grid.legacy().bandwidth(6), spectral_grid::LEGACY_SENTINEL);
    assert_eq!(grid.legacy().bandwidth(0), grid.bandwidth(0).unwrap());
}
