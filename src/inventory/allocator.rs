// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shelf slot allocation.

use crate::colour::{Colour, ShelfSlot};

/// Find the lowest slot in `colour`'s band whose occupancy equals `want_occupied`.
///
/// Use `want_occupied = false` to find where an incoming block goes and `true` to find a block to
/// ship. `None` means the band has no such slot (overflow, or nothing to ship). Yellow has no band
/// and always yields `None`.
pub fn select_shelf(
    occupied: &[bool; ShelfSlot::COUNT],
    want_occupied: bool,
    colour: Colour,
) -> Option<ShelfSlot> {
    colour
        .band()?
        .find(|&i| occupied[i] == want_occupied)
        .and_then(ShelfSlot::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(i: usize) -> Option<ShelfSlot> {
        ShelfSlot::new(i)
    }

    #[test]
    fn empty_rack_gives_first_slot_of_band() {
        let occ = [false; 6];
        assert_eq!(select_shelf(&occ, false, Colour::Red), slot(0));
        assert_eq!(select_shelf(&occ, false, Colour::Blue), slot(2));
        assert_eq!(select_shelf(&occ, false, Colour::Green), slot(4));
        assert_eq!(select_shelf(&occ, true, Colour::Green), None);
    }

    #[test]
    fn full_band_overflows() {
        let occ = [true, true, false, false, false, false];
        assert_eq!(select_shelf(&occ, false, Colour::Red), None);
        assert_eq!(select_shelf(&occ, true, Colour::Red), slot(0));
    }

    #[test]
    fn skips_to_second_slot() {
        let occ = [false, false, true, false, false, true];
        assert_eq!(select_shelf(&occ, false, Colour::Blue), slot(3));
        assert_eq!(select_shelf(&occ, true, Colour::Green), slot(5));
        assert_eq!(select_shelf(&occ, false, Colour::Green), slot(4));
    }

    #[test]
    fn yellow_has_no_band() {
        assert_eq!(select_shelf(&[false; 6], false, Colour::Yellow), None);
        assert_eq!(select_shelf(&[true; 6], true, Colour::Yellow), None);
    }

    #[test]
    fn every_configuration_stays_in_band_and_picks_lowest() {
        for bits in 0u8..64 {
            let mut occ = [false; 6];
            for (i, o) in occ.iter_mut().enumerate() {
                *o = bits & (1 << i) != 0;
            }
            for colour in Colour::STORABLE {
                for want in [false, true] {
                    let band = colour.band().unwrap();
                    let expected = band.clone().find(|&i| occ[i] == want);
                    let got = select_shelf(&occ, want, colour);
                    assert_eq!(got.map(ShelfSlot::index), expected);
                    if let Some(s) = got {
                        assert_eq!(s.colour(), colour);
                        assert!(band.contains(&s.index()));
                    }
                }
            }
        }
    }
}
