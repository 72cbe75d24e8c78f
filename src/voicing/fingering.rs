//! Fingering heuristic
//!
//! Suggests which finger (1 = index, 2 = middle, 3 = ring, 4 = pinky) presses
//! each fretted string. The index finger takes the lowest fret, as a barre
//! when several strings share it and no open string rings above it. The other
//! fingers then go to the remaining notes in ascending fret order.
//!
//! This is a heuristic, not an optimizer: a shape needing more than four
//! separate fingers leaves the excess notes unfingered.

use super::types::{fretted_range, Fret};
use log::trace;

const INDEX: u8 = 1;
const RING: u8 = 3;
const PINKY: u8 = 4;

/// Fret the correction pass looks at when the index finger barres fret 1.
const FIRST_POSITION_STRETCH: u8 = 3;

/// True when the index finger should lay across every string at `min_fret`.
///
/// Needs at least two strings at `min_fret`, and no open string above the
/// first of them: the barre would stop it from ringing.
fn is_barre(frets: &[Fret], min_fret: u8) -> bool {
    let at_min = frets.iter().filter(|f| **f == Fret::Fretted(min_fret)).count();
    if at_min < 2 {
        return false;
    }
    match frets.iter().position(|f| *f == Fret::Fretted(min_fret)) {
        Some(first) => !frets[first + 1..].iter().any(|f| f.is_open()),
        None => false,
    }
}

/// Give `finger` to the unassigned fretted string with the lowest fret,
/// lowest string first on ties.
fn assign_next(frets: &[Fret], fingers: &mut [Option<u8>], finger: u8) {
    let next = frets
        .iter()
        .enumerate()
        .filter(|(i, f)| f.is_fretted() && fingers[*i].is_none())
        .filter_map(|(i, f)| f.fret().map(|fret| (fret, i)))
        .min();

    if let Some((_, string)) = next {
        fingers[string] = Some(finger);
    }
}

/// Suggest a finger for every string.
///
/// Returns one value per string: 0 for muted, open or unfingered strings,
/// otherwise 1-4.
///
/// # Examples
/// ```
/// use fretninja::{assign_fingers, parse_frets};
///
/// // Am: x02210 → x02310 (0 = not fingered)
/// assert_eq!(assign_fingers(&parse_frets("x02210").unwrap()), vec![0, 0, 2, 3, 1, 0]);
///
/// // Barre at the third fret
/// assert_eq!(assign_fingers(&parse_frets("353463").unwrap()), vec![1, 3, 1, 2, 4, 1]);
/// ```
pub fn assign_fingers(frets: &[Fret]) -> Vec<u8> {
    let Some((min_fret, _)) = fretted_range(frets) else {
        return vec![0; frets.len()];
    };

    let mut fingers: Vec<Option<u8>> = vec![None; frets.len()];

    let barre = is_barre(frets, min_fret);
    if barre {
        for (i, fret) in frets.iter().enumerate() {
            if *fret == Fret::Fretted(min_fret) {
                fingers[i] = Some(INDEX);
            }
        }
    } else if let Some(first) = frets.iter().position(|f| *f == Fret::Fretted(min_fret)) {
        fingers[first] = Some(INDEX);
    }

    for finger in 2..=4 {
        assign_next(frets, &mut fingers, finger);
    }

    let mut out: Vec<u8> = fingers.iter().map(|f| f.unwrap_or(0)).collect();
    if barre && min_fret == 1 {
        apply_barre_correction(frets, &mut out);
    }

    trace!("Fingers for {:?}: {:?} (barre: {})", frets, out, barre);
    out
}

/// First-position barre fix-up.
///
/// With a barre across fret 1 and two or more strings at fret 3 (the F-major
/// family of shapes), the fret-3 strings alternate ring and pinky in string
/// order. Shapes without that pattern are left alone, and applying the pass
/// twice gives the same result as applying it once.
pub fn apply_barre_correction(frets: &[Fret], fingers: &mut [u8]) {
    let barre_at_first = fretted_range(frets).map_or(false, |(min, _)| min == 1) && is_barre(frets, 1);
    if !barre_at_first {
        return;
    }

    let stretched: Vec<usize> = frets
        .iter()
        .enumerate()
        .filter(|(_, f)| **f == Fret::Fretted(FIRST_POSITION_STRETCH))
        .map(|(i, _)| i)
        .collect();
    if stretched.len() < 2 {
        return;
    }

    for (n, string) in stretched.into_iter().enumerate() {
        if let Some(finger) = fingers.get_mut(string) {
            *finger = if n % 2 == 0 { RING } else { PINKY };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voicing::parse_frets;

    fn fingers(tab: &str) -> Vec<u8> {
        assign_fingers(&parse_frets(tab).unwrap())
    }

    #[test]
    fn test_open_chords() {
        assert_eq!(fingers("x02210"), vec![0, 0, 2, 3, 1, 0]); // Am
        assert_eq!(fingers("320003"), vec![2, 1, 0, 0, 0, 3]); // G
        assert_eq!(fingers("320033"), vec![2, 1, 0, 0, 3, 4]); // G
        assert_eq!(fingers("320001"), vec![3, 2, 0, 0, 0, 1]); // G7
        assert_eq!(fingers("022100"), vec![0, 2, 3, 1, 0, 0]); // E
        assert_eq!(fingers("022130"), vec![0, 2, 3, 1, 4, 0]); // E7
        assert_eq!(fingers("x21202"), vec![0, 2, 1, 3, 0, 4]); // B7
    }

    #[test]
    fn test_barre_chords() {
        assert_eq!(fingers("133211"), vec![1, 3, 4, 2, 1, 1]); // F
        assert_eq!(fingers("x24432"), vec![0, 1, 3, 4, 2, 1]); // Bm
        assert_eq!(fingers("353463"), vec![1, 3, 1, 2, 4, 1]); // G7
    }

    #[test]
    fn test_first_position_correction() {
        // Ascending assignment would give 1 2 3 1 1 1
        assert_eq!(fingers("133111"), vec![1, 3, 4, 1, 1, 1]); // Fm
    }

    #[test]
    fn test_open_string_breaks_barre() {
        // Two strings at fret 2 but the open B string above: no barre
        assert_eq!(fingers("x2420x"), vec![0, 1, 3, 2, 0, 0]);
    }

    #[test]
    fn test_all_open_or_muted() {
        assert_eq!(fingers("x00000"), vec![0; 6]);
        assert_eq!(fingers("xxxxxx"), vec![0; 6]);
    }

    #[test]
    fn test_too_many_notes_left_unfingered() {
        // Six different frets, no barre: only four fingers
        let result = fingers("x 1 2 3 4 5");
        assert_eq!(result, vec![0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_correction_is_idempotent() {
        for tab in ["133111", "133211", "x13331", "353463", "320003"] {
            let frets = parse_frets(tab).unwrap();
            let once = assign_fingers(&frets);
            let mut twice = once.clone();
            apply_barre_correction(&frets, &mut twice);
            assert_eq!(once, twice, "{}", tab);
        }
    }

    #[test]
    fn test_fingers_two_to_four_used_once() {
        for tab in ["x24432", "022130", "x 5 7 7 6 5", "3 5 5 4 3 3", "x21202"] {
            let result = fingers(tab);
            for finger in 2..=4 {
                assert!(result.iter().filter(|f| **f == finger).count() <= 1, "{}", tab);
            }
        }
    }
}
