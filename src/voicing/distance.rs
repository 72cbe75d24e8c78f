//! Voicing distance
//!
//! A rough measure of how far the fretting hand moves between two shapes,
//! used to pick voice-leading-friendly voicings one chord at a time.

use super::types::{Fret, Voicing};

/// Cost of a string changing between muted and played.
pub const MUTE_CHANGE_PENALTY: u32 = 2;

/// Sum of per-string fret movement between two shapes.
///
/// - both strings played: `|a - b|`
/// - one muted, one played: [`MUTE_CHANGE_PENALTY`]
/// - both muted: 0
///
/// Strings missing from the shorter shape count as muted. The result is
/// symmetric and zero for identical shapes.
///
/// # Examples
/// ```
/// use fretninja::{distance, parse_frets};
///
/// let c = parse_frets("x32010").unwrap();
/// let am = parse_frets("x02210").unwrap();
/// assert_eq!(distance(&c, &am), 3 + 0 + 2 + 0);
/// assert_eq!(distance(&c, &c), 0);
/// ```
pub fn distance(a: &[Fret], b: &[Fret]) -> u32 {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let fa = a.get(i).copied().unwrap_or(Fret::Muted);
            let fb = b.get(i).copied().unwrap_or(Fret::Muted);
            match (fa.fret(), fb.fret()) {
                (Some(x), Some(y)) => x.abs_diff(y) as u32,
                (None, None) => 0,
                _ => MUTE_CHANGE_PENALTY,
            }
        })
        .sum()
}

/// Index of the candidate closest to `previous`; the first one wins ties.
pub fn closest_voicing(previous: &Voicing, candidates: &[Voicing]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(i, v)| (distance(&previous.frets, &v.frets), *i))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voicing::parse_frets;

    fn frets(tab: &str) -> Vec<Fret> {
        parse_frets(tab).unwrap()
    }

    #[test]
    fn test_identity_and_symmetry() {
        let shapes = ["320003", "x32010", "xx0232", "133211", "x 10 12 12 11 x"];
        for a in shapes {
            assert_eq!(distance(&frets(a), &frets(a)), 0);
            for b in shapes {
                assert_eq!(distance(&frets(a), &frets(b)), distance(&frets(b), &frets(a)));
            }
        }
    }

    #[test]
    fn test_mute_penalty() {
        assert_eq!(distance(&frets("x00000"), &frets("000000")), 2);
        assert_eq!(distance(&frets("xx0000"), &frets("x00000")), 2);
        assert_eq!(distance(&frets("xxxxxx"), &frets("xxxxxx")), 0);
    }

    #[test]
    fn test_different_lengths() {
        assert_eq!(distance(&frets("0000"), &frets("000000")), 4);
    }

    #[test]
    fn test_closest_voicing_ties_keep_first() {
        let previous = Voicing::new(frets("x32010"));
        let candidates = vec![
            Voicing::new(frets("x02210")),
            Voicing::new(frets("x02220")),
            Voicing::new(frets("x02210")),
        ];
        assert_eq!(closest_voicing(&previous, &candidates), Some(0));
        assert_eq!(closest_voicing(&previous, &[]), None);
    }
}
