//! Voicing search
//!
//! Backtracking over per-string fret options. Each string either plays a fret
//! that produces one of the required pitch classes, or is muted. Branches are
//! pruned when the fret span grows too wide or when too many required pitch
//! classes are still missing for the strings left.
//!
//! Search order is fixed: strings low to high, frets ascending within a
//! string, muted last. Results therefore come out in a reproducible order.

use super::types::Fret;
use crate::instrument::{Instrument, SearchOptions};
use crate::pitch::PitchClass;
use log::debug;

/// Search state for one call. Nothing is shared between calls.
struct Search<'a> {
    instrument: &'a Instrument,
    options: &'a SearchOptions,
    required: Vec<PitchClass>,
    bass: Option<PitchClass>,
    /// Fret options per string, muted last. Frets that would sound above
    /// MIDI 127 are left out.
    string_options: Vec<Vec<Fret>>,
    /// How many chosen strings produce each pitch class
    covered: [u8; 12],
    current: Vec<Fret>,
    results: Vec<Vec<Fret>>,
    nodes: usize,
}

impl<'a> Search<'a> {
    fn new(
        required: &[PitchClass],
        bass: Option<PitchClass>,
        instrument: &'a Instrument,
        options: &'a SearchOptions,
    ) -> Self {
        let mut required: Vec<PitchClass> = required.iter().map(|n| n % 12).collect();
        required.sort_unstable();
        required.dedup();

        let string_options = instrument
            .strings
            .iter()
            .map(|open| {
                let open_pc = open.pitch_class();
                let mut frets: Vec<Fret> = (0..=options.max_fret)
                    .filter(|fret| open.transpose(*fret).is_some())
                    .filter(|fret| required.contains(&((open_pc + fret % 12) % 12)))
                    .map(Fret::Fretted)
                    .collect();
                frets.push(Fret::Muted);
                frets
            })
            .collect();

        Self {
            instrument,
            options,
            required,
            bass: bass.map(|b| b % 12),
            string_options,
            covered: [0; 12],
            current: Vec::with_capacity(instrument.string_count()),
            results: Vec::new(),
            nodes: 0,
        }
    }

    fn pitch_class_at(&self, string: usize, fret: u8) -> PitchClass {
        (self.instrument.strings[string].pitch_class() + fret % 12) % 12
    }

    fn missing(&self) -> usize {
        self.required
            .iter()
            .filter(|pc| self.covered[**pc as usize] == 0)
            .count()
    }

    fn done(&self) -> bool {
        self.results.len() >= self.options.limit
    }

    /// Pitch class of the lowest played string so far.
    fn lowest_played(&self) -> Option<PitchClass> {
        self.current
            .iter()
            .enumerate()
            .find_map(|(string, fret)| fret.fret().map(|f| self.pitch_class_at(string, f)))
    }

    /// The lowest played string must produce the bass, when one is requested.
    fn bass_holds(&self) -> bool {
        match (self.bass, self.lowest_played()) {
            (Some(bass), Some(lowest)) => lowest == bass,
            _ => true,
        }
    }

    fn run(&mut self) {
        self.backtrack(0, None, false);
    }

    fn backtrack(&mut self, string: usize, range: Option<(u8, u8)>, bass_placed: bool) {
        if self.done() {
            return;
        }
        self.nodes += 1;

        if string == self.instrument.string_count() {
            if self.missing() == 0 && self.bass_holds() {
                self.results.push(self.current.clone());
            }
            return;
        }

        let remaining_strings = self.instrument.string_count() - (string + 1);

        for idx in 0..self.string_options[string].len() {
            let option = self.string_options[string][idx];

            // Span over fretted (non-open) strings
            let new_range = match option {
                Fret::Fretted(f) if f > 0 => Some(match range {
                    None => (f, f),
                    Some((lo, hi)) => (lo.min(f), hi.max(f)),
                }),
                _ => range,
            };
            if let Some((lo, hi)) = new_range {
                if hi - lo > self.options.max_span {
                    continue;
                }
            }

            let pc = option.fret().map(|f| self.pitch_class_at(string, f));

            // The first played string decides the bass; a wrong bass can
            // never be repaired by higher strings.
            let places_bass = match (self.bass, pc) {
                (Some(bass), Some(pc)) if !bass_placed => {
                    if self.lowest_played().is_none() && pc != bass {
                        continue;
                    }
                    pc == bass
                }
                _ => false,
            };

            if let Some(pc) = pc {
                self.covered[pc as usize] += 1;
            }

            if self.missing() <= remaining_strings * self.options.coverage_per_string {
                self.current.push(option);
                self.backtrack(string + 1, new_range, bass_placed || places_bass);
                self.current.pop();
            }

            if let Some(pc) = pc {
                self.covered[pc as usize] -= 1;
            }

            if self.done() {
                return;
            }
        }
    }
}

/// Find up to `options.limit` fret assignments covering `required`.
///
/// Every result satisfies:
/// - each required pitch class is produced by at least one played string
/// - with a `bass`, the lowest played string produces it
/// - the span between the lowest and highest non-open fret is at most `options.max_span`
///
/// An empty `required` set, or no assignment meeting the constraints, gives
/// an empty list.
///
/// # Examples
/// ```
/// use fretninja::{find_fret_assignments, parse_frets, Instrument, SearchOptions};
///
/// let guitar = Instrument::standard_guitar();
/// // G major: G B D
/// let shapes = find_fret_assignments(&[7, 11, 2], None, &guitar, &SearchOptions::default());
/// assert_eq!(shapes[0], parse_frets("320003").unwrap());
/// ```
pub fn find_fret_assignments(
    required: &[PitchClass],
    bass: Option<PitchClass>,
    instrument: &Instrument,
    options: &SearchOptions,
) -> Vec<Vec<Fret>> {
    if required.is_empty() || options.limit == 0 || instrument.strings.is_empty() {
        return Vec::new();
    }

    let mut search = Search::new(required, bass, instrument, options);
    debug!(
        "Searching {} strings for {:?} (bass {:?}), options per string: {:?}",
        instrument.string_count(),
        search.required,
        search.bass,
        search.string_options.iter().map(Vec::len).collect::<Vec<_>>()
    );
    search.run();
    debug!(
        "Search visited {} nodes, accepted {} shapes",
        search.nodes,
        search.results.len()
    );
    search.results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voicing::parse_frets;

    fn guitar() -> Instrument {
        Instrument::standard_guitar()
    }

    #[test]
    fn test_g_major_order() {
        let shapes = find_fret_assignments(&[7, 11, 2], None, &guitar(), &SearchOptions::default());
        let tabs: Vec<Vec<Fret>> = ["320003", "32000x", "320033", "32003x", "3200x3"]
            .iter()
            .map(|t| parse_frets(t).unwrap())
            .collect();
        assert_eq!(shapes, tabs);
    }

    #[test]
    fn test_limit_respected() {
        let options = SearchOptions::default().with_limit(2);
        let shapes = find_fret_assignments(&[0, 4, 7], None, &guitar(), &options);
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn test_empty_required() {
        assert!(find_fret_assignments(&[], None, &guitar(), &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let options = SearchOptions::default().with_limit(0);
        assert!(find_fret_assignments(&[0, 4, 7], None, &guitar(), &options).is_empty());
    }

    #[test]
    fn test_unreachable_is_empty() {
        // Seven pitch classes on a single string cannot be covered
        let one_string = Instrument::new("Mono", vec![crate::pitch::Pitch(40)]);
        let shapes = find_fret_assignments(&[0, 2, 4, 5, 7, 9, 11], None, &one_string, &SearchOptions::default());
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_bass_is_lowest_played() {
        let g = guitar();
        let shapes = find_fret_assignments(&[7, 10, 2, 5], Some(7), &g, &SearchOptions::default().with_limit(20));
        assert!(!shapes.is_empty());
        for frets in &shapes {
            let lowest = frets.iter().position(|f| !f.is_muted()).unwrap();
            let fret = frets[lowest].fret().unwrap();
            assert_eq!((g.strings[lowest].pitch_class() + fret) % 12, 7, "{:?}", frets);
        }
    }

    #[test]
    fn test_span_limit() {
        let options = SearchOptions {
            max_span: 2,
            limit: 50,
            ..SearchOptions::default()
        };
        for frets in find_fret_assignments(&[0, 4, 7, 10], None, &guitar(), &options) {
            if let Some((lo, hi)) = crate::voicing::types::fretted_range(&frets) {
                assert!(hi - lo <= 2, "{:?}", frets);
            }
        }
    }

    #[test]
    fn test_frets_past_midi_range_skipped() {
        let high = Instrument::new("High", vec![crate::pitch::Pitch(120)]);
        let options = SearchOptions::default().with_limit(50);
        let shapes = find_fret_assignments(&[0], None, &high, &options);
        assert_eq!(shapes, vec![vec![Fret::Fretted(0)]]);

        let top = Instrument::new("Top", vec![crate::pitch::Pitch(120); 3]);
        let shapes = find_fret_assignments(&[0, 4, 7], None, &top, &options);
        assert!(!shapes.is_empty());
        for frets in shapes {
            assert!(frets.iter().all(|f| f.fret().map_or(true, |n| n <= 7)), "{:?}", frets);
        }
    }

    #[test]
    fn test_max_fret() {
        let options = SearchOptions {
            max_fret: 3,
            limit: 50,
            ..SearchOptions::default()
        };
        for frets in find_fret_assignments(&[0, 4, 7], None, &guitar(), &options) {
            assert!(frets.iter().all(|f| f.fret().map_or(true, |n| n <= 3)));
        }
    }
}
