//! Associative container mapping parity terms to rotation angles.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Mapping from a parity term to its accumulated rotation angle.
///
/// A term is never stored with a zero angle: adding cancels an entry out
/// of the map when its accumulated angle reaches exactly zero, and
/// [`extract_term`](ParityMap::extract_term) reports absent terms as a
/// zero angle. This supports the "emit each pending rotation exactly
/// once" protocol used by the synthesizers.
///
/// Terms are `u32` parity bitmasks in practice, but any hashable key
/// works.
#[derive(Debug, Clone)]
pub struct ParityMap<T = u32> {
    term_to_angle: FxHashMap<T, f64>,
}

impl<T: Copy + Eq + Hash> ParityMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            term_to_angle: FxHashMap::default(),
        }
    }

    /// Number of terms with a non-zero pending angle.
    pub fn num_terms(&self) -> usize {
        self.term_to_angle.len()
    }

    /// Check whether no terms are pending.
    pub fn is_empty(&self) -> bool {
        self.term_to_angle.is_empty()
    }

    /// Add a parity term.
    ///
    /// If the term already exists its angle is incremented; an angle that
    /// cancels to exactly zero removes the entry.
    pub fn add_term(&mut self, term: T, rotation_angle: f64) {
        if rotation_angle == 0.0 {
            return;
        }
        let entry = self.term_to_angle.entry(term).or_insert(0.0);
        *entry += rotation_angle;
        if *entry == 0.0 {
            self.term_to_angle.remove(&term);
        }
    }

    /// Extract a parity term: return and remove its pending angle, or
    /// zero if the term is absent.
    pub fn extract_term(&mut self, term: T) -> f64 {
        self.term_to_angle.remove(&term).unwrap_or(0.0)
    }

    /// Iterate over pending `(term, angle)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        self.term_to_angle.iter().map(|(&term, &angle)| (term, angle))
    }
}

impl<T: Copy + Eq + Hash> Default for ParityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> FromIterator<(T, f64)> for ParityMap<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (term, angle) in iter {
            map.add_term(term, angle);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_add_merges_additively() {
        let mut map = ParityMap::new();
        map.add_term(0b101u32, FRAC_PI_4);
        map.add_term(0b101u32, FRAC_PI_4);
        assert_eq!(map.num_terms(), 1);
        assert_eq!(map.extract_term(0b101), 2.0 * FRAC_PI_4);
    }

    #[test]
    fn test_extract_is_destructive() {
        let mut map = ParityMap::new();
        map.add_term(3u32, 1.5);
        assert_eq!(map.extract_term(3), 1.5);
        assert_eq!(map.extract_term(3), 0.0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_cancellation_removes_entry() {
        let mut map = ParityMap::new();
        map.add_term(7u32, FRAC_PI_4);
        map.add_term(7u32, -FRAC_PI_4);
        assert_eq!(map.num_terms(), 0);
        assert_eq!(map.extract_term(7), 0.0);
    }

    #[test]
    fn test_zero_angle_is_not_stored() {
        let mut map = ParityMap::new();
        map.add_term(1u32, 0.0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let map: ParityMap<u32> = [(1, 0.5), (2, 0.25), (1, -0.5)].into_iter().collect();
        assert_eq!(map.num_terms(), 1);
    }
}
