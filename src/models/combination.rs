use std::fmt;

/// Identifier of a single spectral band.
pub type Band = u8;

/// Number of bands grouped into one combination.
pub const BANDS_PER_COMBINATION: usize = 3;

/// An unordered triple of distinct bands.
///
/// Stored sorted ascending, so every draw order of the same three bands
/// compares, hashes, and prints identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination([Band; BANDS_PER_COMBINATION]);

impl Combination {
    /// Build the canonical combination for three bands, in any order.
    ///
    /// Returns `None` if any band repeats.
    pub fn new(a: Band, b: Band, c: Band) -> Option<Self> {
        let mut bands = [a, b, c];
        bands.sort_unstable();
        if bands[0] == bands[1] || bands[1] == bands[2] {
            return None;
        }
        Some(Self(bands))
    }

    /// Build from a slice of exactly three distinct bands.
    pub fn from_slice(bands: &[Band]) -> Option<Self> {
        match *bands {
            [a, b, c] => Self::new(a, b, c),
            _ => None,
        }
    }

    /// The bands in ascending order.
    pub fn bands(&self) -> [Band; BANDS_PER_COMBINATION] {
        self.0
    }

    /// Bands as separate CLI arguments.
    pub fn to_args(&self) -> Vec<String> {
        self.0.iter().map(|b| b.to_string()).collect()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{} {} {}", a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations_collapse() {
        let a = Combination::new(2, 7, 5).unwrap();
        let b = Combination::new(5, 2, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bands(), [2, 5, 7]);
    }

    #[test]
    fn test_repeated_band_rejected() {
        assert!(Combination::new(4, 4, 9).is_none());
        assert!(Combination::new(1, 9, 9).is_none());
    }

    #[test]
    fn test_from_slice_requires_three() {
        assert!(Combination::from_slice(&[1, 2]).is_none());
        assert!(Combination::from_slice(&[1, 2, 3, 4]).is_none());
        assert_eq!(
            Combination::from_slice(&[13, 1, 8]),
            Combination::new(1, 8, 13)
        );
    }

    #[test]
    fn test_display_is_space_separated() {
        let combo = Combination::new(11, 3, 6).unwrap();
        assert_eq!(combo.to_string(), "3 6 11");
        assert_eq!(combo.to_args(), vec!["3", "6", "11"]);
    }
}
