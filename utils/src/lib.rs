use std::fmt;

use number_prefix::NumberPrefix;

/// Wrapper around an integer which formats itself using decimal prefixes (Kilo, Mega, Giga,
/// etc.).  Useful for printing large counters without overwhelming the reader with digits.
///
/// ```
/// use voicelead_utils::BigNumInt;
///
/// assert_eq!(BigNumInt(42).to_string(), "42");
/// assert_eq!(BigNumInt(1_500).to_string(), "1.5k");
/// assert_eq!(BigNumInt(2_000_000).to_string(), "2.0M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigNumInt(pub usize);

impl fmt::Display for BigNumInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match NumberPrefix::decimal(self.0 as f64) {
            NumberPrefix::Standalone(n) => write!(f, "{}", n),
            NumberPrefix::Prefixed(prefix, n) => write!(f, "{:.1}{}", n, prefix),
        }
    }
}
