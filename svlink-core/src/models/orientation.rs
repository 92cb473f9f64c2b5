use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ModelError;

///
/// Orientation of a breakend. `Forward` (+1) keeps the reference sequence to the left of the
/// break, `Reverse` (-1) keeps the sequence to the right.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn as_i8(&self) -> i8 {
        match self {
            Orientation::Forward => 1,
            Orientation::Reverse => -1,
        }
    }

    pub fn opposite(&self) -> Orientation {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }
}

impl TryFrom<i8> for Orientation {
    type Error = ModelError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Orientation::Forward),
            -1 => Ok(Orientation::Reverse),
            other => Err(ModelError::InvalidOrientation(other.to_string())),
        }
    }
}

impl FromStr for Orientation {
    type Err = ModelError;

    /// Accepts `1`/`+1`/`+` and `-1`/`-`, which covers both VCF-style and BED strand columns.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "+1" | "+" => Ok(Orientation::Forward),
            "-1" | "-" => Ok(Orientation::Reverse),
            other => Err(ModelError::InvalidOrientation(other.to_string())),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("1", Orientation::Forward)]
    #[case("+", Orientation::Forward)]
    #[case("-1", Orientation::Reverse)]
    #[case(" - ", Orientation::Reverse)]
    fn test_parse_orientation(#[case] raw: &str, #[case] expected: Orientation) {
        assert_eq!(raw.parse::<Orientation>().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_invalid_orientation() {
        assert!("0".parse::<Orientation>().is_err());
        assert!(Orientation::try_from(2).is_err());
    }

    #[rstest]
    fn test_opposite() {
        assert_eq!(Orientation::Forward.opposite(), Orientation::Reverse);
        assert_eq!(Orientation::Reverse.opposite().as_i8(), 1);
    }
}
