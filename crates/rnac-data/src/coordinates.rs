//! Genomic coordinate conventions
//!
//! Databases number genomes differently. Some start counting at zero and use
//! half-open intervals (`[start, stop)`), others start at one and use fully
//! closed intervals (`[start, stop]`). Everything written out is normalized
//! to the one-based, fully-closed convention.
//!
//! The rules follow the UCSC description of the two systems: converting a
//! zero-based half-open interval `[a, b)` to one-based closed gives `[a + 1, b]`;
//! only the start moves.

use crate::error::{DataError, Result};
use crate::regions::Exon;
use serde::{Deserialize, Serialize};

// ============================================================================
// Strand
// ============================================================================

/// Strand of a genomic region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Reverse,
    Unknown,
    Forward,
}

impl Strand {
    /// Build from the integer forms used by expert databases.
    pub fn from_int(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Strand::Forward),
            -1 => Ok(Strand::Reverse),
            0 => Ok(Strand::Unknown),
            other => Err(DataError::UnknownStrand(other.to_string())),
        }
    }

    /// Build from a float strand, accepted only when it is integral.
    pub fn from_float(value: f64) -> Result<Self> {
        if value.fract() == 0.0 && value.is_finite() {
            Self::from_int(value as i64)
        } else {
            Err(DataError::UnknownStrand(value.to_string()))
        }
    }

    /// Build from a raw JSON value (integer, float or string).
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::from_int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::from_float(f)
                } else {
                    Err(DataError::UnknownStrand(n.to_string()))
                }
            },
            serde_json::Value::String(s) => s.parse(),
            other => Err(DataError::UnknownStrand(other.to_string())),
        }
    }

    pub fn display_string(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        }
    }

    pub fn display_int(&self) -> i8 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
            Strand::Unknown => 0,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Strand::Unknown)
    }
}

impl std::str::FromStr for Strand {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" | "1" | "+1" => Ok(Strand::Forward),
            "-" | "-1" => Ok(Strand::Reverse),
            "." | "0" => Ok(Strand::Unknown),
            _ => Err(DataError::UnknownStrand(s.to_string())),
        }
    }
}

impl TryFrom<i64> for Strand {
    type Error = DataError;

    fn try_from(value: i64) -> Result<Self> {
        Self::from_int(value)
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_string())
    }
}

// ============================================================================
// Basis and close status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateStart {
    Zero,
    One,
}

impl CoordinateStart {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateStart::Zero => "0-start",
            CoordinateStart::One => "1-start",
        }
    }
}

impl std::str::FromStr for CoordinateStart {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "0-start" => Ok(CoordinateStart::Zero),
            "1-start" => Ok(CoordinateStart::One),
            _ => Err(DataError::UnknownCoordinateStart(s.to_string())),
        }
    }
}

impl std::fmt::Display for CoordinateStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseStatus {
    Closed,
    Open,
}

impl CloseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseStatus::Closed => "fully-closed",
            CloseStatus::Open => "half-open",
        }
    }
}

impl std::str::FromStr for CloseStatus {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fully-closed" => Ok(CloseStatus::Closed),
            "half-open" => Ok(CloseStatus::Open),
            _ => Err(DataError::UnknownCloseStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CloseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Coordinate system
// ============================================================================

/// How a database numbers a genome: where counting starts and whether the
/// stop endpoint is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub basis: CoordinateStart,
    pub close_status: CloseStatus,
}

impl CoordinateSystem {
    pub fn new(basis: CoordinateStart, close_status: CloseStatus) -> Self {
        Self {
            basis,
            close_status,
        }
    }

    /// `"0-start, half-open"`
    pub fn zero_based() -> Self {
        Self::new(CoordinateStart::Zero, CloseStatus::Open)
    }

    /// `"1-start, fully-closed"`
    pub fn one_based() -> Self {
        Self::new(CoordinateStart::One, CloseStatus::Closed)
    }

    /// Parse a name formatted like `"basis, close_status"`.
    ///
    /// Only `"0-start, half-open"` and `"1-start, fully-closed"` are accepted.
    pub fn from_name(name: &str) -> Result<Self> {
        let (basis, close) = name
            .split_once(", ")
            .ok_or_else(|| DataError::UnknownCoordinateSystem(name.to_string()))?;
        match (basis.parse::<CoordinateStart>()?, close.parse::<CloseStatus>()?) {
            (CoordinateStart::Zero, CloseStatus::Open) => Ok(Self::zero_based()),
            (CoordinateStart::One, CloseStatus::Closed) => Ok(Self::one_based()),
            _ => Err(DataError::UnknownCoordinateSystem(name.to_string())),
        }
    }

    pub fn name(&self) -> String {
        format!("{}, {}", self.basis, self.close_status)
    }

    /// Number of bases covered by `exon` in this system.
    pub fn size(&self, exon: &Exon) -> Result<i64> {
        let size = match self.close_status {
            CloseStatus::Closed => exon.stop() - exon.start() + 1,
            CloseStatus::Open => exon.stop() - exon.start(),
        };
        if size < 0 {
            return Err(DataError::NegativeSize {
                start: exon.start(),
                stop: exon.stop(),
            });
        }
        Ok(size)
    }

    /// Move the start of `exon` to a zero basis; the stop is unchanged.
    pub fn as_zero_based(&self, exon: &Exon) -> Exon {
        match self.basis {
            CoordinateStart::Zero => *exon,
            CoordinateStart::One => exon.with_start(exon.start() - 1),
        }
    }

    /// Move the start of `exon` to a one basis; the stop is unchanged.
    ///
    /// An empty half-open exon `[a, a)` becomes `[a + 1, a]`, which still has
    /// size 0 in the fully-closed system.
    pub fn as_one_based(&self, exon: &Exon) -> Exon {
        match self.basis {
            CoordinateStart::Zero => exon.with_start(exon.start() + 1),
            CoordinateStart::One => *exon,
        }
    }

    pub fn normalize(&self, exon: &Exon) -> Exon {
        self.as_one_based(exon)
    }
}

impl std::str::FromStr for CoordinateSystem {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.basis, self.close_status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strand_build() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("+1".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-1".parse::<Strand>().unwrap(), Strand::Reverse);
        assert_eq!(".".parse::<Strand>().unwrap(), Strand::Unknown);
        assert_eq!(Strand::from_int(-1).unwrap(), Strand::Reverse);
        assert_eq!(Strand::from_float(1.0).unwrap(), Strand::Forward);
        assert_eq!(Strand::from_json(&json!(-1)).unwrap(), Strand::Reverse);
        assert_eq!(Strand::from_json(&json!("+")).unwrap(), Strand::Forward);
    }

    #[test]
    fn test_strand_rejects_unknown_values() {
        assert!(matches!("x".parse::<Strand>(), Err(DataError::UnknownStrand(_))));
        assert!(Strand::from_int(2).is_err());
        assert!(Strand::from_float(0.5).is_err());
        assert!(Strand::from_json(&json!(null)).is_err());
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Forward.display_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
        assert_eq!(Strand::Unknown.display_int(), 0);
        assert_eq!(Strand::Reverse.display_int(), -1);
    }

    #[test]
    fn test_coordinate_system_names() {
        let zero = CoordinateSystem::from_name("0-start, half-open").unwrap();
        assert_eq!(zero, CoordinateSystem::zero_based());
        assert_eq!(zero.name(), "0-start, half-open");

        let one: CoordinateSystem = "1-start, fully-closed".parse().unwrap();
        assert_eq!(one, CoordinateSystem::one_based());
        assert_eq!(one.to_string(), "1-start, fully-closed");
    }

    #[test]
    fn test_coordinate_system_bad_names() {
        assert!(matches!(
            CoordinateSystem::from_name("0-start"),
            Err(DataError::UnknownCoordinateSystem(_))
        ));
        assert!(matches!(
            CoordinateSystem::from_name("2-start, half-open"),
            Err(DataError::UnknownCoordinateStart(_))
        ));
        assert!(matches!(
            CoordinateSystem::from_name("0-start, open"),
            Err(DataError::UnknownCloseStatus(_))
        ));
    }

    #[test]
    fn test_coordinate_system_rejects_mixed_names() {
        for name in ["0-start, fully-closed", "1-start, half-open"] {
            assert!(matches!(
                CoordinateSystem::from_name(name),
                Err(DataError::UnknownCoordinateSystem(_))
            ));
        }
    }

    #[test]
    fn test_size() {
        let exon = Exon::new(10, 20).unwrap();
        assert_eq!(CoordinateSystem::one_based().size(&exon).unwrap(), 11);
        assert_eq!(CoordinateSystem::zero_based().size(&exon).unwrap(), 10);
    }

    #[test]
    fn test_as_one_based_moves_start_only() {
        let exon = Exon::new(10, 20).unwrap();
        let one = CoordinateSystem::zero_based().as_one_based(&exon);
        assert_eq!((one.start(), one.stop()), (11, 20));

        let same = CoordinateSystem::one_based().as_one_based(&exon);
        assert_eq!(same, exon);
    }

    #[test]
    fn test_empty_half_open_exon_as_one_based() {
        let empty = Exon::new(15, 15).unwrap();
        let one = CoordinateSystem::zero_based().as_one_based(&empty);
        assert_eq!((one.start(), one.stop()), (16, 15));
        assert_eq!(CoordinateSystem::one_based().size(&one).unwrap(), 0);
        assert_eq!(CoordinateSystem::one_based().as_zero_based(&one), empty);
    }

    #[test]
    fn test_as_zero_based_moves_start_only() {
        let exon = Exon::new(11, 20).unwrap();
        let zero = CoordinateSystem::one_based().as_zero_based(&exon);
        assert_eq!((zero.start(), zero.stop()), (10, 20));
        assert_eq!(CoordinateSystem::zero_based().as_zero_based(&exon), exon);
    }
}
