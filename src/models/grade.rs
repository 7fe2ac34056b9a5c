//! Learner's self-assessed recall quality.
use crate::error::RepetitionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// Change applied to the card's ease before the interval is computed.
    pub fn ease_delta(self) -> i64 {
        match self {
            Grade::Again => -20,
            Grade::Hard => -15,
            Grade::Good => 0,
            Grade::Easy => 15,
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = RepetitionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Again),
            1 => Ok(Grade::Hard),
            2 => Ok(Grade::Good),
            3 => Ok(Grade::Easy),
            other => Err(RepetitionError::Validation(format!(
                "grade must be between 0 and 3, got {other}"
            ))),
        }
    }
}

impl FromStr for Grade {
    type Err = RepetitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "a" | "0" => Ok(Grade::Again),
            "hard" | "h" | "1" => Ok(Grade::Hard),
            "good" | "g" | "2" => Ok(Grade::Good),
            "easy" | "e" | "3" => Ok(Grade::Easy),
            _ => Err(RepetitionError::Validation(format!("unknown grade {s:?}"))),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_number() {
        assert_eq!(Grade::try_from(0).unwrap(), Grade::Again);
        assert_eq!(Grade::try_from(3).unwrap(), Grade::Easy);
        assert!(matches!(
            Grade::try_from(4),
            Err(RepetitionError::Validation(_))
        ));
    }

    #[test]
    fn test_grade_from_str() {
        assert_eq!("Good".parse::<Grade>().unwrap(), Grade::Good);
        assert_eq!(" h ".parse::<Grade>().unwrap(), Grade::Hard);
        assert_eq!("e".parse::<Grade>().unwrap(), Grade::Easy);
        assert!("perfect".parse::<Grade>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for grade in Grade::ALL {
            assert_eq!(grade.to_string().parse::<Grade>().unwrap(), grade);
        }
    }
}
