//! Categorical attribute encoding tables.
//!
//! Maps the demographic form labels to the small integer codes that get
//! split into shares. The tables are a fixed contract shared with the
//! backends that recombine shares: changing a code changes the meaning
//! of every stored share.

/// Reserved code for an unknown or unmapped category label.
///
/// Distinct from every valid code so that "unset" survives splitting
/// and recombination like any other value.
pub const CODE_UNKNOWN: i64 = -1;

/// Gender categories with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Code 0.
    Male,
    /// Code 1.
    Female,
    /// Code 2.
    NonBinary,
}

impl Gender {
    /// Parse a form label into a gender category.
    ///
    /// # Arguments
    /// * `label` - The exact form label (e.g. `"Non-binary"`).
    ///
    /// # Returns
    /// `Some(Gender)` for a listed label, `None` otherwise.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Non-binary" => Some(Self::NonBinary),
            _ => None,
        }
    }

    /// Returns the integer code used in share payloads.
    pub fn code(&self) -> i64 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::NonBinary => 2,
        }
    }

    /// Returns the canonical form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Age brackets with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    /// Code 0.
    Under18,
    /// Code 1.
    From18To25,
    /// Code 2.
    From26To40,
    /// Code 3.
    From41To60,
    /// Code 4.
    Over60,
}

impl AgeBracket {
    /// Parse a form label into an age bracket.
    ///
    /// # Arguments
    /// * `label` - The exact form label (e.g. `"26-40"`).
    ///
    /// # Returns
    /// `Some(AgeBracket)` for a listed label, `None` otherwise.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Under 18" => Some(Self::Under18),
            "18-25" => Some(Self::From18To25),
            "26-40" => Some(Self::From26To40),
            "41-60" => Some(Self::From41To60),
            "60+" => Some(Self::Over60),
            _ => None,
        }
    }

    /// Returns the integer code used in share payloads.
    pub fn code(&self) -> i64 {
        match self {
            Self::Under18 => 0,
            Self::From18To25 => 1,
            Self::From26To40 => 2,
            Self::From41To60 => 3,
            Self::Over60 => 4,
        }
    }

    /// Returns the canonical form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under18 => "Under 18",
            Self::From18To25 => "18-25",
            Self::From26To40 => "26-40",
            Self::From41To60 => "41-60",
            Self::Over60 => "60+",
        }
    }
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Encode a gender label to its wire code.
///
/// Total over all inputs: unlisted labels encode to [`CODE_UNKNOWN`].
///
/// # Arguments
/// * `label` - The form label.
///
/// # Returns
/// The code 0-2, or -1 for an unknown label.
pub fn encode_gender(label: &str) -> i64 {
    Gender::from_label(label).map_or(CODE_UNKNOWN, |g| g.code())
}

/// Encode an age bracket label to its wire code.
///
/// Total over all inputs: unlisted labels encode to [`CODE_UNKNOWN`].
///
/// # Arguments
/// * `label` - The form label.
///
/// # Returns
/// The code 0-4, or -1 for an unknown label.
pub fn encode_age_bracket(label: &str) -> i64 {
    AgeBracket::from_label(label).map_or(CODE_UNKNOWN, |a| a.code())
}

/// Encode a disability flag label to its wire code.
///
/// `"Yes"` encodes to 1; every other label (including unset) encodes to 0.
///
/// # Arguments
/// * `label` - The form label.
///
/// # Returns
/// 1 for `"Yes"`, 0 otherwise.
pub fn encode_disability(label: &str) -> i64 {
    if label == "Yes" {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        assert_eq!(encode_gender("Male"), 0);
        assert_eq!(encode_gender("Female"), 1);
        assert_eq!(encode_gender("Non-binary"), 2);
    }

    #[test]
    fn test_unknown_gender_is_sentinel() {
        assert_eq!(encode_gender("Unknown"), -1);
        assert_eq!(encode_gender(""), -1);
        assert_eq!(encode_gender("male"), -1); // labels are case-sensitive
    }

    #[test]
    fn test_age_codes() {
        assert_eq!(encode_age_bracket("Under 18"), 0);
        assert_eq!(encode_age_bracket("18-25"), 1);
        assert_eq!(encode_age_bracket("26-40"), 2);
        assert_eq!(encode_age_bracket("41-60"), 3);
        assert_eq!(encode_age_bracket("60+"), 4);
    }

    #[test]
    fn test_unknown_age_is_sentinel() {
        assert_eq!(encode_age_bracket("100+"), -1);
        assert_eq!(encode_age_bracket(""), -1);
        assert_eq!(encode_age_bracket("18 - 25"), -1);
    }

    #[test]
    fn test_disability_codes() {
        assert_eq!(encode_disability("Yes"), 1);
        assert_eq!(encode_disability("No"), 0);
        assert_eq!(encode_disability("Prefer not to say"), 0);
        assert_eq!(encode_disability(""), 0);
    }

    #[test]
    fn test_labels_round_trip() {
        for g in [Gender::Male, Gender::Female, Gender::NonBinary] {
            assert_eq!(Gender::from_label(g.label()), Some(g));
            assert_eq!(encode_gender(g.label()), g.code());
        }
        for a in [
            AgeBracket::Under18,
            AgeBracket::From18To25,
            AgeBracket::From26To40,
            AgeBracket::From41To60,
            AgeBracket::Over60,
        ] {
            assert_eq!(AgeBracket::from_label(a.label()), Some(a));
            assert_eq!(encode_age_bracket(a.label()), a.code());
        }
    }

    #[test]
    fn test_sentinel_is_outside_every_table() {
        let gender_codes: Vec<i64> = [Gender::Male, Gender::Female, Gender::NonBinary]
            .iter()
            .map(|g| g.code())
            .collect();
        assert!(!gender_codes.contains(&CODE_UNKNOWN));

        let age_codes: Vec<i64> = [
            AgeBracket::Under18,
            AgeBracket::From18To25,
            AgeBracket::From26To40,
            AgeBracket::From41To60,
            AgeBracket::Over60,
        ]
        .iter()
        .map(|a| a.code())
        .collect();
        assert!(!age_codes.contains(&CODE_UNKNOWN));
    }
}
