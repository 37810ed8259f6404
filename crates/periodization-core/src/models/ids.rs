// ABOUTME: Strongly typed identifiers for muscle groups, exercises, and workout sessions
// ABOUTME: Transparent i64 newtypes so ids of different entities cannot be mixed up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Users are identified by UUID, matching the surrounding application
pub type UserId = uuid::Uuid;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw integer value, as stored
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

integer_id!(
    /// Identifier of a muscle group in the static reference table
    MuscleGroupId
);

integer_id!(
    /// Identifier of an exercise in the exercise library
    ExerciseId
);

integer_id!(
    /// Identifier of a logged workout session
    SessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&MuscleGroupId(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: ExerciseId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, ExerciseId(12));
    }

    #[test]
    fn test_ids_parse_from_cli_strings() {
        assert_eq!(" 3 ".parse::<SessionId>().unwrap(), SessionId(3));
        assert!("chest".parse::<MuscleGroupId>().is_err());
    }
}
