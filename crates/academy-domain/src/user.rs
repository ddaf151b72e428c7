//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a stored or submitted string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Whether the account's email or phone has been proven by a confirmation code.
///
/// Transitions one way only: `Unconfirmed` → `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Unconfirmed,
    Confirmed,
}

impl AuthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
        }
    }
}

impl FromStr for AuthStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(Self::Unconfirmed),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(UnknownVariant {
                kind: "auth_status",
                value: s.to_owned(),
            }),
        }
    }
}

/// The contact channel the account registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    ViaEmail,
    ViaPhone,
}

impl AuthType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViaEmail => "via_email",
            Self::ViaPhone => "via_phone",
        }
    }
}

impl FromStr for AuthType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "via_email" => Ok(Self::ViaEmail),
            "via_phone" => Ok(Self::ViaPhone),
            _ => Err(UnknownVariant {
                kind: "auth_type",
                value: s.to_owned(),
            }),
        }
    }
}

/// Account permission level, ordered by privilege.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AuthRole {
    #[default]
    Student,
    Instructor,
    Admin,
}

impl AuthRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AuthRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownVariant {
                kind: "auth_role",
                value: s.to_owned(),
            }),
        }
    }
}
