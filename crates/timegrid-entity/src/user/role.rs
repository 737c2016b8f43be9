//! User role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use timegrid_core::AppError;

/// Roles available in the scheduling platform.
///
/// The backend serializes roles UPPERCASE (`"ADMIN"`); parsing is
/// case-insensitive and comparisons happen on the enum, so casing on the
/// wire never leaks into authorization decisions. `Superadmin` passes every
/// role-gated route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserRole {
    /// Cross-organization platform operator.
    Superadmin,
    /// Organization administrator.
    Admin,
    /// Curriculum planner; manages catalogs and schedule generation.
    Methodist,
    /// Teaching staff; manages their own schedule entries.
    Teacher,
    /// Enrolled student; read-only schedule access.
    Student,
}

impl UserRole {
    /// Whether this role is an organization admin (or above).
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// Whether this role is the platform superadmin.
    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Whether this role can curate catalogs (methodist or admin).
    pub fn is_methodist(&self) -> bool {
        matches!(self, Self::Methodist) || self.is_admin()
    }

    /// Whether this role can create and edit schedule entries.
    pub fn can_manage_schedule(&self) -> bool {
        self.is_methodist() || matches!(self, Self::Teacher)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Methodist => "methodist",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Return the role in the backend's UPPERCASE wire form.
    pub fn wire_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "SUPERADMIN",
            Self::Admin => "ADMIN",
            Self::Methodist => "METHODIST",
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "superadmin" => Ok(Self::Superadmin),
            "admin" => Ok(Self::Admin),
            "methodist" => Ok(Self::Methodist),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: superadmin, admin, methodist, teacher, student"
            ))),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.wire_str().to_string()
    }
}
