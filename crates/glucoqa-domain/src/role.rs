//! Role module - who is asking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Banner shown to healthcare professionals
const CLINICAL_BANNER: &str = "**🩺 Clinical Summary (Healthcare Professional view):**";

/// Banner shown to every other role
const GENERAL_BANNER: &str =
    "**ℹ️ General Information:** _Educational content. Discuss changes to your care with your healthcare team._";

/// Profile of the user asking a question
///
/// The core treats the role as an opaque label; it only selects the banner
/// placed in front of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Person living with diabetes
    #[default]
    Patient,

    /// Clinician or other care provider
    HealthcareProfessional,

    /// Family member or carer
    Caregiver,

    /// Learner
    Student,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 4] = [
        Role::Patient,
        Role::HealthcareProfessional,
        Role::Caregiver,
        Role::Student,
    ];

    /// Get the display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::HealthcareProfessional => "Healthcare Professional",
            Role::Caregiver => "Caregiver",
            Role::Student => "Student",
        }
    }

    /// Parse a role from a label (case-insensitive)
    ///
    /// Accepts the display label, its kebab-case form, and the short forms
    /// `hcp` and `professional`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "patient" => Some(Role::Patient),
            "healthcare professional" | "hcp" | "professional" => {
                Some(Role::HealthcareProfessional)
            }
            "caregiver" | "carer" => Some(Role::Caregiver),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    /// Banner line prepended to every answer given to this role
    pub fn banner(&self) -> &'static str {
        match self {
            Role::HealthcareProfessional => CLINICAL_BANNER,
            Role::Patient | Role::Caregiver | Role::Student => GENERAL_BANNER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}
