//! Named screens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown screen: {0}")]
pub struct UnknownScreen(pub String);

/// A named view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    SignIn,
    Pets,
    CategoryPicker,
    PetForm,
    Dashboard,
    MedicalRecords,
    VaccineDetails,
    TreatmentDetails,
    ExamDetails,
    Timeline,
    Documents,
    HealthMetrics,
}

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::SignIn,
        Screen::Pets,
        Screen::CategoryPicker,
        Screen::PetForm,
        Screen::Dashboard,
        Screen::MedicalRecords,
        Screen::VaccineDetails,
        Screen::TreatmentDetails,
        Screen::ExamDetails,
        Screen::Timeline,
        Screen::Documents,
        Screen::HealthMetrics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::SignIn => "sign-in",
            Screen::Pets => "pets",
            Screen::CategoryPicker => "category-picker",
            Screen::PetForm => "pet-form",
            Screen::Dashboard => "dashboard",
            Screen::MedicalRecords => "medical-records",
            Screen::VaccineDetails => "vaccine-details",
            Screen::TreatmentDetails => "treatment-details",
            Screen::ExamDetails => "exam-details",
            Screen::Timeline => "timeline",
            Screen::Documents => "documents",
            Screen::HealthMetrics => "health-metrics",
        }
    }

    /// Whether the screen shows data of the current pet.
    pub fn requires_pet(&self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::MedicalRecords
                | Screen::VaccineDetails
                | Screen::TreatmentDetails
                | Screen::ExamDetails
                | Screen::Timeline
                | Screen::Documents
                | Screen::HealthMetrics
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == wanted)
            .ok_or_else(|| UnknownScreen(wanted.to_string()))
    }
}
