//! In-memory entity collections.
//!
//! Every collection lives for the lifetime of the [`Store`]; nothing is
//! written anywhere else.

mod metrics;
mod pets;
mod records;
mod uploads;

pub use pets::DeletedPet;

use thiserror::Error;

use crate::models::{ExamRecord, HealthMetric, Pet, TreatmentRecord, UploadedFile, VaccinationRecord};

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Pet not found: {0}")]
    PetNotFound(String),

    #[error("Upload not found: {0}")]
    UploadNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Authoritative collections for pets and everything they own.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pets: Vec<Pet>,
    vaccinations: Vec<VaccinationRecord>,
    treatments: Vec<TreatmentRecord>,
    exams: Vec<ExamRecord>,
    uploads: Vec<UploadedFile>,
    metrics: Vec<HealthMetric>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail unless a pet with `pet_id` exists.
    pub fn require_pet(&self, pet_id: &str) -> StoreResult<()> {
        if self.pets.iter().any(|p| p.id == pet_id) {
            Ok(())
        } else {
            Err(StoreError::PetNotFound(pet_id.to_string()))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.list_pets().is_empty());
        assert_eq!(store.pet_count(), 0);
    }

    #[test]
    fn test_require_pet() {
        let mut store = Store::new();
        let pet = fixtures::make_pet("Luna");
        let id = pet.id.clone();
        store.insert_pet(pet);

        assert!(store.require_pet(&id).is_ok());
        assert_eq!(
            store.require_pet("missing"),
            Err(StoreError::PetNotFound("missing".into()))
        );
    }
}
