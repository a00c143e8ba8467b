//! Pet collection operations.

use chrono::{DateTime, NaiveDate, Utc};

use super::{Store, StoreError, StoreResult};
use crate::models::{Pet, PetDetails, PetStatus};

/// Everything removed by a cascading pet delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedPet {
    pub pet: Pet,
    /// Vaccinations, treatments and exams removed
    pub records_removed: usize,
    pub metrics_removed: usize,
    /// Upload references the shell may now release
    pub released_references: Vec<String>,
}

impl Store {
    /// Append a pet.
    pub fn insert_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// Get a pet by ID.
    pub fn get_pet(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == id)
    }

    /// All pets in registration order.
    pub fn list_pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }

    /// Apply a profile edit.
    pub fn update_pet(
        &mut self,
        id: &str,
        details: PetDetails,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> StoreResult<&Pet> {
        let pet = self
            .pets
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PetNotFound(id.to_string()))?;
        pet.apply(details, today, now);
        Ok(pet)
    }

    /// Overwrite the derived fields of a pet.
    pub fn set_derived(&mut self, id: &str, age_label: String, status: PetStatus) -> StoreResult<()> {
        let pet = self
            .pets
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PetNotFound(id.to_string()))?;
        pet.age_label = age_label;
        pet.status = status;
        Ok(())
    }

    /// Remove a pet and everything it owns.
    pub fn delete_pet(&mut self, id: &str) -> StoreResult<DeletedPet> {
        let index = self
            .pets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::PetNotFound(id.to_string()))?;
        let pet = self.pets.remove(index);

        let before = self.vaccinations.len() + self.treatments.len() + self.exams.len();
        self.vaccinations.retain(|r| r.pet_id != id);
        self.treatments.retain(|r| r.pet_id != id);
        self.exams.retain(|r| r.pet_id != id);
        let records_removed = before - (self.vaccinations.len() + self.treatments.len() + self.exams.len());

        let metrics_before = self.metrics.len();
        self.metrics.retain(|m| m.pet_id != id);
        let metrics_removed = metrics_before - self.metrics.len();

        let (released, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.uploads).into_iter().partition(|u| u.pet_id == id);
        self.uploads = kept;

        Ok(DeletedPet {
            pet,
            records_removed,
            metrics_removed,
            released_references: released.into_iter().map(|u| u.reference).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Species};
    use crate::store::fixtures::{make_pet, today};

    #[test]
    fn test_insert_appends() {
        let mut store = Store::new();
        store.insert_pet(make_pet("Luna"));
        store.insert_pet(make_pet("Milo"));

        let names: Vec<_> = store.list_pets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Luna", "Milo"]);
        assert_ne!(store.list_pets()[0].id, store.list_pets()[1].id);
    }

    #[test]
    fn test_update_pet() {
        let mut store = Store::new();
        let pet = make_pet("Luna");
        let id = pet.id.clone();
        store.insert_pet(pet);

        let details = PetDetails {
            name: "Luna Belle".into(),
            species: Species::Cat,
            breed: Some("Siamese".into()),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            microchip_number: "123".into(),
            weight_kg: Some(4.2),
            avatar: crate::models::Avatar::Stock { key: "cat-2".into() },
        };
        let updated = store.update_pet(&id, details, today(), Utc::now()).unwrap();
        assert_eq!(updated.name, "Luna Belle");
        assert_eq!(updated.age_label, "5m");
    }

    #[test]
    fn test_update_missing_pet() {
        let mut store = Store::new();
        let details = PetDetails {
            name: "Ghost".into(),
            species: Species::Dog,
            breed: None,
            gender: Gender::Male,
            date_of_birth: today(),
            microchip_number: "1".into(),
            weight_kg: None,
            avatar: crate::models::Avatar::Stock { key: "dog-1".into() },
        };
        let result = store.update_pet("nope", details, today(), Utc::now());
        assert!(matches!(result, Err(StoreError::PetNotFound(_))));
    }

    #[test]
    fn test_delete_missing_pet() {
        let mut store = Store::new();
        assert_eq!(
            store.delete_pet("nope"),
            Err(StoreError::PetNotFound("nope".into()))
        );
    }
}
