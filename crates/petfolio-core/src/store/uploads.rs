//! Uploaded file collection operations.

use super::{Store, StoreError, StoreResult};
use crate::models::UploadedFile;

impl Store {
    /// Append an upload for an existing pet.
    pub fn add_upload(&mut self, file: UploadedFile) -> StoreResult<()> {
        self.require_pet(&file.pet_id)?;
        self.uploads.push(file);
        Ok(())
    }

    /// Remove an upload by ID, returning it so its reference can be released.
    ///
    /// Vaccinations that listed it as an attachment stop referencing it.
    pub fn remove_upload(&mut self, id: &str) -> StoreResult<UploadedFile> {
        let index = self
            .uploads
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| StoreError::UploadNotFound(id.to_string()))?;
        self.detach_upload(id);
        Ok(self.uploads.remove(index))
    }

    pub fn get_upload(&self, id: &str) -> Option<&UploadedFile> {
        self.uploads.iter().find(|u| u.id == id)
    }

    pub fn uploads_for(&self, pet_id: &str) -> Vec<&UploadedFile> {
        self.uploads.iter().filter(|u| u.pet_id == pet_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::make_pet;
    use chrono::Utc;

    fn upload(pet_id: &str) -> UploadedFile {
        UploadedFile::new(
            pet_id.into(),
            "passport.jpg".into(),
            "image/jpeg".into(),
            &[0xFF, 0xD8, 0xFF],
            "passport".into(),
            "blob:petfolio",
            Utc::now(),
        )
    }

    #[test]
    fn test_add_and_remove_upload() {
        let mut store = Store::new();
        let pet = make_pet("Luna");
        let pet_id = pet.id.clone();
        store.insert_pet(pet);

        let file = upload(&pet_id);
        let id = file.id.clone();
        store.add_upload(file).unwrap();
        assert_eq!(store.uploads_for(&pet_id).len(), 1);
        assert!(store.get_upload(&id).is_some());

        let removed = store.remove_upload(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.uploads_for(&pet_id).is_empty());
    }

    #[test]
    fn test_remove_unknown_upload() {
        let mut store = Store::new();
        assert_eq!(
            store.remove_upload("nope"),
            Err(StoreError::UploadNotFound("nope".into()))
        );
    }

    #[test]
    fn test_upload_requires_pet() {
        let mut store = Store::new();
        assert!(matches!(
            store.add_upload(upload("ghost")),
            Err(StoreError::PetNotFound(_))
        ));
    }

    #[test]
    fn test_delete_pet_releases_uploads() {
        let mut store = Store::new();
        let pet = make_pet("Luna");
        let other = make_pet("Milo");
        let (pet_id, other_id) = (pet.id.clone(), other.id.clone());
        store.insert_pet(pet);
        store.insert_pet(other);

        let file = upload(&pet_id);
        let reference = file.reference.clone();
        store.add_upload(file).unwrap();
        store.add_upload(upload(&other_id)).unwrap();

        let deleted = store.delete_pet(&pet_id).unwrap();
        assert_eq!(deleted.released_references, vec![reference]);
        assert_eq!(store.uploads_for(&other_id).len(), 1);
    }
}
