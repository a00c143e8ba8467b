use crate::models::{Pet, PetForm};
use crate::nav::NavStack;
use crate::store::Store;
use crate::validation::ValidationErrors;

/// Everything the controller owns. Views only ever see it through
/// [`View`](super::View) values.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) store: Store,
    pub(crate) nav: NavStack,
    /// Pet new records are attributed to
    pub(crate) current_pet: Option<String>,
    /// Working state of the pet intake/edit form
    pub(crate) pet_form: PetForm,
    /// Errors of the last rejected pet form submission
    pub(crate) form_errors: ValidationErrors,
    pub(crate) signed_in_as: Option<String>,
}

impl AppState {
    pub(crate) fn new(nav: NavStack) -> Self {
        Self {
            store: Store::new(),
            nav,
            current_pet: None,
            pet_form: PetForm::default(),
            form_errors: ValidationErrors::new(),
            signed_in_as: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn nav(&self) -> &NavStack {
        &self.nav
    }

    pub fn current_pet_id(&self) -> Option<&str> {
        self.current_pet.as_deref()
    }

    pub fn current_pet(&self) -> Option<&Pet> {
        self.current_pet
            .as_deref()
            .and_then(|id| self.store.get_pet(id))
    }

    pub fn pet_form(&self) -> &PetForm {
        &self.pet_form
    }

    pub fn form_errors(&self) -> &ValidationErrors {
        &self.form_errors
    }

    pub fn signed_in_as(&self) -> Option<&str> {
        self.signed_in_as.as_deref()
    }
}
