use crate::models::{MetricForm, PetForm, RecordForm, RecordKind};
use crate::nav::Screen;

/// Everything a view can ask the controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Simulated sign-in; succeeds for any well-formed email.
    SignIn { email: String },
    SignOut,
    /// Push a screen.
    Navigate(Screen),
    /// Pop the current screen.
    Back,
    /// Swap the current screen.
    Replace(Screen),
    /// Open the category picker with a blank pet form.
    StartRegistration,
    /// User picked (or typed) a category in the picker.
    ChooseCategory(String),
    /// Pet intake or profile edit submitted.
    SubmitPetForm(PetForm),
    SelectPet(String),
    /// Open the pet form on the current pet's profile.
    EditCurrentPet,
    DeletePet(String),
    /// Open the detail form of a record kind.
    OpenRecordForm(RecordKind),
    SaveRecord(RecordForm),
    AttachFile {
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
        context: String,
    },
    RemoveUpload(String),
    LogMetric(MetricForm),
    /// Recompute age labels and status flags against today's date.
    RefreshDerived,
}
