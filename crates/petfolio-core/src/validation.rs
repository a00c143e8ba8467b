//! Form validation.
//!
//! Every screen that accepts input submits a raw form; the functions here turn
//! it into typed, trusted values or a list of field-level errors in display
//! order, so the shell can highlight each field and scroll to the first one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::derived::SpeciesNormalizer;
use crate::models::{
    ClinicalExam, ExamForm, MetricEntry, MetricForm, MetricKind, PetDetails, PetForm,
    RecordForm, RecordPayload, Treatment, TreatmentForm, TreatmentType, Vaccination,
    VaccinationForm,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Photo,
    Name,
    Species,
    DateOfBirth,
    Gender,
    Microchip,
    Weight,
    VaccineName,
    DateAdministered,
    ValidUntil,
    TreatmentType,
    ProductName,
    DateGiven,
    NextDue,
    ExamDate,
    Veterinarian,
    Vitals,
    MetricKind,
    MetricValue,
    RecordedOn,
    Email,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Photo => "photo",
            FormField::Name => "name",
            FormField::Species => "species",
            FormField::DateOfBirth => "date_of_birth",
            FormField::Gender => "gender",
            FormField::Microchip => "microchip",
            FormField::Weight => "weight",
            FormField::VaccineName => "vaccine_name",
            FormField::DateAdministered => "date_administered",
            FormField::ValidUntil => "valid_until",
            FormField::TreatmentType => "treatment_type",
            FormField::ProductName => "product_name",
            FormField::DateGiven => "date_given",
            FormField::NextDue => "next_due",
            FormField::ExamDate => "exam_date",
            FormField::Veterinarian => "veterinarian",
            FormField::Vitals => "vitals",
            FormField::MetricKind => "metric_kind",
            FormField::MetricValue => "metric_value",
            FormField::RecordedOn => "recorded_on",
            FormField::Email => "email",
        }
    }
}

/// A message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Field errors of one submission, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Field the form should scroll to.
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Validate the pet intake/edit form.
pub fn validate_pet_form(
    form: &PetForm,
    today: NaiveDate,
    normalizer: &SpeciesNormalizer,
) -> ValidationResult<PetDetails> {
    let mut errors = ValidationErrors::new();

    if form.avatar.is_none() {
        errors.push(FormField::Photo, "Add a photo or choose an avatar");
    }

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(FormField::Name, "Enter your pet's name");
    }

    if form.species.trim().is_empty() {
        errors.push(FormField::Species, "Choose a category");
    }

    let date_of_birth = required_date(&form.date_of_birth, FormField::DateOfBirth, &mut errors);
    if let Some(dob) = date_of_birth {
        if dob > today {
            errors.push(FormField::DateOfBirth, "Date of birth cannot be in the future");
        }
    }

    if form.gender.is_none() {
        errors.push(FormField::Gender, "Select a gender");
    }

    let microchip = form.microchip_number.trim();
    if microchip.is_empty() {
        errors.push(FormField::Microchip, "Enter the microchip number");
    }

    if let Some(weight) = form.weight_kg {
        if !weight.is_finite() || weight <= 0.0 {
            errors.push(FormField::Weight, "Weight must be greater than zero");
        }
    }

    // Each missing value pushed an error above, so a rejection always names a field.
    match (form.avatar.clone(), form.gender, date_of_birth) {
        (Some(avatar), Some(gender), Some(date_of_birth)) if errors.is_empty() => Ok(PetDetails {
            name: name.to_string(),
            species: normalizer.normalize(&form.species),
            breed: optional_text(&form.breed),
            gender,
            date_of_birth,
            microchip_number: microchip.to_string(),
            weight_kg: form.weight_kg,
            avatar,
        }),
        _ => Err(errors),
    }
}

/// Validate a record detail form.
pub fn validate_record_form(form: &RecordForm, today: NaiveDate) -> ValidationResult<RecordPayload> {
    match form {
        RecordForm::Vaccination(f) => validate_vaccination(f, today).map(RecordPayload::Vaccination),
        RecordForm::Treatment(f) => validate_treatment(f, today).map(RecordPayload::Treatment),
        RecordForm::Exam(f) => validate_exam(f, today).map(RecordPayload::Exam),
    }
}

fn validate_vaccination(form: &VaccinationForm, today: NaiveDate) -> ValidationResult<Vaccination> {
    let mut errors = ValidationErrors::new();

    let vaccine_name = form.vaccine_name.trim();
    if vaccine_name.is_empty() {
        errors.push(FormField::VaccineName, "Enter the vaccine name");
    }

    let administered = past_date(&form.date_administered, FormField::DateAdministered, today, &mut errors);
    let valid_until = optional_date(&form.valid_until, FormField::ValidUntil, &mut errors);
    if let (Some(given), Some(until)) = (administered, valid_until) {
        if until < given {
            errors.push(FormField::ValidUntil, "Expiry cannot be before the vaccination date");
        }
    }

    errors.into_result(|| Vaccination {
        vaccine_name: vaccine_name.to_string(),
        manufacturer: optional_text(&form.manufacturer),
        batch_number: optional_text(&form.batch_number),
        date_administered: administered.unwrap_or(today),
        valid_until,
        veterinarian: optional_text(&form.veterinarian),
        notes: optional_text(&form.notes),
        attachment_ids: form.attachment_ids.clone(),
    })
}

fn validate_treatment(form: &TreatmentForm, today: NaiveDate) -> ValidationResult<Treatment> {
    let mut errors = ValidationErrors::new();

    let treatment_type = if form.treatment_type.trim().is_empty() {
        errors.push(FormField::TreatmentType, "Select a treatment type");
        None
    } else {
        let parsed = TreatmentType::parse(&form.treatment_type);
        if parsed.is_none() {
            errors.push(FormField::TreatmentType, "Unknown treatment type");
        }
        parsed
    };

    let product_name = form.product_name.trim();
    if product_name.is_empty() {
        errors.push(FormField::ProductName, "Enter the product name");
    }

    let date_given = past_date(&form.date_given, FormField::DateGiven, today, &mut errors);
    let next_due = optional_date(&form.next_due, FormField::NextDue, &mut errors);
    if let (Some(given), Some(due)) = (date_given, next_due) {
        if due < given {
            errors.push(FormField::NextDue, "Next due date cannot be before the date given");
        }
    }

    errors.into_result(|| Treatment {
        treatment_type: treatment_type.unwrap_or(TreatmentType::Other),
        product_name: product_name.to_string(),
        dosage: optional_text(&form.dosage),
        date_given: date_given.unwrap_or(today),
        next_due,
        notes: optional_text(&form.notes),
    })
}

fn validate_exam(form: &ExamForm, today: NaiveDate) -> ValidationResult<ClinicalExam> {
    let mut errors = ValidationErrors::new();

    let exam_date = past_date(&form.exam_date, FormField::ExamDate, today, &mut errors);

    let veterinarian = form.veterinarian.trim();
    if veterinarian.is_empty() {
        errors.push(FormField::Veterinarian, "Enter the examining veterinarian");
    }

    let bad_float = |v: Option<f64>| v.is_some_and(|x| !x.is_finite() || x <= 0.0);
    let bad_rate = |v: Option<u32>| v == Some(0);
    if bad_float(form.weight_kg)
        || bad_float(form.temperature_c)
        || bad_rate(form.heart_rate_bpm)
        || bad_rate(form.respiratory_rate_bpm)
    {
        errors.push(FormField::Vitals, "Vitals must be greater than zero");
    }

    errors.into_result(|| ClinicalExam {
        exam_date: exam_date.unwrap_or(today),
        veterinarian: veterinarian.to_string(),
        clinic: optional_text(&form.clinic),
        weight_kg: form.weight_kg,
        temperature_c: form.temperature_c,
        heart_rate_bpm: form.heart_rate_bpm,
        respiratory_rate_bpm: form.respiratory_rate_bpm,
        declarations: form
            .declarations
            .iter()
            .filter_map(|d| optional_text(d))
            .collect(),
        notes: optional_text(&form.notes),
    })
}

/// Validate a health metric entry.
pub fn validate_metric_form(form: &MetricForm, today: NaiveDate) -> ValidationResult<MetricEntry> {
    let mut errors = ValidationErrors::new();

    let kind = MetricKind::parse(&form.kind);
    if kind.is_none() {
        errors.push(FormField::MetricKind, "Select what you are measuring");
    }

    match form.value {
        Some(v) if v.is_finite() && v > 0.0 => {}
        Some(_) => errors.push(FormField::MetricValue, "Value must be greater than zero"),
        None => errors.push(FormField::MetricValue, "Enter a value"),
    }

    let recorded_on = past_date(&form.recorded_on, FormField::RecordedOn, today, &mut errors);

    errors.into_result(|| {
        let kind = kind.unwrap_or(MetricKind::Other);
        let unit = optional_text(&form.unit).unwrap_or_else(|| kind.default_unit().to_string());
        MetricEntry {
            kind,
            value: form.value.unwrap_or_default(),
            unit,
            recorded_on: recorded_on.unwrap_or(today),
            note: optional_text(&form.note),
        }
    })
}

/// Validate the email used for the simulated sign-in.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let mut errors = ValidationErrors::new();
    let email = email.trim();
    if email.is_empty() {
        errors.push(FormField::Email, "Enter your email");
    } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.push(FormField::Email, "Enter a valid email");
    }
    errors.into_result(|| email.to_lowercase())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_date(raw: &str, field: FormField, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(field, "Enter a date");
        return None;
    }
    parse_date(raw, field, errors)
}

/// Required date that may not lie after `today`.
fn past_date(
    raw: &str,
    field: FormField,
    today: NaiveDate,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let date = required_date(raw, field, errors)?;
    if date > today {
        errors.push(field, "Date cannot be in the future");
        return None;
    }
    Some(date)
}

fn optional_date(raw: &str, field: FormField, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        None
    } else {
        parse_date(raw, field, errors)
    }
}

fn parse_date(raw: &str, field: FormField, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "Enter a valid date (YYYY-MM-DD)");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Avatar, Gender, Species};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_form() -> PetForm {
        PetForm {
            editing: None,
            avatar: Some(Avatar::Stock { key: "cat-1".into() }),
            name: " Miso ".into(),
            species: "kitten".into(),
            breed: "".into(),
            gender: Some(Gender::Female),
            date_of_birth: "2023-01-20".into(),
            microchip_number: "985000000000001".into(),
            weight_kg: Some(3.9),
        }
    }

    #[test]
    fn test_valid_pet_form() {
        let details = validate_pet_form(&filled_form(), today(), &SpeciesNormalizer::new()).unwrap();
        assert_eq!(details.name, "Miso");
        assert_eq!(details.species, Species::Cat);
        assert_eq!(details.breed, None);
        assert_eq!(details.date_of_birth, NaiveDate::from_ymd_opt(2023, 1, 20).unwrap());
    }

    #[test]
    fn test_empty_required_fields_all_reported() {
        let form = PetForm {
            species: "dog".into(),
            ..PetForm::default()
        };
        let errors = validate_pet_form(&form, today(), &SpeciesNormalizer::new()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                FormField::Photo,
                FormField::Name,
                FormField::DateOfBirth,
                FormField::Gender,
                FormField::Microchip,
            ]
        );
        assert_eq!(errors.first().unwrap().field, FormField::Photo);
    }

    #[test]
    fn test_future_date_of_birth() {
        let form = PetForm {
            date_of_birth: "2024-06-16".into(),
            ..filled_form()
        };
        let errors = validate_pet_form(&form, today(), &SpeciesNormalizer::new()).unwrap_err();
        assert_eq!(
            errors.get(FormField::DateOfBirth),
            Some("Date of birth cannot be in the future")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_rejection_always_names_a_field() {
        let normalizer = SpeciesNormalizer::new();
        let missing = [
            (PetForm { avatar: None, ..filled_form() }, FormField::Photo),
            (PetForm { gender: None, ..filled_form() }, FormField::Gender),
            (PetForm { date_of_birth: " ".into(), ..filled_form() }, FormField::DateOfBirth),
        ];

        for (form, field) in missing {
            let errors = validate_pet_form(&form, today(), &normalizer).unwrap_err();
            assert_eq!(errors.fields(), vec![field]);
            assert!(errors.first().is_some());
        }
    }

    #[test]
    fn test_malformed_date_of_birth() {
        let form = PetForm {
            date_of_birth: "20/01/2023".into(),
            ..filled_form()
        };
        let errors = validate_pet_form(&form, today(), &SpeciesNormalizer::new()).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::DateOfBirth]);
    }

    #[test]
    fn test_vaccination_requires_name_and_date() {
        let form = RecordForm::Vaccination(VaccinationForm::default());
        let errors = validate_record_form(&form, today()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![FormField::VaccineName, FormField::DateAdministered]
        );
    }

    #[test]
    fn test_vaccination_expiry_before_given() {
        let form = RecordForm::Vaccination(VaccinationForm {
            vaccine_name: "DHPP".into(),
            date_administered: "2024-05-01".into(),
            valid_until: "2024-04-01".into(),
            ..VaccinationForm::default()
        });
        let errors = validate_record_form(&form, today()).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::ValidUntil]);
    }

    #[test]
    fn test_valid_treatment() {
        let form = RecordForm::Treatment(TreatmentForm {
            treatment_type: "Tick".into(),
            product_name: "Bravecto".into(),
            date_given: "2024-06-01".into(),
            next_due: "2024-09-01".into(),
            ..TreatmentForm::default()
        });
        match validate_record_form(&form, today()).unwrap() {
            RecordPayload::Treatment(t) => {
                assert_eq!(t.treatment_type, TreatmentType::Tick);
                assert_eq!(t.dosage, None);
                assert_eq!(t.next_due, NaiveDate::from_ymd_opt(2024, 9, 1));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_exam_rejects_zero_vitals() {
        let form = RecordForm::Exam(ExamForm {
            exam_date: "2024-06-01".into(),
            veterinarian: "Dr. Okafor".into(),
            heart_rate_bpm: Some(0),
            ..ExamForm::default()
        });
        let errors = validate_record_form(&form, today()).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::Vitals]);
    }

    #[test]
    fn test_exam_drops_blank_declarations() {
        let form = RecordForm::Exam(ExamForm {
            exam_date: "2024-06-01".into(),
            veterinarian: "Dr. Okafor".into(),
            declarations: vec!["fit to travel".into(), "  ".into()],
            ..ExamForm::default()
        });
        match validate_record_form(&form, today()).unwrap() {
            RecordPayload::Exam(exam) => assert_eq!(exam.declarations, vec!["fit to travel"]),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_metric_defaults_unit() {
        let form = MetricForm {
            kind: "weight".into(),
            value: Some(12.3),
            recorded_on: "2024-06-15".into(),
            ..MetricForm::default()
        };
        let entry = validate_metric_form(&form, today()).unwrap();
        assert_eq!(entry.unit, "kg");
        assert_eq!(entry.kind, MetricKind::Weight);
    }

    #[test]
    fn test_metric_rejects_future_and_missing_value() {
        let form = MetricForm {
            kind: "weight".into(),
            value: None,
            recorded_on: "2024-07-01".into(),
            ..MetricForm::default()
        };
        let errors = validate_metric_form(&form, today()).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::MetricValue, FormField::RecordedOn]);
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_email(" Sam@Example.com ").unwrap(), "sam@example.com");
        assert!(validate_email("").is_err());
        assert!(validate_email("nobody").is_err());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(FormField::Name, "Enter your pet's name");
        errors.push(FormField::Gender, "Select a gender");
        assert_eq!(
            errors.to_string(),
            "name: Enter your pet's name; gender: Select a gender"
        );
    }
}
