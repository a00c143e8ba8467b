//! Pet models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::derived::age_label;

/// Normalized species/category of a pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    SmallMammal,
    Reptile,
    Fish,
    Horse,
    /// Anything the normalizer could not place; keeps the user's wording.
    Other(String),
}

impl Species {
    /// Categories offered by the category picker, in display order.
    pub const PICKER: [Species; 8] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::SmallMammal,
        Species::Reptile,
        Species::Fish,
        Species::Horse,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Bird => "bird",
            Species::Rabbit => "rabbit",
            Species::SmallMammal => "small mammal",
            Species::Reptile => "reptile",
            Species::Fish => "fish",
            Species::Horse => "horse",
            Species::Other(name) => name,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Display picture of a pet: an uploaded photo or one of the stock avatars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Avatar {
    /// Session-local reference of an uploaded photo
    Photo { reference: String },
    /// Key of a bundled stock avatar (e.g. "dog-1")
    Stock { key: String },
}

/// Health status flag shown on dashboard cards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    #[default]
    Ok,
    /// A vaccination or treatment falls due within the expiring window
    Expiring,
    /// A vaccination or treatment is overdue
    Due,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Ok => "ok",
            PetStatus::Expiring => "expiring",
            PetStatus::Due => "due",
        }
    }
}

/// Validated pet fields, produced from a [`PetForm`] by the validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetDetails {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub microchip_number: String,
    pub weight_kg: Option<f64>,
    pub avatar: Avatar,
}

/// A registered pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// UUID, generated locally at creation
    pub id: String,
    /// Pet name
    pub name: String,
    /// Normalized species
    pub species: Species,
    /// Breed
    pub breed: Option<String>,
    pub gender: Gender,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Microchip number as entered
    pub microchip_number: String,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Photo or stock avatar
    pub avatar: Avatar,
    /// Derived age label ("2y 3m", "5m", "New"), computed against the date of the last refresh
    pub age_label: String,
    /// Derived health status
    pub status: PetStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Create a new pet from validated details.
    pub fn new(details: PetDetails, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let age_label = age_label(details.date_of_birth, today);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: details.name,
            species: details.species,
            breed: details.breed,
            gender: details.gender,
            date_of_birth: details.date_of_birth,
            microchip_number: details.microchip_number,
            weight_kg: details.weight_kg,
            avatar: details.avatar,
            age_label,
            status: PetStatus::Ok,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields from a profile edit.
    pub fn apply(&mut self, details: PetDetails, today: NaiveDate, now: DateTime<Utc>) {
        self.age_label = age_label(details.date_of_birth, today);
        self.name = details.name;
        self.species = details.species;
        self.breed = details.breed;
        self.gender = details.gender;
        self.date_of_birth = details.date_of_birth;
        self.microchip_number = details.microchip_number;
        self.weight_kg = details.weight_kg;
        self.avatar = details.avatar;
        self.updated_at = now;
    }
}

/// Working form state behind the pet intake/edit screen.
///
/// Fields hold raw user input; nothing here is trusted until it passes
/// [`crate::validation::validate_pet_form`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PetForm {
    /// Id of the pet being edited; `None` while registering a new pet
    pub editing: Option<String>,
    pub avatar: Option<Avatar>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: Option<Gender>,
    /// ISO date (`YYYY-MM-DD`)
    pub date_of_birth: String,
    pub microchip_number: String,
    pub weight_kg: Option<f64>,
}

impl PetForm {
    /// Blank registration form with the picked category pre-filled.
    pub fn for_species(species: &Species) -> Self {
        Self {
            species: species.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Hydrate the form from a stored pet, in edit mode.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            editing: Some(pet.id.clone()),
            avatar: Some(pet.avatar.clone()),
            name: pet.name.clone(),
            species: pet.species.as_str().to_string(),
            breed: pet.breed.clone().unwrap_or_default(),
            gender: Some(pet.gender),
            date_of_birth: pet.date_of_birth.format("%Y-%m-%d").to_string(),
            microchip_number: pet.microchip_number.clone(),
            weight_kg: pet.weight_kg,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}
