//! Property tests for age labels and identifiers.

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};
use petfolio_core::derived::{age_label, Age};
use petfolio_core::models::{Avatar, Gender, Pet, PetDetails, Species};
use proptest::prelude::*;

fn details(dob: NaiveDate) -> PetDetails {
    PetDetails {
        name: "Pip".into(),
        species: Species::Rabbit,
        breed: None,
        gender: Gender::Male,
        date_of_birth: dob,
        microchip_number: "250268500000001".into(),
        weight_kg: None,
        avatar: Avatar::Stock { key: "rabbit-1".into() },
    }
}

fn expected_label(months: u32) -> String {
    let (y, m) = (months / 12, months % 12);
    match (y, m) {
        (0, 0) => "New".to_string(),
        (0, m) => format!("{}m", m),
        (y, 0) => format!("{}y", y),
        (y, m) => format!("{}y {}m", y, m),
    }
}

proptest! {
    #[test]
    fn test_whole_months_ago(
        days in 0i64..20_000,
        months in 0u32..400,
    ) {
        let today = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
        // Day 28 or earlier survives month arithmetic unchanged.
        let today = today.with_day0(today.day0().min(27)).unwrap();
        let dob = today.checked_sub_months(Months::new(months)).unwrap();

        let age = Age::between(dob, today);
        prop_assert_eq!(age.total_months(), months);
        prop_assert_eq!(age_label(dob, today), expected_label(months));
    }

    #[test]
    fn test_born_today_is_new(days in 0i64..20_000) {
        let today = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
        prop_assert_eq!(age_label(today, today), "New");
    }

    #[test]
    fn test_day_before_monthiversary(months in 1u32..400) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let dob = today.checked_sub_months(Months::new(months)).unwrap() + chrono::Duration::days(1);
        prop_assert_eq!(Age::between(dob, today).total_months(), months - 1);
    }
}

#[test]
fn test_new_pets_get_unique_ids() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let ids: HashSet<String> = (0..500)
        .map(|_| Pet::new(details(today), today, chrono::Utc::now()).id)
        .collect();
    assert_eq!(ids.len(), 500);
}
