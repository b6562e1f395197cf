//! Display fields derived from a person record
//!
//! The person card shows initials when there is no photo, a lifespan line and
//! a gender-tinted border. These are computed once here so every renderer
//! shows the same thing.

use serde::Serialize;

use crate::core::Person;

/// Card tint category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderClass {
    Male,
    Female,
    #[default]
    Unknown,
}

impl GenderClass {
    pub fn from_gender(gender: Option<&str>) -> Self {
        match gender.map(|g| g.trim().to_lowercase()).as_deref() {
            Some("male") => GenderClass::Male,
            Some("female") => GenderClass::Female,
            _ => GenderClass::Unknown,
        }
    }
}

/// Up to two uppercase initials: first and last name part
pub fn initials(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    let first_letter = |part: &str| part.chars().next().into_iter().flat_map(char::to_uppercase);

    match parts.as_slice() {
        [] => String::new(),
        [only] => first_letter(*only).collect(),
        [first, .., last] => first_letter(*first).chain(first_letter(*last)).collect(),
    }
}

/// Leading four-digit year of a date string, or the whole string
pub fn year_of(date: &str) -> &str {
    let date = date.trim();
    match date.get(..4) {
        Some(year) if year.chars().all(|c| c.is_ascii_digit()) => year,
        _ => date,
    }
}

/// `"1920 - 2005"`, `"? - 2005"`, `"1945 - Present"`; `None` without dates
pub fn lifespan(birth_date: Option<&str>, death_date: Option<&str>) -> Option<String> {
    let birth_date = birth_date.filter(|d| !d.trim().is_empty());
    let death_date = death_date.filter(|d| !d.trim().is_empty());
    if birth_date.is_none() && death_date.is_none() {
        return None;
    }

    Some(format!(
        "{} - {}",
        birth_date.map(year_of).unwrap_or("?"),
        death_date.map(year_of).unwrap_or("Present")
    ))
}

/// Display data carried on every node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonData {
    pub full_name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub photos: Vec<String>,
    pub initials: String,
    pub lifespan: Option<String>,
    /// First photo, if any
    pub avatar: Option<String>,
    pub gender_class: GenderClass,
}

impl From<&Person> for PersonData {
    fn from(person: &Person) -> Self {
        Self {
            full_name: person.full_name.clone(),
            given_name: person.given_name.clone(),
            family_name: person.family_name.clone(),
            gender: person.gender.clone(),
            birth_date: person.birth_date.clone(),
            death_date: person.death_date.clone(),
            photos: person.photos.clone(),
            initials: initials(&person.full_name),
            lifespan: lifespan(person.birth_date.as_deref(), person.death_date.as_deref()),
            avatar: person.photos.first().cloned(),
            gender_class: GenderClass::from_gender(person.gender.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("William Smith"), "WS");
        assert_eq!(initials("Mary Ann van der Berg"), "MB");
        assert_eq!(initials("cher"), "C");
        assert_eq!(initials("   "), "");
        assert_eq!(initials("élodie ødegaard"), "ÉØ");
    }

    #[test]
    fn test_lifespan() {
        assert_eq!(
            lifespan(Some("1920-05-15"), Some("2005-08-22")).as_deref(),
            Some("1920 - 2005")
        );
        assert_eq!(lifespan(Some("1945-07-20"), None).as_deref(), Some("1945 - Present"));
        assert_eq!(lifespan(None, Some("2010")).as_deref(), Some("? - 2010"));
        assert_eq!(lifespan(None, None), None);
        assert_eq!(lifespan(Some(""), None), None);
    }

    #[test]
    fn test_year_of_keeps_unusual_dates() {
        assert_eq!(year_of("circa 1800"), "circa 1800");
        assert_eq!(year_of("1799"), "1799");
    }

    #[test]
    fn test_gender_class() {
        assert_eq!(GenderClass::from_gender(Some("male")), GenderClass::Male);
        assert_eq!(GenderClass::from_gender(Some("Female")), GenderClass::Female);
        assert_eq!(GenderClass::from_gender(Some("other")), GenderClass::Unknown);
        assert_eq!(GenderClass::from_gender(None), GenderClass::Unknown);
    }

    #[test]
    fn test_person_data_from_person() {
        let person = Person::new("p1", "Emily Smith")
            .with_gender("female")
            .with_birth_date("1995-06-12")
            .with_photo("https://example.org/a.jpg")
            .with_photo("https://example.org/b.jpg");
        let data = PersonData::from(&person);

        assert_eq!(data.initials, "ES");
        assert_eq!(data.lifespan.as_deref(), Some("1995 - Present"));
        assert_eq!(data.avatar.as_deref(), Some("https://example.org/a.jpg"));
        assert_eq!(data.gender_class, GenderClass::Female);
        assert_eq!(data.photos.len(), 2);
    }
}
