//! Structural validation of the people feed.
//!
//! The feed is untrusted JSON. [`validate`] walks it by hand so that every
//! problem is reported with its path (`[1].pets[0].name`) instead of stopping
//! at the first one, and so that malformed input can never panic.

use crate::domain::model::{Gender, PeopleList, Person, Pet};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks that `raw` is a list of people and converts it into typed records.
///
/// Unknown fields are ignored. A `pets` value that is absent or `null`
/// becomes an empty list.
pub fn validate(raw: &Value) -> Result<PeopleList, ValidationError> {
    let items = match raw {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::new(vec![ValidationIssue::new(
                "",
                format!("expected array, got {}", json_type(other)),
            )]))
        }
    };

    let mut issues = Vec::new();
    let mut people = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if let Some(person) = validate_person(&format!("[{}]", index), item, &mut issues) {
            people.push(person);
        }
    }

    if issues.is_empty() {
        tracing::debug!("Validated {} people", people.len());
        Ok(people)
    } else {
        tracing::debug!("Feed rejected with {} issue(s)", issues.len());
        Err(ValidationError::new(issues))
    }
}

fn validate_person(path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) -> Option<Person> {
    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            issues.push(ValidationIssue::new(
                path,
                format!("expected object, got {}", json_type(other)),
            ));
            return None;
        }
    };

    let name = required_str(obj, path, "name", issues);
    let gender = gender_field(obj, path, issues);
    let age = age_field(obj, path, issues);
    let pets = pets_field(obj, path, issues);

    Some(Person {
        name: name?.to_string(),
        gender: gender?,
        age: age?,
        pets: pets?,
    })
}

fn validate_pet(path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) -> Option<Pet> {
    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            issues.push(ValidationIssue::new(
                path,
                format!("expected object, got {}", json_type(other)),
            ));
            return None;
        }
    };

    let name = required_str(obj, path, "name", issues).and_then(|name| {
        if name.is_empty() {
            issues.push(ValidationIssue::new(
                format!("{}.name", path),
                "must not be empty",
            ));
            None
        } else {
            Some(name)
        }
    });

    // The feed calls it `type`; `kind` is accepted as well.
    let kind_key = if obj.contains_key("type") || !obj.contains_key("kind") {
        "type"
    } else {
        "kind"
    };
    let kind = required_str(obj, path, kind_key, issues);

    Some(Pet::new(name?, kind?))
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            issues.push(ValidationIssue::new(
                format!("{}.{}", path, field),
                format!("expected string, got {}", json_type(other)),
            ));
            None
        }
        None => {
            issues.push(ValidationIssue::new(
                format!("{}.{}", path, field),
                "required field is missing",
            ));
            None
        }
    }
}

fn gender_field(
    obj: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Gender> {
    let raw = required_str(obj, path, "gender", issues)?;
    let gender = Gender::parse(raw);
    if gender.is_none() {
        let expected = Gender::ALL
            .iter()
            .map(|g| format!("\"{}\"", g.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(ValidationIssue::new(
            format!("{}.gender", path),
            format!("expected one of {}, got \"{}\"", expected, raw),
        ));
    }
    gender
}

fn age_field(obj: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<u64> {
    let field_path = format!("{}.age", path);
    let number = match obj.get("age") {
        Some(Value::Number(n)) => n,
        Some(other) => {
            issues.push(ValidationIssue::new(
                field_path,
                format!("expected number, got {}", json_type(other)),
            ));
            return None;
        }
        None => {
            issues.push(ValidationIssue::new(field_path, "required field is missing"));
            return None;
        }
    };

    if let Some(age) = number.as_u64() {
        return Some(age);
    }

    // Whole-valued floats such as `23.0` are integers for the feed's purposes.
    let value = number.as_f64().unwrap_or(f64::NAN);
    if value.fract() != 0.0 || !value.is_finite() {
        issues.push(ValidationIssue::new(
            field_path,
            format!("expected integer, got {}", number),
        ));
        None
    } else if value < 0.0 {
        issues.push(ValidationIssue::new(
            field_path,
            format!("must be non-negative, got {}", number),
        ));
        None
    } else if value > u64::MAX as f64 {
        issues.push(ValidationIssue::new(
            field_path,
            format!("out of range, got {}", number),
        ));
        None
    } else {
        Some(value as u64)
    }
}

fn pets_field(
    obj: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<Pet>> {
    let items = match obj.get("pets") {
        None | Some(Value::Null) => return Some(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            issues.push(ValidationIssue::new(
                format!("{}.pets", path),
                format!("expected array or null, got {}", json_type(other)),
            ));
            return None;
        }
    };

    let before = issues.len();
    let pets: Vec<Pet> = items
        .iter()
        .enumerate()
        .filter_map(|(index, pet)| validate_pet(&format!("{}.pets[{}]", path, index), pet, issues))
        .collect();

    (issues.len() == before).then_some(pets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(gender: &str, age: Value) -> Value {
        json!({"name": "Alex", "gender": gender, "age": age, "pets": []})
    }

    #[test]
    fn test_validate_sample_feed() {
        let raw = json!([
            {"name": "Bob", "gender": "Male", "age": 23,
             "pets": [{"name": "Garfield", "type": "Cat"}, {"name": "Fido", "type": "Dog"}]},
            {"name": "Jennifer", "gender": "Female", "age": 18,
             "pets": [{"name": "Garfield", "type": "Cat"}]},
            {"name": "Steve", "gender": "Male", "age": 45, "pets": null}
        ]);

        let people = validate(&raw).unwrap();

        assert_eq!(people.len(), 3);
        assert_eq!(people[0].name, "Bob");
        assert_eq!(people[0].gender, Gender::Male);
        assert_eq!(people[0].pets[1], Pet::new("Fido", "Dog"));
        assert_eq!(people[1].gender, Gender::Female);
        assert!(people[2].pets.is_empty());
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert_eq!(validate(&json!([])).unwrap(), Vec::<Person>::new());
    }

    #[test]
    fn test_absent_and_null_pets_match_empty_pets() {
        let raw = json!([
            {"name": "A", "gender": "Female", "age": 1},
            {"name": "B", "gender": "Female", "age": 1, "pets": null},
            {"name": "C", "gender": "Female", "age": 1, "pets": []}
        ]);

        let people = validate(&raw).unwrap();
        assert!(people.iter().all(|p| p.pets.is_empty()));
    }

    #[test]
    fn test_non_array_top_level_is_rejected() {
        let err = validate(&json!({"people": []})).unwrap_err();
        assert_eq!(err.to_string(), "expected array, got object");

        let err = validate(&json!("nope")).unwrap_err();
        assert_eq!(err.to_string(), "expected array, got string");
    }

    #[test]
    fn test_missing_gender_is_rejected() {
        let err = validate(&json!([{"name": "Alex", "age": 30}])).unwrap_err();
        assert_eq!(err.to_string(), "[0].gender: required field is missing");
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let err = validate(&json!([person("Other", json!(30))])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[0].gender: expected one of \"Female\", \"Male\", got \"Other\""
        );
    }

    #[test]
    fn test_negative_age_is_rejected() {
        let err = validate(&json!([person("Male", json!(-1))])).unwrap_err();
        assert_eq!(err.to_string(), "[0].age: must be non-negative, got -1");
    }

    #[test]
    fn test_fractional_age_is_rejected() {
        let err = validate(&json!([person("Male", json!(1.5))])).unwrap_err();
        assert_eq!(err.to_string(), "[0].age: expected integer, got 1.5");
    }

    #[test]
    fn test_whole_float_age_is_accepted() {
        let people = validate(&json!([person("Male", json!(23.0))])).unwrap();
        assert_eq!(people[0].age, 23);
    }

    #[test]
    fn test_age_must_be_a_number() {
        let err = validate(&json!([person("Male", json!("23"))])).unwrap_err();
        assert_eq!(err.to_string(), "[0].age: expected number, got string");
    }

    #[test]
    fn test_all_issues_are_reported() {
        let raw = json!([
            {"name": 7, "gender": "Male", "age": 3},
            {"name": "Ok", "gender": "Female", "age": 3,
             "pets": [{"name": "", "type": "Cat"}, {"name": "Rex"}, 5]}
        ]);

        let err = validate(&raw).unwrap_err();
        let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "[0].name",
                "[1].pets[0].name",
                "[1].pets[1].type",
                "[1].pets[2]"
            ]
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = json!([
            {"name": "A", "gender": "Male", "age": 2, "email": "a@example.com",
             "pets": [{"name": "Tom", "type": "Cat", "colour": "grey"}]}
        ]);

        let people = validate(&raw).unwrap();
        assert_eq!(people[0].pets, vec![Pet::new("Tom", "Cat")]);
    }

    #[test]
    fn test_kind_alias_is_accepted() {
        let raw = json!([
            {"name": "A", "gender": "Male", "age": 2, "pets": [{"name": "Tom", "kind": "Cat"}]}
        ]);

        let people = validate(&raw).unwrap();
        assert!(people[0].pets[0].is_cat());
    }

    #[test]
    fn test_non_object_person_is_rejected() {
        let err = validate(&json!([null])).unwrap_err();
        assert_eq!(err.to_string(), "[0]: expected object, got null");
    }

    #[test]
    fn test_pets_must_be_array_or_null() {
        let err = validate(&json!([
            {"name": "A", "gender": "Male", "age": 2, "pets": {"name": "Tom"}}
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "[0].pets: expected array or null, got object");
    }
}
