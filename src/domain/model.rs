use serde::{Deserialize, Serialize};

pub const CAT_KIND: &str = "Cat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    /// Free-form on the wire (`type`); only `"Cat"` matters downstream.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
}

impl Pet {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn is_cat(&self) -> bool {
        self.kind == CAT_KIND
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub gender: Gender,
    pub age: u64,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

pub type PeopleList = Vec<Person>;

/// Cat names split by owner gender, each list sorted ascending by byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatRoster {
    pub female_owned: Vec<String>,
    pub other: Vec<String>,
}

impl CatRoster {
    pub fn total(&self) -> usize {
        self.female_owned.len() + self.other.len()
    }
}
