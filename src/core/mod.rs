pub mod controller;
pub mod roster;
pub mod schema;

pub use crate::domain::model::{CatRoster, Gender, PeopleList, Person, Pet};
pub use crate::domain::ports::{ConfigProvider, PeopleSource};
pub use crate::utils::error::Result;
