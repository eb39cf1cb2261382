pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::HttpPeopleSource;
pub use crate::core::controller::{CatListsController, FetchTicket, ViewState};
pub use crate::core::roster::partition_cats;
pub use crate::core::schema::{validate, ValidationError, ValidationIssue};
pub use crate::domain::model::{CatRoster, Gender, PeopleList, Person, Pet};
pub use crate::utils::error::{CatRosterError, Result};
