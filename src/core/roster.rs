use crate::domain::model::{CatRoster, Gender, Person};

/// Sorted names of every cat owned by `people`. Other pets are dropped.
pub fn sorted_cat_names<'a, I>(people: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Person>,
{
    let mut names: Vec<String> = people
        .into_iter()
        .flat_map(|person| person.pets.iter())
        .filter(|pet| pet.is_cat())
        .map(|pet| pet.name.clone())
        .collect();
    // byte-wise ordering, not locale-aware
    names.sort_unstable();
    names
}

/// Splits owners into female and everyone else, then collects each side's cats.
///
/// Only `Gender::Female` goes to the first list. A third gender would land in
/// `other` without complaint; the two-valued split is a known limitation.
pub fn partition_cats(people: &[Person]) -> CatRoster {
    let (female, other): (Vec<&Person>, Vec<&Person>) = people
        .iter()
        .partition(|person| person.gender == Gender::Female);

    let roster = CatRoster {
        female_owned: sorted_cat_names(female),
        other: sorted_cat_names(other),
    };

    tracing::debug!(
        "Partitioned {} cats ({} female-owned, {} other) from {} people",
        roster.total(),
        roster.female_owned.len(),
        roster.other.len(),
        people.len()
    );

    roster
}
