use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Wire form of a person: `[[name tokens], [[alias tokens], ...]]`.
type PersonRecord = (Vec<String>, Vec<Vec<String>>);

/// A named person with optional aliases.
///
/// # Invariants
/// - `name` is non-empty and unique within a roster (see [`dedup_by_name`])
/// - No alias group is empty
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "PersonRecord", into = "PersonRecord")]
pub struct Person {
	/// Canonical name tokens.
	name: Vec<String>,
	/// Alias groups, each one a whole phrase.
	aliases: Vec<Vec<String>>,
}

impl Person {
	/// Creates a person, dropping empty alias groups.
	pub fn new(name: Vec<String>, aliases: Vec<Vec<String>>) -> Self {
		let aliases = aliases.into_iter().filter(|alias| !alias.is_empty()).collect();
		Self { name, aliases }
	}

	pub fn name(&self) -> &[String] {
		&self.name
	}

	pub fn aliases(&self) -> &[Vec<String>] {
		&self.aliases
	}

	/// Canonical name as space-joined text. This is the graph node identifier.
	pub fn full_name(&self) -> String {
		self.name.join(" ")
	}

	/// Phrases searched to find the sentences mentioning this person.
	///
	/// Every token of the canonical name alone, then the full canonical name,
	/// then every alias as one whole phrase. Alias phrases are not split.
	pub fn search_phrases(&self) -> Vec<Vec<String>> {
		let mut phrases: Vec<Vec<String>> = self.name.iter().map(|token| vec![token.clone()]).collect();
		phrases.push(self.name.clone());
		phrases.extend(self.aliases.iter().cloned());
		phrases
	}

	/// Distinct single words used for mention counting.
	///
	/// Unlike [`Person::search_phrases`], aliases are split into their words.
	pub fn mention_words(&self) -> HashSet<&str> {
		self.name
			.iter()
			.chain(self.aliases.iter().flatten())
			.map(String::as_str)
			.collect()
	}
}

impl From<PersonRecord> for Person {
	fn from((name, aliases): PersonRecord) -> Self {
		Self::new(name, aliases)
	}
}

impl From<Person> for PersonRecord {
	fn from(person: Person) -> Self {
		(person.name, person.aliases)
	}
}

/// Ordered list of persons.
pub type Roster = Vec<Person>;

/// Drops persons with an empty canonical name and collapses duplicate
/// canonical names, keeping the first occurrence.
pub fn dedup_by_name(persons: Vec<Person>) -> Roster {
	let mut seen = HashSet::new();
	persons
		.into_iter()
		.filter(|person| !person.name.is_empty() && seen.insert(person.full_name()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(s: &str) -> Vec<String> {
		s.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn empty_alias_groups_are_dropped() {
		let person = Person::new(words("harry potter"), vec![vec![], words("the boy who lived")]);
		assert_eq!(person.aliases().len(), 1);
	}

	#[test]
	fn search_phrases_split_name_but_not_aliases() {
		let person = Person::new(words("harry potter"), vec![words("boy who lived")]);
		assert_eq!(
			person.search_phrases(),
			vec![words("harry"), words("potter"), words("harry potter"), words("boy who lived")]
		);
	}

	#[test]
	fn mention_words_split_aliases() {
		let person = Person::new(words("bob"), vec![words("bobby b"), words("bob")]);
		let mut mention_words: Vec<_> = person.mention_words().into_iter().collect();
		mention_words.sort();
		assert_eq!(mention_words, vec!["b", "bob", "bobby"]);
	}

	#[test]
	fn dedup_keeps_first_occurrence() {
		let roster = dedup_by_name(vec![
			Person::new(words("ron weasley"), vec![words("ron")]),
			Person::new(vec![], vec![words("nobody")]),
			Person::new(words("ron weasley"), vec![]),
		]);
		assert_eq!(roster.len(), 1);
		assert_eq!(roster[0].aliases().len(), 1);
	}

	#[test]
	fn person_serializes_as_nested_lists() {
		let person = Person::new(words("ron weasley"), vec![words("ron")]);
		let json = serde_json::to_string(&person).unwrap();
		assert_eq!(json, r#"[["ron","weasley"],[["ron"]]]"#);
		let back: Person = serde_json::from_str(&json).unwrap();
		assert_eq!(back, person);
	}
}
