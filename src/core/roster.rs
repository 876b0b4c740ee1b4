use crate::domain::model::Participant;
use crate::utils::error::{DrawError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BulkAddReport {
    pub added: usize,
    pub skipped: usize,
    pub new_people: Vec<RosterEntry>,
    pub errors: Vec<String>,
}

/// 參與者名單，名稱以不分大小寫的方式去重，保留加入順序
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    name_keys: HashSet<String>,
    next_id: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

fn name_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[\n,]+").expect("separator pattern is valid"))
}

impl Roster {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            name_keys: HashSet::new(),
            next_id: 1,
        }
    }

    pub fn people(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name_keys.contains(&name.trim().to_lowercase())
    }

    pub fn add_person(&mut self, name: &str) -> Result<RosterEntry> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DrawError::ValidationError {
                message: "Name cannot be empty".to_string(),
            });
        }

        let key = trimmed.to_lowercase();
        if self.name_keys.contains(&key) {
            return Err(DrawError::DuplicateName {
                name: trimmed.to_string(),
            });
        }

        let entry = RosterEntry {
            id: format!("person-{}", self.next_id),
            name: trimmed.to_string(),
            excluded: false,
        };
        self.next_id += 1;
        self.name_keys.insert(key);
        self.entries.push(entry.clone());

        tracing::debug!("Added participant {} ({})", entry.name, entry.id);
        Ok(entry)
    }

    /// Add every name from newline- or comma-separated input, skipping blanks and
    /// names already on the roster.
    pub fn add_multiple_names(&mut self, input: &str) -> BulkAddReport {
        let names: Vec<&str> = name_separator()
            .split(input)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return BulkAddReport {
                errors: vec!["No valid names found".to_string()],
                ..Default::default()
            };
        }

        // 輸入內部先去重，保留第一次出現的寫法
        let mut seen = HashSet::new();
        let unique: Vec<&str> = names
            .into_iter()
            .filter(|n| seen.insert(n.to_lowercase()))
            .collect();

        let mut report = BulkAddReport::default();
        for name in unique {
            if self.has_name(name) {
                report.skipped += 1;
                continue;
            }
            if let Ok(entry) = self.add_person(name) {
                report.new_people.push(entry);
            }
        }
        report.added = report.new_people.len();
        if report.skipped > 0 {
            report
                .errors
                .push(format!("{} name(s) already exist", report.skipped));
        }

        report
    }

    pub fn remove_person(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                let removed = self.entries.remove(index);
                self.name_keys.remove(&removed.name.to_lowercase());
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.name_keys.clear();
        self.next_id = 1;
    }

    pub fn set_excluded(&mut self, id: &str, excluded: bool) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.excluded = excluded;
        Ok(())
    }

    /// Flip the exclusion flag and return the new value.
    pub fn toggle_exclusion(&mut self, id: &str) -> Result<bool> {
        let entry = self.entry_mut(id)?;
        entry.excluded = !entry.excluded;
        Ok(entry.excluded)
    }

    /// Exclude by case-insensitive name; returns false when the name is unknown.
    pub fn exclude_name(&mut self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        match self.entries.iter_mut().find(|e| e.name.to_lowercase() == key) {
            Some(entry) => {
                entry.excluded = true;
                true
            }
            None => false,
        }
    }

    pub fn eligible_participants(&self) -> Vec<Participant<String>> {
        self.entries
            .iter()
            .filter(|e| !e.excluded)
            .map(|e| Participant::new(e.id.clone(), e.name.clone()))
            .collect()
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut RosterEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DrawError::ParticipantNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_person_trims_and_assigns_ids() {
        let mut roster = Roster::new();
        let alice = roster.add_person("  Alice ").unwrap();
        let bob = roster.add_person("Bob").unwrap();

        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.id, "person-1");
        assert_eq!(bob.id, "person-2");
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_add_person_rejects_empty_and_duplicates() {
        let mut roster = Roster::new();
        roster.add_person("Alice").unwrap();

        assert!(matches!(
            roster.add_person("   "),
            Err(DrawError::ValidationError { .. })
        ));
        assert!(matches!(
            roster.add_person("ALICE"),
            Err(DrawError::DuplicateName { .. })
        ));
        assert!(roster.has_name("alice"));
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut roster = Roster::new();
        roster.add_person("Alice").unwrap();
        roster.clear();
        assert!(roster.is_empty());
        assert_eq!(roster.add_person("Bob").unwrap().id, "person-1");
    }

    #[test]
    fn test_remove_person_frees_name() {
        let mut roster = Roster::new();
        let alice = roster.add_person("Alice").unwrap();
        assert!(roster.remove_person(&alice.id));
        assert!(!roster.remove_person(&alice.id));
        assert!(!roster.has_name("Alice"));
        assert!(roster.add_person("alice").is_ok());
    }
}
