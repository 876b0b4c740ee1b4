use serde::{Deserialize, Serialize};

/// 參與抽籤的成員：不透明的識別碼加上顯示用名稱
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant<Id> {
    pub id: Id,
    pub name: String,
}

impl<Id> Participant<Id> {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment<Id> {
    pub giver_id: Id,
    pub giver_name: String,
    pub receiver_id: Id,
    pub receiver_name: String,
}

/// Giver → receiver pairs in participant input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet<Id> {
    assignments: Vec<Assignment<Id>>,
}

impl<Id> AssignmentSet<Id> {
    pub(crate) fn from_validated(assignments: Vec<Assignment<Id>>) -> Self {
        Self { assignments }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment<Id>> {
        self.assignments.iter()
    }

    pub fn as_slice(&self) -> &[Assignment<Id>] {
        &self.assignments
    }

    pub fn into_inner(self) -> Vec<Assignment<Id>> {
        self.assignments
    }
}

impl<Id: PartialEq> AssignmentSet<Id> {
    /// 查詢某位送禮者要送給誰
    pub fn receiver_of(&self, giver_id: &Id) -> Option<&Assignment<Id>> {
        self.assignments.iter().find(|a| &a.giver_id == giver_id)
    }

    pub fn giver_for(&self, receiver_id: &Id) -> Option<&Assignment<Id>> {
        self.assignments
            .iter()
            .find(|a| &a.receiver_id == receiver_id)
    }
}

impl<'a, Id> IntoIterator for &'a AssignmentSet<Id> {
    type Item = &'a Assignment<Id>;
    type IntoIter = std::slice::Iter<'a, Assignment<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}
