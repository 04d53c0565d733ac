use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::value::FieldValue;

/// Well-known field keys, matching the remote payload's camelCase naming.
pub mod fields {
    pub const NAME: &str = "name";
    pub const COMPANY: &str = "company";
    pub const TITLE: &str = "title";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const STATUS: &str = "status";
    pub const STAGE: &str = "stage";
    pub const RANK: &str = "rank";
    pub const LAST_ACTION: &str = "lastAction";
    pub const LAST_ACTION_DATE: &str = "lastActionDate";
    pub const NEXT_ACTION: &str = "nextAction";
    pub const NEXT_ACTION_DATE: &str = "nextActionDate";
    pub const AMOUNT: &str = "amount";
    pub const EMPLOYEE_COUNT: &str = "employeeCount";
    pub const STATE: &str = "state";
    pub const PRIORITY: &str = "priority";
    pub const TECHNOLOGY: &str = "technology";
    pub const TIMEZONE: &str = "timezone";
}

/// Stable identifier of a record, as issued by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The company a record belongs to, carried inline on the fetched record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

impl Company {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get(fields::NAME).and_then(FieldValue::as_str)
    }
}

/// An immutable snapshot of a target record from the data-access collaborator.
///
/// Field lookup resolves the record's own map first, then falls back to the
/// nested company object: `company` resolves to the company name, any other
/// key missing from the record is tried against the company's field map
/// (`employeeCount`, `state`, ...). Records are never mutated in place —
/// overlay merges produce fresh copies via [`Record::patched`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    company: Option<Company>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
            company: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    /// Resolve a field, falling back to the nested company object.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        if let Some(value) = self.fields.get(key) {
            return Some(value);
        }
        let company = self.company.as_ref()?;
        if key == fields::COMPANY {
            company.fields.get(fields::NAME)
        } else {
            company.fields.get(key)
        }
    }

    /// Resolve a field as text, empty when missing or non-text.
    pub fn text(&self, key: &str) -> &str {
        self.field(key).and_then(FieldValue::as_str).unwrap_or("")
    }

    /// Build a copy with the patch's entries laid over this record's fields.
    ///
    /// Every key present in the patch wins, including explicit nulls. Keys
    /// absent from the patch keep the base value.
    pub fn patched(&self, patch: &Patch) -> Record {
        let mut merged = self.clone();
        for (key, value) in patch.entries() {
            merged.fields.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// A sparse field update, the unit of optimistic edits.
///
/// The map distinguishes an explicit `FieldValue::Null` (which overrides the
/// base value — several fields are legitimately nullable) from an absent key
/// (which never does).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch(HashMap<String, FieldValue>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Explicitly null a field out, overriding whatever the base holds.
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), FieldValue::Null);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
