//! Domain identifier types with validation
//!
//! Newtype wrappers keep operation handles and collection names from being
//! mixed up with each other or with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Export operation handle
///
/// The value returned by the Firestore export API, e.g.
/// `projects/p/databases/(default)/operations/ASA3NDEwOTg0NjExChp0bHVhZmVk`.
/// The format is opaque; only emptiness is rejected.
///
/// # Examples
///
/// ```
/// use firestore_bq_export::domain::ids::JobName;
/// use std::str::FromStr;
///
/// let job = JobName::from_str("ops/123").unwrap();
/// assert_eq!(job.as_str(), "ops/123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    /// Creates a new JobName, rejecting empty or whitespace-only values
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Job name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the job name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for JobName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Firestore collection identifier
///
/// Used both as the export selector and as the destination BigQuery table
/// name. Collection ids cannot contain `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Creates a new CollectionId
    ///
    /// Surrounding whitespace is trimmed. Empty ids and ids containing a path
    /// separator are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        Self::verbatim(id.into().trim())
    }

    /// Creates a collection ID exactly as given, without trimming
    ///
    /// Used for ids echoed back by the export API, which name the export's
    /// directories byte for byte.
    pub fn verbatim(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("Collection ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!("Collection ID cannot contain '/': {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the collection ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a comma-separated list such as `users,orders`
    ///
    /// Blank entries are skipped and duplicates removed while keeping the
    /// first-seen order.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, String> {
        let mut ids: Vec<Self> = Vec::new();
        for part in input.split(',') {
            if part.trim().is_empty() {
                continue;
            }
            let id = Self::new(part)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CollectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
