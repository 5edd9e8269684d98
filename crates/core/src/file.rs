//! File metadata records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Registry-assigned identifier of a file record.
///
/// Identifiers are positive and never reused within a process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u64);

impl FileId {
    /// The first id a registry assigns.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw identifier. Returns `None` for zero, which is never assigned.
    pub fn new(id: u64) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    /// Get the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .parse()
            .map_err(|_| Error::InvalidFileId(s.to_string()))?;
        Self::new(raw).ok_or_else(|| Error::InvalidFileId(s.to_string()))
    }
}

/// A stored file metadata record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    #[serde(rename = "filename")]
    pub file_name: String,
    pub hash: String,
    pub acl: String,
}

impl FileRecord {
    /// Build the record that results from replacing this record's fields.
    pub fn with_fields(id: FileId, fields: NewFile) -> Self {
        Self {
            id,
            file_name: fields.file_name,
            hash: fields.hash,
            acl: fields.acl,
        }
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.file_name, self.hash, self.acl)
    }
}

/// Field values for a record that has not been assigned an id yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    #[serde(rename = "filename")]
    pub file_name: String,
    pub hash: String,
    pub acl: String,
}

impl NewFile {
    pub fn new(
        file_name: impl Into<String>,
        hash: impl Into<String>,
        acl: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            hash: hash.into(),
            acl: acl.into(),
        }
    }
}

/// Exact-match criteria for finding records.
///
/// A `None` criterion matches every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub file_name: Option<String>,
    pub hash: Option<String>,
    pub acl: Option<String>,
}

impl FileFilter {
    /// Build a filter where an empty string means "don't filter on this field".
    pub fn new(file_name: &str, hash: &str, acl: &str) -> Self {
        fn criterion(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            file_name: criterion(file_name),
            hash: criterion(hash),
            acl: criterion(acl),
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.hash.is_none() && self.acl.is_none()
    }

    /// Check whether a record satisfies every set criterion.
    pub fn matches(&self, record: &FileRecord) -> bool {
        fn field_matches(criterion: &Option<String>, value: &str) -> bool {
            criterion.as_deref().is_none_or(|c| c == value)
        }

        field_matches(&self.file_name, &record.file_name)
            && field_matches(&self.hash, &record.hash)
            && field_matches(&self.acl, &record.acl)
    }
}

/// Strip directory components from a client-supplied file name.
///
/// Both `/` and `\` are treated as separators so names uploaded from
/// Windows clients are reduced the same way.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
