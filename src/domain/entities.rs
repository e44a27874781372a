//! Domain entities: core data structures

use std::fmt;

use itertools::Itertools;

use crate::domain::DomainError;

/// One catalog entry.
///
/// `id` is the business key of the index. It is compared with ordinary
/// (case-sensitive) string ordering; callers normalize queries before lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    /// Course number, e.g. "CSCI200"
    pub id: String,
    /// Human-readable title
    pub name: String,
    /// Course numbers required before this one, in catalog order
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prerequisites: Vec::new(),
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// A course without identifier carries no catalog entry.
    pub fn is_blank(&self) -> bool {
        self.id.is_empty()
    }

    /// Parse one catalog line: `ID,Name[,Prereq...]`.
    ///
    /// Fields are trimmed and empty prerequisite fields are dropped, so
    /// `CSCI100,Intro,` yields a course without prerequisites.
    ///
    /// # Arguments
    /// * `line` - Raw line content
    /// * `line_no` - 1-based line number, reported on error
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, DomainError> {
        let mut fields = line.split(',').map(str::trim);

        let id = fields.next().unwrap_or_default();
        if id.is_empty() {
            return Err(DomainError::InvalidRecord {
                line: line_no,
                message: "missing course number".into(),
            });
        }

        let name = fields.next().ok_or_else(|| DomainError::InvalidRecord {
            line: line_no,
            message: format!("missing course name for {id}"),
        })?;

        let prerequisites = fields.filter(|f| !f.is_empty()).map(String::from).collect();

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            prerequisites,
        })
    }

    /// Summary line followed by the prerequisite list.
    pub fn details(&self) -> String {
        let prerequisites = if self.prerequisites.is_empty() {
            "none".to_string()
        } else {
            self.prerequisites.iter().join(", ")
        };
        format!("{self}\nPrerequisites: {prerequisites}")
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.name)
    }
}

/// Parse a whole catalog document into courses, in file order.
///
/// Blank lines and `#` comments are skipped. Stops at the first malformed line.
pub fn parse_catalog(content: &str) -> Result<Vec<Course>, DomainError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(i, line)| Course::parse_line(line, i + 1))
        .collect()
}
