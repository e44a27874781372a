//! Course catalog service
//!
//! Loads a catalog file into a [`CourseIndex`] and answers queries against it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{parse_catalog, Course, CourseIndex};
use crate::infrastructure::traits::FileSystem;

/// A prerequisite that names a course missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPrerequisite {
    /// Course declaring the prerequisite
    pub course: String,
    /// Course number that could not be found
    pub prerequisite: String,
}

/// Service for loading and querying the course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    normalize_queries: bool,
}

impl CatalogService {
    /// Create a new catalog service.
    ///
    /// With `normalize_queries` set, lookups trim and ASCII-uppercase the query,
    /// matching the upper-case course numbers used in catalogs.
    pub fn new(fs: Arc<dyn FileSystem>, normalize_queries: bool) -> Self {
        Self {
            fs,
            normalize_queries,
        }
    }

    /// Read and parse a catalog file, inserting courses in file order.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<CourseIndex> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;

        let courses = parse_catalog(&content).map_err(|source| ApplicationError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;

        let mut index = CourseIndex::new();
        for course in courses {
            index.insert(course);
        }
        debug!(
            "load: {} courses from {}, depth {}",
            index.len(),
            path.display(),
            index.depth()
        );
        Ok(index)
    }

    /// Turn raw user input into a lookup key.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if self.normalize_queries {
            trimmed.to_ascii_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    /// Look up a course from raw user input.
    #[instrument(level = "debug", skip(self, index))]
    pub fn find<'a>(&self, index: &'a CourseIndex, raw_query: &str) -> Option<&'a Course> {
        let key = self.normalize(raw_query);
        let found = index.search(&key);
        debug!("find: key={} found={}", key, found.is_some());
        found
    }

    /// All courses in index order.
    pub fn list<'a>(&self, index: &'a CourseIndex) -> Vec<&'a Course> {
        index.iter().collect()
    }

    /// Prerequisites that do not resolve to a course in the index, in index order.
    #[instrument(level = "debug", skip(self, index))]
    pub fn unresolved_prerequisites(&self, index: &CourseIndex) -> Vec<UnresolvedPrerequisite> {
        index
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(move |p| index.search(p).is_none())
                    .map(move |p| UnresolvedPrerequisite {
                        course: course.id.clone(),
                        prerequisite: p.clone(),
                    })
            })
            .collect()
    }
}
