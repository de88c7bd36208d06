//! Collaborator interfaces and an in-memory catalog.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::error::CatalogError;
use crate::ingest::RawSection;
use crate::models::PrereqNode;

/// Supplies raw section records for a course.
///
/// Implementations backed by a network catalog fetch asynchronously on the
/// host side and hand the records over; this crate never performs I/O.
pub trait SectionSource {
    /// All section records of `course_id`.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] for unknown courses, or a source-specific
    /// failure.
    fn fetch_sections(&self, course_id: &str) -> Result<Vec<RawSection>, CatalogError>;
}

impl<T: SectionSource + ?Sized> SectionSource for &T {
    fn fetch_sections(&self, course_id: &str) -> Result<Vec<RawSection>, CatalogError> {
        (**self).fetch_sections(course_id)
    }
}

/// Turns a catalog's free-text prerequisite description into a tree.
pub trait PrerequisiteParser {
    fn parse_prerequisites(&self, text: &str) -> Result<PrereqNode, CatalogError>;

    /// Parses `text` and returns what is still missing given `completed`,
    /// or `None` when the prerequisites are met.
    fn missing_prerequisites(
        &self,
        text: &str,
        completed: &HashSet<&str>,
    ) -> Result<Option<PrereqNode>, CatalogError> {
        Ok(self.parse_prerequisites(text)?.missing(completed))
    }
}

/// Reads prerequisite trees already encoded as JSON.
///
/// Suits hosts whose parser service answers with the tree's JSON form, and
/// test fixtures. The parsed tree is simplified before it is returned.
///
/// ```
/// use u_timetable::catalog::{JsonPrerequisiteParser, PrerequisiteParser};
///
/// let tree = JsonPrerequisiteParser
///     .parse_prerequisites(r#"{"type": "all", "of": [{"type": "course", "id": "CSE 12"}]}"#)
///     .unwrap();
/// assert_eq!(tree.courses(), vec!["CSE 12"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrerequisiteParser;

impl PrerequisiteParser for JsonPrerequisiteParser {
    fn parse_prerequisites(&self, text: &str) -> Result<PrereqNode, CatalogError> {
        let tree: PrereqNode = serde_json::from_str(text)?;
        Ok(tree.simplify())
    }
}

/// In-memory section source.
///
/// # Example
///
/// ```
/// use u_timetable::catalog::{SectionSource, StaticCatalog};
///
/// let catalog = StaticCatalog::from_json(r#"{
///     "CSE 12": [{"groupKey": "A", "type": "lecture", "label": "A00",
///                 "days": ["TuTh"], "startTime": "09:30", "endTime": "10:50"}]
/// }"#).unwrap();
/// assert_eq!(catalog.fetch_sections("CSE 12").unwrap().len(), 1);
/// assert!(catalog.fetch_sections("CSE 99").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    courses: BTreeMap<String, Vec<RawSection>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `{ "<courseId>": [RawSection, ...] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let courses: BTreeMap<String, Vec<RawSection>> = serde_json::from_str(json)?;
        Ok(Self { courses })
    }

    pub fn with_course(mut self, course_id: impl Into<String>, sections: Vec<RawSection>) -> Self {
        self.insert(course_id, sections);
        self
    }

    /// Adds or replaces a course.
    pub fn insert(&mut self, course_id: impl Into<String>, sections: Vec<RawSection>) {
        self.courses.insert(course_id.into(), sections);
    }

    /// Course ids, sorted.
    pub fn course_ids(&self) -> Vec<&str> {
        self.courses.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl From<BTreeMap<String, Vec<RawSection>>> for StaticCatalog {
    fn from(courses: BTreeMap<String, Vec<RawSection>>) -> Self {
        Self { courses }
    }
}

impl SectionSource for StaticCatalog {
    fn fetch_sections(&self, course_id: &str) -> Result<Vec<RawSection>, CatalogError> {
        trace!(course_id, "catalog lookup");
        self.courses
            .get(course_id.trim())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                course_id: course_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_catalog_lookup() {
        let catalog = StaticCatalog::new()
            .with_course("CSE 12", vec![RawSection::lecture("A", "A00", "TuTh", "09:30", "10:50")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.fetch_sections(" CSE 12 ").unwrap()[0].label, "A00");

        let err = catalog.fetch_sections("CSE 15L").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { ref course_id } if course_id == "CSE 15L"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_json() {
        let catalog = StaticCatalog::from_json(
            r#"{
                "MATH 20C": [
                    {"groupKey": "B", "type": "lecture", "label": "B00",
                     "days": ["MoWeFr"], "startTime": "10:00", "endTime": "10:50"},
                    {"groupKey": "B", "type": "discussion", "label": "B01",
                     "days": ["Tu"], "startTime": "17:00", "endTime": "17:50"}
                ],
                "CSE 12": []
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.course_ids(), vec!["CSE 12", "MATH 20C"]);
        assert_eq!(catalog.fetch_sections("MATH 20C").unwrap()[1].section_type, "discussion");
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let err = StaticCatalog::from_json(r#"{"CSE 12": {"label": "A00"}}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[test]
    fn test_source_through_reference() {
        fn count<S: SectionSource>(source: S, id: &str) -> usize {
            source.fetch_sections(id).map(|s| s.len()).unwrap_or(0)
        }
        let catalog = StaticCatalog::new()
            .with_course("X", vec![RawSection::lecture("A", "A00", "Mo", "09:00", "10:00")]);
        assert_eq!(count(&catalog, "X"), 1);
        assert_eq!(count(&catalog, "Y"), 0);
    }

    #[test]
    fn test_json_prerequisites() {
        let parser = JsonPrerequisiteParser;
        let text = r#"{"type": "all", "of": [
            {"type": "course", "id": "CSE 12"},
            {"type": "any", "of": [{"type": "course", "id": "MATH 18"}, {"type": "course", "id": "MATH 31AH"}]}
        ]}"#;

        let tree = parser.parse_prerequisites(text).unwrap();
        assert_eq!(tree.courses(), vec!["CSE 12", "MATH 18", "MATH 31AH"]);

        let done: HashSet<&str> = ["CSE 12", "MATH 31AH"].into_iter().collect();
        assert_eq!(parser.missing_prerequisites(text, &done).unwrap(), None);

        let partial: HashSet<&str> = ["MATH 18"].into_iter().collect();
        assert_eq!(
            parser.missing_prerequisites(text, &partial).unwrap(),
            Some(PrereqNode::course("CSE 12"))
        );
    }

    #[test]
    fn test_json_prerequisites_invalid() {
        let err = JsonPrerequisiteParser.parse_prerequisites("CSE 12 and MATH 18").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
