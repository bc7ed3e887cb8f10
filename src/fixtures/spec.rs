//! Declarative fixture specifications.

use std::fmt;
use std::sync::Arc;

/// Decides from a fixture's content whether its task is excluded.
#[derive(Clone)]
pub enum ContentRule {
    /// Matches when the content contains any of the markers.
    ContainsAny(Vec<String>),
    /// Matches when the function returns `true`.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ContentRule {
    /// Builds a marker rule.
    pub fn contains_any<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsAny(markers.into_iter().map(Into::into).collect())
    }

    /// Builds a rule from an arbitrary predicate.
    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns `true` if the task owning this content must be skipped.
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        match self {
            Self::ContainsAny(markers) => markers.iter().any(|m| content.contains(m.as_str())),
            Self::Custom(predicate) => predicate(content),
        }
    }
}

impl fmt::Debug for ContentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainsAny(markers) => f.debug_tuple("ContainsAny").field(markers).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Lets a fixture be the task file itself when the task is a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFileRule {
    /// Recognized source suffixes, e.g. `.js`.
    pub extensions: Vec<String>,
}

impl TaskFileRule {
    /// Returns `true` if a task file with this name may stand in for the fixture.
    #[must_use]
    pub fn accepts(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// How to resolve one fixture key for every task.
#[derive(Debug, Clone)]
pub struct FixtureSpec {
    /// Field name on the task, e.g. `actual`.
    pub key: String,
    /// Candidate file names relative to the task; the last existing one wins.
    pub candidates: Vec<String>,
    /// Present when a single-file task supplies this fixture.
    pub task_file: Option<TaskFileRule>,
    /// Present when the fixture's content can exclude the task.
    pub skip_when: Option<ContentRule>,
}

impl FixtureSpec {
    /// Creates a spec with plain candidate resolution.
    pub fn new<I, S>(key: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            task_file: None,
            skip_when: None,
        }
    }

    /// Marks the fixture as task-file sensitive for the given suffixes.
    #[must_use]
    pub fn with_task_file<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_file =
            Some(TaskFileRule { extensions: extensions.into_iter().map(Into::into).collect() });
        self
    }

    /// Skips the task when `rule` matches the fixture's content.
    #[must_use]
    pub fn skip_when(mut self, rule: ContentRule) -> Self {
        self.skip_when = Some(rule);
        self
    }

    /// The candidate used when none of the alternatives exist.
    #[must_use]
    pub fn default_candidate(&self) -> &str {
        self.candidates.first().map_or("", String::as_str)
    }
}
