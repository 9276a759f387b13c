//! Structural paths from the root to an element.
//!
//! A path is a `/`-separated list of `relation:index` steps, for example
//! `/child:3/child:2/row:17/child:0`. Each step selects the Nth element under
//! the named relation of the element reached so far. The empty string is the
//! root itself.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a [`DocumentPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStep {
    /// Nth structural child
    Child(u32),
    /// Nth grid column of a table or sheet
    Column(u32),
    /// Nth grid row of a table or sheet
    Row(u32),
    /// Nth drawing shape of a sheet
    Shape(u32),
    /// Nth master page element reachable from a slide or page
    MasterPage(u32),
}

impl PathStep {
    #[inline]
    pub fn relation(&self) -> &'static str {
        match self {
            Self::Child(_) => "child",
            Self::Column(_) => "column",
            Self::Row(_) => "row",
            Self::Shape(_) => "shape",
            Self::MasterPage(_) => "master",
        }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        match *self {
            Self::Child(i) | Self::Column(i) | Self::Row(i) | Self::Shape(i) | Self::MasterPage(i) => i,
        }
    }

    /// Same relation, different index.
    pub(crate) fn with_index(self, index: u32) -> Self {
        match self {
            Self::Child(_) => Self::Child(index),
            Self::Column(_) => Self::Column(index),
            Self::Row(_) => Self::Row(index),
            Self::Shape(_) => Self::Shape(index),
            Self::MasterPage(_) => Self::MasterPage(index),
        }
    }
}

impl FromStr for PathStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (relation, index) = s.split_once(':').ok_or_else(|| {
            Error::InvalidArgument(format!("Path step '{}' lacks ':'", s))
        })?;
        let index: u32 = index.parse().map_err(|_| {
            Error::InvalidArgument(format!("Bad index in path step '{}'", s))
        })?;
        match relation {
            "child" => Ok(Self::Child(index)),
            "column" => Ok(Self::Column(index)),
            "row" => Ok(Self::Row(index)),
            "shape" => Ok(Self::Shape(index)),
            "master" => Ok(Self::MasterPage(index)),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown relation in path step '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.relation(), self.index())
    }
}

/// A path from the document root to an element.
///
/// # Examples
///
/// ```
/// use docnav::document::{DocumentPath, PathStep};
///
/// let path: DocumentPath = "/child:3/row:17/child:0".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.last(), Some(PathStep::Child(0)));
/// assert_eq!(path.parent().unwrap().to_string(), "/child:3/row:17");
///
/// assert!("".parse::<DocumentPath>().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentPath {
    steps: Vec<PathStep>,
}

impl DocumentPath {
    /// The root path.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn last(&self) -> Option<PathStep> {
        self.steps.last().copied()
    }

    #[inline]
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// Path without its last step; `None` for the root.
    pub fn parent(&self) -> Option<DocumentPath> {
        let (_, init) = self.steps.split_last()?;
        Some(Self {
            steps: init.to_vec(),
        })
    }

    /// This path followed by `other`.
    pub fn join(&self, other: &DocumentPath) -> DocumentPath {
        let mut steps = Vec::with_capacity(self.len() + other.len());
        steps.extend_from_slice(&self.steps);
        steps.extend_from_slice(&other.steps);
        Self { steps }
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = PathStep> + '_ {
        self.steps.iter().copied()
    }
}

impl From<Vec<PathStep>> for DocumentPath {
    fn from(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<PathStep> for DocumentPath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl FromStr for DocumentPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::new());
        }
        let rest = s.strip_prefix('/').ok_or_else(|| {
            Error::InvalidArgument(format!("Path '{}' must start with '/'", s))
        })?;
        rest.split('/').map(PathStep::from_str).collect()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_display() {
        let path: DocumentPath = "/child:3/child:2/row:17/child:0".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Child(3),
                PathStep::Child(2),
                PathStep::Row(17),
                PathStep::Child(0)
            ]
        );
        assert_eq!(path.to_string(), "/child:3/child:2/row:17/child:0");

        let path: DocumentPath = "/shape:1/master:0/column:4".parse().unwrap();
        assert_eq!(path.to_string(), "/shape:1/master:0/column:4");
        assert_eq!(DocumentPath::new().to_string(), "");
    }

    #[test]
    fn test_parse_errors() {
        assert!("child:1".parse::<DocumentPath>().is_err());
        assert!("/".parse::<DocumentPath>().is_err());
        assert!("/child".parse::<DocumentPath>().is_err());
        assert!("/child:x".parse::<DocumentPath>().is_err());
        assert!("/child:-1".parse::<DocumentPath>().is_err());
        assert!("/cell:1".parse::<DocumentPath>().is_err());
        assert!("/child:1//child:2".parse::<DocumentPath>().is_err());
    }

    #[test]
    fn test_parent_and_join() {
        let path: DocumentPath = "/child:1/row:2".parse().unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/child:1");
        assert_eq!(parent.parent().unwrap(), DocumentPath::new());
        assert!(DocumentPath::new().parent().is_none());

        let tail: DocumentPath = "/child:0".parse().unwrap();
        assert_eq!(path.join(&tail).to_string(), "/child:1/row:2/child:0");
    }
}
