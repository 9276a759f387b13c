use serde::{Deserialize, Serialize};

/// A property set independently for each side of a box.
///
/// Each side is optional so a more specific style can change a single side
/// while inheriting the others.
///
/// # Examples
///
/// ```rust
/// use docnav::common::{DirectionalStyle, Measure};
///
/// let mut margin = DirectionalStyle::all(Measure::pt(4.0));
/// let mut top_only = DirectionalStyle::default();
/// top_only.top = Some(Measure::pt(10.0));
///
/// margin.override_with(&top_only);
/// assert_eq!(margin.top, Some(Measure::pt(10.0)));
/// assert_eq!(margin.left, Some(Measure::pt(4.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalStyle<T> {
    pub right: Option<T>,
    pub top: Option<T>,
    pub left: Option<T>,
    pub bottom: Option<T>,
}

impl<T> Default for DirectionalStyle<T> {
    fn default() -> Self {
        Self {
            right: None,
            top: None,
            left: None,
            bottom: None,
        }
    }
}

impl<T: Clone> DirectionalStyle<T> {
    /// Same value on every side.
    pub fn all(value: T) -> Self {
        Self {
            right: Some(value.clone()),
            top: Some(value.clone()),
            left: Some(value.clone()),
            bottom: Some(value),
        }
    }

    /// Replace every side that `other` sets, keep the rest.
    pub fn override_with(&mut self, other: &Self) {
        override_option(&mut self.right, &other.right);
        override_option(&mut self.top, &other.top);
        override_option(&mut self.left, &other.left);
        override_option(&mut self.bottom, &other.bottom);
    }

    /// `true` when no side is set.
    pub fn is_empty(&self) -> bool {
        self.right.is_none() && self.top.is_none() && self.left.is_none() && self.bottom.is_none()
    }
}

/// Right-biased merge of a single optional property.
#[inline]
pub(crate) fn override_option<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}
