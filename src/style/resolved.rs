//! Style categories and the cascading merge between style scopes.
//!
//! Every property is optional: `None` means "inherit from the enclosing
//! scope". Merging is right-biased per property, so a more specific scope
//! only replaces what it actually sets.

use crate::common::style::directional::override_option;
use crate::common::{
    Color, DirectionalStyle, FontStyle, FontWeight, HorizontalAlign, Measure, TextAlign, TextWrap,
    VerticalAlign,
};
use serde::{Deserialize, Serialize};

/// A style record that can absorb a more specific record of the same kind.
pub trait Override {
    /// Merge `other` into `self`; properties set in `other` win.
    fn override_with(&mut self, other: &Self);
}

/// Character-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_name: Option<String>,
    pub font_size: Option<Measure>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_underline: Option<bool>,
    pub font_line_through: Option<bool>,
    pub font_shadow: Option<String>,
    pub font_color: Option<Color>,
    pub background_color: Option<Color>,
}

impl Override for TextStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.font_name, &other.font_name);
        override_option(&mut self.font_size, &other.font_size);
        override_option(&mut self.font_weight, &other.font_weight);
        override_option(&mut self.font_style, &other.font_style);
        override_option(&mut self.font_underline, &other.font_underline);
        override_option(&mut self.font_line_through, &other.font_line_through);
        override_option(&mut self.font_shadow, &other.font_shadow);
        override_option(&mut self.font_color, &other.font_color);
        override_option(&mut self.background_color, &other.background_color);
    }
}

/// Paragraph properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub text_align: Option<TextAlign>,
    pub margin: DirectionalStyle<Measure>,
    pub line_height: Option<Measure>,
}

impl Override for ParagraphStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.text_align, &other.text_align);
        self.margin.override_with(&other.margin);
        override_option(&mut self.line_height, &other.line_height);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    pub width: Option<Measure>,
}

impl Override for TableStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.width, &other.width);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableColumnStyle {
    pub width: Option<Measure>,
}

impl Override for TableColumnStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.width, &other.width);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRowStyle {
    pub height: Option<Measure>,
}

impl Override for TableRowStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.height, &other.height);
    }
}

/// Table cell properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCellStyle {
    pub horizontal_align: Option<HorizontalAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub background_color: Option<Color>,
    pub padding: DirectionalStyle<Measure>,
    pub border: DirectionalStyle<String>,
    /// Rotation in degrees
    pub text_rotation: Option<f64>,
}

impl Override for TableCellStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.horizontal_align, &other.horizontal_align);
        override_option(&mut self.vertical_align, &other.vertical_align);
        override_option(&mut self.background_color, &other.background_color);
        self.padding.override_with(&other.padding);
        self.border.override_with(&other.border);
        override_option(&mut self.text_rotation, &other.text_rotation);
    }
}

/// Drawing shape properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicStyle {
    pub stroke_width: Option<Measure>,
    pub stroke_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub vertical_align: Option<VerticalAlign>,
    pub text_wrap: Option<TextWrap>,
}

impl Override for GraphicStyle {
    fn override_with(&mut self, other: &Self) {
        override_option(&mut self.stroke_width, &other.stroke_width);
        override_option(&mut self.stroke_color, &other.stroke_color);
        override_option(&mut self.fill_color, &other.fill_color);
        override_option(&mut self.vertical_align, &other.vertical_align);
        override_option(&mut self.text_wrap, &other.text_wrap);
    }
}

/// The cascaded set of presentation properties in effect at a tree position.
///
/// Each category is independently optional. A backend returns the local
/// contribution of an element in this same shape, with only the categories
/// and properties the element itself declares.
///
/// # Examples
///
/// ```
/// use docnav::common::{Color, Measure};
/// use docnav::style::{override_style, ResolvedStyle, TextStyle};
///
/// let base = ResolvedStyle {
///     text: Some(TextStyle { font_size: Some(Measure::pt(12.0)), ..Default::default() }),
///     ..Default::default()
/// };
/// let incoming = ResolvedStyle {
///     text: Some(TextStyle { font_color: Some(Color::new(255, 0, 0)), ..Default::default() }),
///     ..Default::default()
/// };
///
/// let merged = override_style(&base, &incoming);
/// let text = merged.text.unwrap();
/// assert_eq!(text.font_size, Some(Measure::pt(12.0)));
/// assert_eq!(text.font_color, Some(Color::new(255, 0, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub text: Option<TextStyle>,
    pub paragraph: Option<ParagraphStyle>,
    pub table: Option<TableStyle>,
    pub table_column: Option<TableColumnStyle>,
    pub table_row: Option<TableRowStyle>,
    pub table_cell: Option<TableCellStyle>,
    pub graphic: Option<GraphicStyle>,
}

impl ResolvedStyle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no category is present.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.paragraph.is_none()
            && self.table.is_none()
            && self.table_column.is_none()
            && self.table_row.is_none()
            && self.table_cell.is_none()
            && self.graphic.is_none()
    }
}

impl Override for ResolvedStyle {
    fn override_with(&mut self, other: &Self) {
        override_category(&mut self.text, &other.text);
        override_category(&mut self.paragraph, &other.paragraph);
        override_category(&mut self.table, &other.table);
        override_category(&mut self.table_column, &other.table_column);
        override_category(&mut self.table_row, &other.table_row);
        override_category(&mut self.table_cell, &other.table_cell);
        override_category(&mut self.graphic, &other.graphic);
    }
}

/// Adopt `incoming` wholesale when `base` lacks the category, merge field by
/// field when both have it.
fn override_category<T: Override + Clone>(base: &mut Option<T>, incoming: &Option<T>) {
    let Some(incoming) = incoming else {
        return;
    };
    match base {
        Some(base) => base.override_with(incoming),
        None => *base = Some(incoming.clone()),
    }
}

/// Merge a more specific style scope into a less specific one.
///
/// Pure: neither argument is modified. Every presence/absence combination is
/// valid, so this never fails.
pub fn override_style(base: &ResolvedStyle, incoming: &ResolvedStyle) -> ResolvedStyle {
    let mut merged = base.clone();
    merged.override_with(incoming);
    merged
}
