//! Class definitions for the color segmenter.
//!
//! Defaults reproduce the thresholds of the overhead-camera setup this crate
//! was tuned on: red start marker (two hue ranges around 0/180), blue goal
//! marker, green obstacles and white boundary lines.

use crate::color::HsvRange;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One semantic class defined by HSV ranges that are OR-ed together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorClass {
    pub name: String,
    pub ranges: Vec<HsvRange>,
}

impl ColorClass {
    pub fn new(name: impl Into<String>, ranges: Vec<HsvRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }
}

/// A class formed by OR-ing already computed masks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeClass {
    pub name: String,
    pub members: Vec<String>,
}

impl CompositeClass {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Classes and composites evaluated for every frame.
///
/// Composites are resolved in declaration order and may reference plain
/// classes or composites declared before them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    pub classes: Vec<ColorClass>,
    pub composites: Vec<CompositeClass>,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            classes: vec![
                ColorClass::new(
                    "red",
                    vec![
                        HsvRange::new([0, 120, 20], [10, 255, 255]),
                        HsvRange::new([170, 120, 20], [180, 255, 255]),
                    ],
                ),
                ColorClass::new("blue", vec![HsvRange::new([85, 120, 20], [135, 255, 255])]),
                ColorClass::new("green", vec![HsvRange::new([40, 0, 20], [80, 255, 255])]),
                ColorClass::new("white", vec![HsvRange::new([0, 0, 0], [0, 0, 255])]),
            ],
            composites: vec![
                CompositeClass::new("navigable", &["blue", "red"]),
                CompositeClass::new("obstacle", &["green", "white"]),
            ],
        }
    }
}

impl SegmenterParams {
    /// Names of every mask the segmenter produces, classes first.
    pub fn mask_names(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.composites.iter().map(|c| c.name.as_str()))
    }

    pub fn has_mask(&self, name: &str) -> bool {
        self.mask_names().any(|n| n == name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for class in &self.classes {
            if class.name.is_empty() {
                return Err(ConfigError::EmptyClassName);
            }
            if !seen.insert(&class.name) {
                return Err(ConfigError::DuplicateClass(class.name.clone()));
            }
            if class.ranges.is_empty() {
                return Err(ConfigError::NoRanges(class.name.clone()));
            }
            for range in &class.ranges {
                range.validate(&class.name)?;
            }
        }
        for composite in &self.composites {
            if composite.name.is_empty() {
                return Err(ConfigError::EmptyClassName);
            }
            if composite.members.is_empty() {
                return Err(ConfigError::invalid(
                    "composites",
                    format!("composite `{}` has no members", composite.name),
                ));
            }
            for member in &composite.members {
                if !seen.contains(member.as_str()) {
                    return Err(ConfigError::unknown_class(
                        format!("composite `{}`", composite.name),
                        member.clone(),
                    ));
                }
            }
            if !seen.insert(&composite.name) {
                return Err(ConfigError::DuplicateClass(composite.name.clone()));
            }
        }
        Ok(())
    }
}
