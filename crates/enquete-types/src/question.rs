//! Questions, their type-specific payloads, and the question-type catalog.
//!
//! ## Design: QuestionType + QuestionKind
//!
//! `QuestionType` is the bare tag (what a caller names when adding a
//! question). `QuestionKind` is the tagged payload: one variant per type,
//! each carrying only the attributes that make sense for it. A numeric
//! question cannot hold options and a dropdown cannot hold a rating scale,
//! because there is nowhere to put them.
//!
//! Construction goes through [`QuestionKind::build`], which checks the loose
//! caller input (option texts + a bag of optional attributes) against the
//! type's [`TypeDescriptor`] before anything lands in a survey.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::{OptionId, QuestionId};

/// Default number of points on a rating scale.
pub const DEFAULT_RATING_SCALE: u32 = 5;

/// Smallest and largest rating scale accepted.
pub const RATING_SCALE_RANGE: std::ops::RangeInclusive<u32> = 2..=10;

/// Error from building a question out of caller input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("question text must not be empty")]
    EmptyLabel,
    #[error("{0} questions require at least one option")]
    OptionsRequired(QuestionType),
    #[error("{0} questions do not take options")]
    OptionsNotAllowed(QuestionType),
    #[error("option {0} has empty text")]
    EmptyOptionText(usize),
    #[error("attribute '{attribute}' is not valid for {question_type} questions")]
    AttributeNotAllowed {
        attribute: &'static str,
        question_type: QuestionType,
    },
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
    #[error("rating scale {0} is outside 2..=10")]
    ScaleOutOfRange(u32),
}

/// The enumerated question types.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum QuestionType {
    /// Pick exactly one option.
    #[strum(
        serialize = "single_select",
        serialize = "single-select",
        serialize = "radio"
    )]
    SingleSelect,
    /// Pick any number of options.
    #[strum(
        serialize = "multi_select",
        serialize = "multi-select",
        serialize = "multiple_choice",
        serialize = "checkbox"
    )]
    MultiSelect,
    /// Free-form text answer.
    #[strum(
        serialize = "open_text",
        serialize = "open-text",
        serialize = "text",
        serialize = "textarea"
    )]
    OpenText,
    /// Pick one option from a collapsed list.
    #[strum(serialize = "dropdown", serialize = "select")]
    Dropdown,
    /// A number, optionally bounded.
    #[strum(serialize = "numeric", serialize = "number")]
    Numeric,
    /// A point on a fixed scale.
    #[strum(serialize = "rating", serialize = "scale")]
    Rating,
}

impl QuestionType {
    /// All types in catalog order.
    pub const ALL: [QuestionType; 6] = [
        QuestionType::SingleSelect,
        QuestionType::MultiSelect,
        QuestionType::OpenText,
        QuestionType::Dropdown,
        QuestionType::Numeric,
        QuestionType::Rating,
    ];

    /// Parse from string (case-insensitive).
    ///
    /// Supports aliases: "radio" -> SingleSelect, "multiple_choice"/"checkbox"
    /// -> MultiSelect, "text"/"textarea" -> OpenText, "select" -> Dropdown,
    /// "number" -> Numeric, "scale" -> Rating.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s.trim()).ok()
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleSelect => "single_select",
            QuestionType::MultiSelect => "multi_select",
            QuestionType::OpenText => "open_text",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Numeric => "numeric",
            QuestionType::Rating => "rating",
        }
    }

    /// Whether this type carries an option list.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleSelect | QuestionType::MultiSelect | QuestionType::Dropdown
        )
    }

    /// Static read-model entry for this type.
    pub fn descriptor(&self) -> TypeDescriptor {
        let (description, required, optional): (&str, &[&str], &[&str]) = match self {
            QuestionType::SingleSelect => (
                "Single answer from a list of options (radio buttons)",
                &["options"],
                &["display"],
            ),
            QuestionType::MultiSelect => (
                "Any number of answers from a list of options (checkboxes)",
                &["options"],
                &["min_selections", "max_selections"],
            ),
            QuestionType::OpenText => (
                "Free-form text answer",
                &[],
                &["multiline", "placeholder"],
            ),
            QuestionType::Dropdown => (
                "Single answer from a collapsed list of options",
                &["options"],
                &["placeholder"],
            ),
            QuestionType::Numeric => (
                "Numeric answer with optional bounds",
                &[],
                &["min_value", "max_value"],
            ),
            QuestionType::Rating => (
                "A point on a rating scale (default 1-5)",
                &[],
                &["scale"],
            ),
        };
        TypeDescriptor {
            question_type: *self,
            description,
            choice_based: self.is_choice(),
            required,
            optional,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-model description of one question type: which attributes it needs
/// and which it accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub description: &'static str,
    pub choice_based: bool,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl TypeDescriptor {
    /// Whether `attribute` is required or optional for this type.
    pub fn accepts(&self, attribute: &str) -> bool {
        self.required.contains(&attribute) || self.optional.contains(&attribute)
    }
}

/// The full catalog, one descriptor per type.
pub fn question_type_catalog() -> Vec<TypeDescriptor> {
    QuestionType::ALL.iter().map(|t| t.descriptor()).collect()
}

/// A selectable answer inside a choice question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: OptionId,
    pub text: String,
}

/// Layout hint for single-select questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Vertical,
    Horizontal,
}

/// Loose, caller-supplied type-specific attributes.
///
/// Everything is optional here; [`QuestionKind::build`] decides which ones
/// are meaningful for the requested type and rejects the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl QuestionAttributes {
    /// Names of the attributes that are set.
    pub fn present(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.min_selections.is_some() {
            names.push("min_selections");
        }
        if self.max_selections.is_some() {
            names.push("max_selections");
        }
        if self.min_value.is_some() {
            names.push("min_value");
        }
        if self.max_value.is_some() {
            names.push("max_value");
        }
        if self.scale.is_some() {
            names.push("scale");
        }
        if self.display.is_some() {
            names.push("display");
        }
        if self.multiline.is_some() {
            names.push("multiline");
        }
        if self.placeholder.is_some() {
            names.push("placeholder");
        }
        names
    }
}

/// Type-specific payload of a question, tagged by `type` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    SingleSelect {
        options: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display: Option<DisplayStyle>,
    },
    MultiSelect {
        options: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_selections: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_selections: Option<u32>,
    },
    OpenText {
        #[serde(default)]
        multiline: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Dropdown {
        options: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Numeric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
    },
    Rating {
        scale: u32,
    },
}

impl QuestionKind {
    /// Build a validated payload from caller input.
    ///
    /// Option IDs are positional: the option at index `i` gets `opt_i`.
    pub fn build(
        question_type: QuestionType,
        option_texts: Vec<String>,
        attrs: QuestionAttributes,
    ) -> Result<Self, ModelError> {
        let descriptor = question_type.descriptor();
        if let Some(attribute) = attrs.present().into_iter().find(|a| !descriptor.accepts(a)) {
            return Err(ModelError::AttributeNotAllowed {
                attribute,
                question_type,
            });
        }

        let options = if question_type.is_choice() {
            if option_texts.is_empty() {
                return Err(ModelError::OptionsRequired(question_type));
            }
            build_choices(option_texts)?
        } else {
            if !option_texts.is_empty() {
                return Err(ModelError::OptionsNotAllowed(question_type));
            }
            Vec::new()
        };

        let kind = match question_type {
            QuestionType::SingleSelect => QuestionKind::SingleSelect {
                options,
                display: attrs.display,
            },
            QuestionType::MultiSelect => {
                if let (Some(min), Some(max)) = (attrs.min_selections, attrs.max_selections) {
                    if min > max {
                        return Err(ModelError::InvalidBounds(format!(
                            "min_selections {min} exceeds max_selections {max}"
                        )));
                    }
                }
                for (name, bound) in [
                    ("min_selections", attrs.min_selections),
                    ("max_selections", attrs.max_selections),
                ] {
                    if let Some(n) = bound.filter(|&n| n as usize > options.len()) {
                        return Err(ModelError::InvalidBounds(format!(
                            "{name} {n} exceeds option count {}",
                            options.len()
                        )));
                    }
                }
                QuestionKind::MultiSelect {
                    options,
                    min_selections: attrs.min_selections,
                    max_selections: attrs.max_selections,
                }
            }
            QuestionType::OpenText => QuestionKind::OpenText {
                multiline: attrs.multiline.unwrap_or(false),
                placeholder: attrs.placeholder,
            },
            QuestionType::Dropdown => QuestionKind::Dropdown {
                options,
                placeholder: attrs.placeholder,
            },
            QuestionType::Numeric => {
                if let (Some(min), Some(max)) = (attrs.min_value, attrs.max_value) {
                    if min > max {
                        return Err(ModelError::InvalidBounds(format!(
                            "min_value {min} exceeds max_value {max}"
                        )));
                    }
                }
                QuestionKind::Numeric {
                    min_value: attrs.min_value,
                    max_value: attrs.max_value,
                }
            }
            QuestionType::Rating => {
                let scale = attrs.scale.unwrap_or(DEFAULT_RATING_SCALE);
                if !RATING_SCALE_RANGE.contains(&scale) {
                    return Err(ModelError::ScaleOutOfRange(scale));
                }
                QuestionKind::Rating { scale }
            }
        };
        Ok(kind)
    }

    /// The bare type tag.
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::SingleSelect { .. } => QuestionType::SingleSelect,
            QuestionKind::MultiSelect { .. } => QuestionType::MultiSelect,
            QuestionKind::OpenText { .. } => QuestionType::OpenText,
            QuestionKind::Dropdown { .. } => QuestionType::Dropdown,
            QuestionKind::Numeric { .. } => QuestionType::Numeric,
            QuestionKind::Rating { .. } => QuestionType::Rating,
        }
    }

    /// Options for choice types; empty for everything else.
    pub fn options(&self) -> &[Choice] {
        match self {
            QuestionKind::SingleSelect { options, .. }
            | QuestionKind::MultiSelect { options, .. }
            | QuestionKind::Dropdown { options, .. } => options,
            _ => &[],
        }
    }
}

fn build_choices(texts: Vec<String>) -> Result<Vec<Choice>, ModelError> {
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            if text.trim().is_empty() {
                return Err(ModelError::EmptyOptionText(index));
            }
            Ok(Choice {
                id: OptionId::positional(index),
                text,
            })
        })
        .collect()
}

/// A single question inside a block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub label: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Create a question with a freshly minted ID.
    pub fn new(
        label: impl Into<String>,
        required: bool,
        kind: QuestionKind,
    ) -> Result<Self, ModelError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        Ok(Self {
            id: QuestionId::new(),
            label,
            required,
            kind,
        })
    }

    /// The bare type tag.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Options for choice types; empty for everything else.
    pub fn options(&self) -> &[Choice] {
        self.kind.options()
    }
}

// ============================================================================
// Tests
// ============================================================================
