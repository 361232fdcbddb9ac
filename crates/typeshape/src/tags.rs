// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field tag parsing and field name resolution.
//!
//! A tag is the string attached to a field with `#[shape(tag = "...")]`:
//!
//! | Tag                  | Effect                                          |
//! |----------------------|-------------------------------------------------|
//! | `-`                  | field is skipped                                |
//! | `name`               | field is renamed                                |
//! | `,omitempty`         | field is optional                               |
//! | `,set`               | sequence (or marker-valued map) becomes a `Set` |
//! | `,original`          | field carries the original value, no descriptor |
//! | `name,omitempty,set` | directives combine                              |

use crate::error::InferError;

const OMIT_EMPTY: &str = "omitempty";
const SET: &str = "set";
const ORIGINAL: &str = "original";

/// Directives parsed from a field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    /// Explicit field name.
    pub name: Option<String>,
    pub skip: bool,
    pub omit_empty: bool,
    pub set: bool,
    pub original: bool,
}

impl FieldTags {
    /// Parse a comma-separated tag string. An empty tag yields the defaults.
    pub fn parse(tag: &str) -> Result<Self, InferError> {
        let mut tokens = tag.split(',');
        let mut tags = Self::default();

        let first = tokens.next().unwrap_or_default();
        if first == "-" {
            tags.skip = true;
            return Ok(tags);
        }
        if !first.is_empty() && !tags.apply_directive(first) {
            tags.name = Some(first.to_string());
        }

        for token in tokens {
            if !tags.apply_directive(token) {
                return Err(InferError::UnrecognizedTag {
                    token: token.to_string(),
                });
            }
        }
        Ok(tags)
    }

    fn apply_directive(&mut self, token: &str) -> bool {
        match token {
            OMIT_EMPTY => self.omit_empty = true,
            SET => self.set = true,
            ORIGINAL => self.original = true,
            _ => return false,
        }
        true
    }
}

/// Returns `true` if `name` starts with a letter and continues with letters,
/// digits or underscores.
pub fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Descriptor name for a field: the explicit name when given, otherwise the
/// declared name with its first character lowercased. Either must pass
/// [`is_valid_field_name`].
pub fn resolve_field_name(declared: &str, explicit: Option<&str>) -> Result<String, InferError> {
    let name = match explicit {
        Some(name) => name.to_string(),
        None => default_field_name(declared),
    };
    if is_valid_field_name(&name) {
        Ok(name)
    } else {
        Err(InferError::InvalidFieldName { name })
    }
}

fn default_field_name(declared: &str) -> String {
    let mut chars = declared.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
