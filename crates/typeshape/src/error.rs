// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for type inference.
//!
//! Every variant here is recoverable: it aborts the current top-level
//! inference call and leaves the [`TypeCache`](crate::TypeCache) untouched for
//! the failing type. Broken [`TypeMarshaler`](crate::TypeMarshaler) contracts
//! and panics raised inside hooks are not represented; they unwind.

use std::error::Error;
use std::fmt;

/// Error returned by a [`TypeMarshaler`](crate::TypeMarshaler) hook.
pub type HookError = Box<dyn Error + Send + Sync + 'static>;

/// Inference failure modes.
#[derive(Debug)]
pub enum InferError {
    /// The native type has no structural mapping (channels, function pointers).
    UnsupportedType {
        /// Rust type name as reported by `std::any::type_name`.
        type_name: String,
        /// Short name of the unsupported kind (e.g. "channel").
        kind: &'static str,
    },
    /// An explicit field name does not match the identifier grammar.
    InvalidFieldName {
        /// Offending name.
        name: String,
    },
    /// A tag carried a token that is not a known directive.
    UnrecognizedTag {
        /// Offending token.
        token: String,
    },
    /// A named field is not externally visible.
    NonVisibleField {
        /// Struct owning the field.
        type_name: String,
        /// Declared field name.
        field: String,
    },
    /// Two fields resolved to the same name (usually through flattening).
    DuplicateFieldName {
        /// Struct owning the fields.
        type_name: String,
        /// Colliding name.
        name: String,
    },
    /// A custom type hook returned an error. The hook's error is kept as-is.
    CustomHook(HookError),
}

impl InferError {
    /// Returns the hook's own error if this failure came from a [`TypeMarshaler`](crate::TypeMarshaler).
    pub fn hook_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::CustomHook(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { type_name, kind } => {
                write!(f, "Type is not supported, type: {} ({})", type_name, kind)
            }
            Self::InvalidFieldName { name } => write!(f, "Invalid struct field name: {}", name),
            Self::UnrecognizedTag { token } => write!(f, "Unrecognized tag: {}", token),
            Self::NonVisibleField { type_name, .. } => {
                write!(f, "Non exported fields are not supported, type: {}", type_name)
            }
            Self::DuplicateFieldName { type_name, name } => {
                write!(f, "Duplicate struct field name: {}, type: {}", name, type_name)
            }
            Self::CustomHook(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for InferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CustomHook(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<HookError> for InferError {
    fn from(value: HookError) -> Self {
        Self::CustomHook(value)
    }
}
