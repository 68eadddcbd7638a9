// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Error taxonomy for encode/decode passes.
//!
//! Every variant is fatal for the current pass: errors are raised at the
//! point of detection and propagate with `?` through every enclosing codec
//! to the top-level caller. Nothing is retried or locally recovered.

use crate::wire::WireError;
use std::fmt;

/// Codec-level error raised during an encode or decode pass.
#[derive(Debug)]
pub enum CodecError {
    /// No codec registered for a runtime type encountered during encode, or
    /// named by a type token during decode.
    CodecNotFound { type_name: String },
    /// A `ConcreteValue` field arrived without its required type token.
    /// Indicates a malformed or incompatible stream.
    FieldTypeMissing { expected: &'static str },
    /// A `Reference` field named an id this pass has not decoded yet.
    /// References may only point backward.
    DanglingReference { id: u32 },
    /// The decoded value's runtime type is not assignable to the field's
    /// declared abstract type.
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
    /// Raw buffer failure: truncation, malformed tag, or varint overflow.
    Wire(WireError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodecNotFound { type_name } => {
                write!(f, "no codec registered for type {}", type_name)
            }
            Self::FieldTypeMissing { expected } => {
                write!(
                    f,
                    "concrete-value field of declared type {} is missing its type token",
                    expected
                )
            }
            Self::DanglingReference { id } => {
                write!(f, "reference id {} has not been decoded yet", id)
            }
            Self::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "decoded value of type {} is not assignable to {}",
                    actual, expected
                )
            }
            Self::Wire(e) => write!(f, "wire error: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for CodecError {
    fn from(e: WireError) -> Self {
        Self::Wire(e)
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
