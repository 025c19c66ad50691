// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Engine-level failures. The CLI layer wraps these in `anyhow` with context;
/// callers embedding the engines can match on the variants directly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A task's rotation order is empty. Rejected at task creation and again
    /// on completion so the round-robin never divides by zero.
    #[error("rotation order is empty")]
    InvalidRotation,

    /// An expense has neither a non-empty equal-split member list nor a
    /// non-empty custom share map. Rejected at the store boundary.
    #[error("expense '{0}' has no split members and no custom shares")]
    DegenerateSplit(String),

    /// Custom shares must sum to the expense amount within 0.01.
    #[error("custom shares sum to {got} but the expense amount is {want}")]
    ShareMismatch { want: Decimal, got: Decimal },

    /// Every custom share must be a positive amount; a zero or negative
    /// share would silently invert a member's debt.
    #[error("share for '{member}' must be positive, got {share}")]
    InvalidShare { member: String, share: Decimal },
}
