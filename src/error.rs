//! Validation and submission errors.
//!
//! Validation problems are values, not panics: the draft stays editable and
//! the caller decides how to render them.

use near_sdk::near;
use thiserror::Error;

use crate::asset::Side;

/// A single descriptor or split field that fails its invariant.
#[near(serializers = [json])]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FieldFailure {
    #[error("{side} asset: contract address is required")]
    MissingContractAddress { side: Side },

    #[error("{side} asset: token id is required")]
    MissingTokenId { side: Side },

    #[error("{side} asset: amount '{value}' must be a number greater than zero")]
    InvalidAmount { side: Side, value: String },

    #[error("{side} asset: amount '{value}' has more digits than can be represented exactly")]
    UnrepresentableAmount { side: Side, value: String },

    #[error("split {index}: recipient is required")]
    EmptyRecipient { index: usize },
}

/// A problem with the split collection as a whole.
#[near(serializers = [json])]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AggregateFailure {
    #[error("Total percentage must equal 100%, got {total}%")]
    PercentageTotal { total: i64 },

    #[error("Split count {count} is outside 1..=5")]
    SplitCount { count: usize },
}

#[near(serializers = [json])]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldFailure),

    #[error(transparent)]
    Aggregate(#[from] AggregateFailure),
}

/// Why an order could not be built. Carries every failing invariant plus
/// the live percentage total.
#[near(serializers = [json])]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Swap order is not valid ({} problem(s), {total_percentage}% allocated)", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
    pub total_percentage: i64,
}

impl ValidationFailure {
    pub fn has_field_failure(&self, failure: &FieldFailure) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, ValidationError::Field(f) if f == failure))
    }

    pub fn has_aggregate_failure(&self, failure: &AggregateFailure) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, ValidationError::Aggregate(a) if a == failure))
    }
}

/// Errors raised by the NEAR settlement submitter itself.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Offered amount '{amount}' cannot be expressed in yoctoNEAR")]
    UnconvertibleAmount { amount: String },
}

/// Outcome of a failed submission attempt. Settlement errors are carried
/// exactly as the collaborator returned them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError<E> {
    #[error("No signer is available")]
    NoSigner,

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error("Settlement failed: {0}")]
    Settlement(E),
}
