//! Pure order validation.
//!
//! Nothing here mutates its inputs or caches results. With at most five
//! splits a full recomputation after every edit is cheap.

use crate::asset::{AssetDescriptor, Side};
use crate::constants::{MAX_SPLITS, MIN_SPLITS, REQUIRED_TOTAL_PERCENTAGE};
use crate::error::{AggregateFailure, FieldFailure, ValidationError, ValidationFailure};
use crate::splits::{PaymentSplit, SplitCollection};

/// Derived validity of an order-in-progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderValidity {
    pub total_percentage: i64,
    /// Exact-equality check of `total_percentage` against 100.
    pub splits_valid: bool,
    failures: Vec<ValidationError>,
}

impl OrderValidity {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ValidationError] {
        &self.failures
    }

    pub fn field_failures(&self) -> impl Iterator<Item = &FieldFailure> {
        self.failures.iter().filter_map(|e| match e {
            ValidationError::Field(f) => Some(f),
            ValidationError::Aggregate(_) => None,
        })
    }

    pub fn aggregate_failures(&self) -> impl Iterator<Item = &AggregateFailure> {
        self.failures.iter().filter_map(|e| match e {
            ValidationError::Aggregate(a) => Some(a),
            ValidationError::Field(_) => None,
        })
    }

    pub fn asset_well_formed(&self, side: Side) -> bool {
        !self.field_failures().any(|f| match f {
            FieldFailure::MissingContractAddress { side: s }
            | FieldFailure::MissingTokenId { side: s }
            | FieldFailure::InvalidAmount { side: s, .. }
            | FieldFailure::UnrepresentableAmount { side: s, .. } => *s == side,
            FieldFailure::EmptyRecipient { .. } => false,
        })
    }

    pub fn into_failure(self) -> ValidationFailure {
        ValidationFailure {
            errors: self.failures,
            total_percentage: self.total_percentage,
        }
    }
}

pub fn total_percentage(splits: &[PaymentSplit]) -> i64 {
    splits.iter().map(|s| i64::from(s.percentage)).sum()
}

pub fn splits_valid(total: i64) -> bool {
    total == REQUIRED_TOTAL_PERCENTAGE
}

pub fn validate_asset(side: Side, asset: &AssetDescriptor) -> Vec<ValidationError> {
    asset
        .failures(side)
        .into_iter()
        .map(ValidationError::Field)
        .collect()
}

/// Checks count, total and recipients of a split collection.
pub fn validate_splits(splits: &SplitCollection) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let count = splits.len();
    if !(MIN_SPLITS..=MAX_SPLITS).contains(&count) {
        errors.push(AggregateFailure::SplitCount { count }.into());
    }

    let total = total_percentage(splits.splits());
    if !splits_valid(total) {
        errors.push(AggregateFailure::PercentageTotal { total }.into());
    }

    for (index, split) in splits.iter().enumerate() {
        if !split.has_recipient() {
            errors.push(FieldFailure::EmptyRecipient { index }.into());
        }
    }

    errors
}

pub fn validate_order(
    offered: &AssetDescriptor,
    requested: &AssetDescriptor,
    splits: &SplitCollection,
) -> OrderValidity {
    let total = total_percentage(splits.splits());

    let mut failures = validate_asset(Side::Offered, offered);
    failures.extend(validate_asset(Side::Requested, requested));
    failures.extend(validate_splits(splits));

    OrderValidity {
        total_percentage: total,
        splits_valid: splits_valid(total),
        failures,
    }
}
