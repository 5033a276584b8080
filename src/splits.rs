use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::near;
use near_sdk::serde::{Deserialize, Serialize};
use rust_decimal::prelude::ToPrimitive;

use crate::asset::parse_decimal;
use crate::constants::{INITIAL_SPLIT_PERCENTAGE, MAX_SPLITS, MIN_SPLITS, REQUIRED_TOTAL_PERCENTAGE};
use crate::error::AggregateFailure;
use crate::validator;

/// One payee of the offered asset's proceeds.
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentSplit {
    pub recipient: String,
    /// Expected to be 0-100 but never clamped.
    pub percentage: i32,
}

impl PaymentSplit {
    pub fn new(recipient: impl Into<String>, percentage: i32) -> Self {
        Self {
            recipient: recipient.into(),
            percentage,
        }
    }

    pub fn has_recipient(&self) -> bool {
        !self.recipient.trim().is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitField {
    Recipient,
    Percentage,
}

/// Ordered, bounded list of payees. Holds between `MIN_SPLITS` and
/// `MAX_SPLITS` entries at all times; decoding a payload outside those
/// bounds fails.
#[derive(BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[borsh(crate = "near_sdk::borsh")]
#[serde(crate = "near_sdk::serde", try_from = "RawSplitCollection")]
pub struct SplitCollection {
    splits: Vec<PaymentSplit>,
}

/// Wire shape of [`SplitCollection`] before the bounds are checked.
#[near(serializers = [json, borsh])]
pub(crate) struct RawSplitCollection {
    pub(crate) splits: Vec<PaymentSplit>,
}

impl TryFrom<RawSplitCollection> for SplitCollection {
    type Error = AggregateFailure;

    fn try_from(raw: RawSplitCollection) -> Result<Self, Self::Error> {
        Self::from_splits(raw.splits)
    }
}

impl BorshDeserialize for SplitCollection {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let raw = RawSplitCollection::deserialize_reader(reader)?;
        Self::try_from(raw)
            .map_err(|e| borsh::io::Error::new(borsh::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl SplitCollection {
    /// A single unnamed payee taking the whole amount.
    pub fn new() -> Self {
        Self {
            splits: vec![PaymentSplit::new("", INITIAL_SPLIT_PERCENTAGE)],
        }
    }

    pub fn from_splits(splits: Vec<PaymentSplit>) -> Result<Self, AggregateFailure> {
        if !(MIN_SPLITS..=MAX_SPLITS).contains(&splits.len()) {
            return Err(AggregateFailure::SplitCount {
                count: splits.len(),
            });
        }
        Ok(Self { splits })
    }

    pub fn splits(&self) -> &[PaymentSplit] {
        &self.splits
    }

    pub fn get(&self, index: usize) -> Option<&PaymentSplit> {
        self.splits.get(index)
    }

    pub fn len(&self) -> usize {
        self.splits.len()
    }

    // Never true: every constructor and decoder enforces `MIN_SPLITS`.
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentSplit> {
        self.splits.iter()
    }

    pub fn can_add(&self) -> bool {
        self.splits.len() < MAX_SPLITS
    }

    pub fn can_remove(&self) -> bool {
        self.splits.len() > MIN_SPLITS
    }

    /// Appends an empty payee at 0%. Returns `false` and changes nothing when
    /// the collection is full.
    pub fn add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.splits.push(PaymentSplit::new("", 0));
        true
    }

    /// Removes the entry at `index`. Returns `false` and changes nothing when
    /// only one entry is left or `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.splits.len() {
            return false;
        }
        self.splits.remove(index);
        true
    }

    /// Replaces one field of one entry. Percentages are coerced leniently,
    /// see [`coerce_percentage`].
    pub fn update(&mut self, index: usize, field: SplitField, value: &str) -> bool {
        let Some(split) = self.splits.get_mut(index) else {
            return false;
        };
        match field {
            SplitField::Recipient => split.recipient = value.to_string(),
            SplitField::Percentage => split.percentage = coerce_percentage(value),
        }
        true
    }

    pub fn total_percentage(&self) -> i64 {
        validator::total_percentage(&self.splits)
    }

    /// How much is left to allocate. Negative when over-allocated.
    pub fn remaining_percentage(&self) -> i64 {
        REQUIRED_TOTAL_PERCENTAGE - self.total_percentage()
    }
}

impl Default for SplitCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a SplitCollection {
    type Item = &'a PaymentSplit;
    type IntoIter = std::slice::Iter<'a, PaymentSplit>;

    fn into_iter(self) -> Self::IntoIter {
        self.splits.iter()
    }
}

/// Turns raw percentage input into a number. Numeric input is truncated
/// toward zero ("12.5" is 12, "1e2" is 100). Anything that is not a number
/// ("abc", "", "1_0") or does not fit in `i32` becomes 0 so a half-typed
/// field never blocks editing.
pub fn coerce_percentage(value: &str) -> i32 {
    let value = value.trim();
    if let Ok(parsed) = value.parse::<i32>() {
        return parsed;
    }
    parse_decimal(value)
        .ok()
        .and_then(|d| d.trunc().to_i32())
        .unwrap_or(0)
}
