use std::fmt;

use near_sdk::near;
use rust_decimal::Decimal;

use crate::error::FieldFailure;

/// Native NEAR, a NEP-141 fungible token or a NEP-171 non-fungible token.
#[near(serializers = [json, borsh])]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetKind {
    #[default]
    Native,
    Fungible,
    NonFungible,
}

/// Which side of the trade a descriptor describes.
#[near(serializers = [json, borsh])]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Offered,
    Requested,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Offered => write!(f, "offered"),
            Side::Requested => write!(f, "requested"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetField {
    ContractAddress,
    TokenId,
    Amount,
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetField::ContractAddress => write!(f, "contract_address"),
            AssetField::TokenId => write!(f, "token_id"),
            AssetField::Amount => write!(f, "amount"),
        }
    }
}

/// One side of a swap.
///
/// Fields that do not apply to the current `kind` may still hold values from
/// an earlier kind. They are kept as-is and ignored by validation.
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub kind: AssetKind,
    pub contract_address: Option<String>,
    pub token_id: Option<String>,
    /// Human-readable decimal amount, e.g. "1.5".
    pub amount: Option<String>,
}

impl AssetDescriptor {
    pub fn native(amount: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Native,
            amount: Some(amount.into()),
            ..Default::default()
        }
    }

    pub fn fungible(contract_address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Fungible,
            contract_address: Some(contract_address.into()),
            amount: Some(amount.into()),
            ..Default::default()
        }
    }

    pub fn non_fungible(contract_address: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::NonFungible,
            contract_address: Some(contract_address.into()),
            token_id: Some(token_id.into()),
            ..Default::default()
        }
    }

    /// Changes the kind without touching any other field.
    pub fn set_kind(&mut self, kind: AssetKind) {
        self.kind = kind;
    }

    pub fn set_field(&mut self, field: AssetField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            AssetField::ContractAddress => self.contract_address = value,
            AssetField::TokenId => self.token_id = value,
            AssetField::Amount => self.amount = value,
        }
    }

    /// Parses `amount` as a plain or scientific decimal. Unparseable input is
    /// `None`, never zero.
    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_decimal(self.amount.as_deref()?).ok()
    }

    /// Converts `amount` into integer base units with the given number of
    /// decimals.
    ///
    /// Returns `None` if the amount is missing, negative, carries more
    /// fractional digits than `decimals` allows, or does not fit in `u128`.
    pub fn amount_in_base_units(&self, decimals: u32) -> Option<u128> {
        let amount = self.parsed_amount()?.normalize();
        if amount.is_sign_negative() && !amount.is_zero() {
            return None;
        }
        let scale = amount.scale();
        if scale > decimals {
            return None;
        }
        let mantissa = u128::try_from(amount.mantissa()).ok()?;
        let multiplier = 10u128.checked_pow(decimals - scale)?;
        mantissa.checked_mul(multiplier)
    }

    pub fn is_well_formed(&self) -> bool {
        self.failures(Side::Offered).is_empty()
    }

    /// Every field-level problem for the current kind, in field order.
    pub fn failures(&self, side: Side) -> Vec<FieldFailure> {
        let needs_contract = self.kind != AssetKind::Native;
        let needs_token_id = self.kind == AssetKind::NonFungible;
        let needs_amount = self.kind != AssetKind::NonFungible;

        let mut failures = Vec::new();
        if needs_contract && !is_present(&self.contract_address) {
            failures.push(FieldFailure::MissingContractAddress { side });
        }
        if needs_token_id && !is_present(&self.token_id) {
            failures.push(FieldFailure::MissingTokenId { side });
        }
        if needs_amount {
            let value = self.amount.clone().unwrap_or_default();
            match parse_decimal(&value) {
                Ok(amount) if amount > Decimal::ZERO => {}
                Err(DecimalInputError::Unrepresentable) => {
                    failures.push(FieldFailure::UnrepresentableAmount { side, value })
                }
                _ => failures.push(FieldFailure::InvalidAmount { side, value }),
            }
        }
        failures
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecimalInputError {
    /// Empty or not a decimal literal at all.
    Malformed,
    /// A well-formed literal with more digits than `Decimal` holds exactly.
    Unrepresentable,
}

/// Strict decimal parse shared by amounts and percentages.
///
/// Accepts `[+-]digits[.digits][e[+-]digits]` after trimming. Digit
/// separators are rejected, and input that would have to be rounded to fit
/// is reported instead of collapsing to a different value.
pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, DecimalInputError> {
    let raw = raw.trim();
    let (mantissa, exponent) = match raw.find(['e', 'E']) {
        Some(at) => (&raw[..at], Some(&raw[at + 1..])),
        None => (raw, None),
    };
    if !is_decimal_literal(mantissa, exponent) {
        return Err(DecimalInputError::Malformed);
    }

    let parsed = match exponent {
        Some(_) => Decimal::from_scientific(raw),
        None => Decimal::from_str_exact(strip_trailing_zeros(raw)),
    };
    parsed.map_err(|_| DecimalInputError::Unrepresentable)
}

fn is_decimal_literal(mantissa: &str, exponent: Option<&str>) -> bool {
    let (int, frac) = unsigned(mantissa).split_once('.').unwrap_or((unsigned(mantissa), ""));
    let mantissa_ok = all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty());

    let exponent_ok = exponent
        .map(|e| !unsigned(e).is_empty() && all_digits(unsigned(e)))
        .unwrap_or(true);
    mantissa_ok && exponent_ok
}

fn unsigned(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// "1.500" and "1.5" are the same amount; only significant digits count
// against precision.
fn strip_trailing_zeros(raw: &str) -> &str {
    if !raw.contains('.') {
        return raw;
    }
    raw.trim_end_matches('0').trim_end_matches('.')
}

fn is_present(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}
