//! Composition and validation of peer-to-peer swap orders.
//!
//! A [`SwapDraft`] collects the offered asset, the requested asset and the
//! payment splits for the offered side. It revalidates after every edit and
//! produces an immutable [`SwapOrder`] once all invariants hold. Submitting the
//! order is delegated to a [`SettlementSubmitter`].

use near_sdk::ext_contract;

mod asset;
mod constants;
mod draft;
mod error;
mod order;
mod settlement;
mod splits;
mod utils;
pub mod validator;

pub use asset::{AssetDescriptor, AssetField, AssetKind, Side};
pub use constants::{
    DEFAULT_SETTLEMENT_GAS, INITIAL_SPLIT_PERCENTAGE, MAX_SPLITS, MIN_SPLITS, NATIVE_DECIMALS,
    REQUIRED_TOTAL_PERCENTAGE,
};
pub use draft::SwapDraft;
pub use error::{
    AggregateFailure, FieldFailure, SettlementError, SubmitError, ValidationError,
    ValidationFailure,
};
pub use order::SwapOrder;
pub use settlement::{
    ConnectedWallet, NearSettlement, SettlementConfig, SettlementSubmitter, WalletContext,
};
pub use splits::{coerce_percentage, PaymentSplit, SplitCollection, SplitField};
pub use validator::OrderValidity;

// External contract interfaces
#[ext_contract(ext_settlement)]
pub trait SwapSettlement {
    fn create_swap(&mut self, order: SwapOrder);
}
