//! The order-in-progress for one composition session.
//!
//! Every mutation recomputes validity before it returns, so `validity()`
//! always reflects the current fields.

use crate::asset::{AssetDescriptor, AssetField, AssetKind, Side};
use crate::error::{SubmitError, ValidationFailure};
use crate::order::SwapOrder;
use crate::settlement::{SettlementSubmitter, WalletContext};
use crate::splits::{SplitCollection, SplitField};
use crate::utils::log_draft_event;
use crate::validator::{validate_order, OrderValidity};

#[derive(Clone, Debug)]
pub struct SwapDraft {
    offered: AssetDescriptor,
    requested: AssetDescriptor,
    splits: SplitCollection,
    validity: OrderValidity,
}

impl SwapDraft {
    /// Both sides native and empty, one payee at 100%.
    pub fn new() -> Self {
        Self::from_parts(
            AssetDescriptor::default(),
            AssetDescriptor::default(),
            SplitCollection::new(),
        )
    }

    pub fn from_parts(
        offered: AssetDescriptor,
        requested: AssetDescriptor,
        splits: SplitCollection,
    ) -> Self {
        let validity = validate_order(&offered, &requested, &splits);
        Self {
            offered,
            requested,
            splits,
            validity,
        }
    }

    pub fn offered(&self) -> &AssetDescriptor {
        &self.offered
    }

    pub fn requested(&self) -> &AssetDescriptor {
        &self.requested
    }

    pub fn asset(&self, side: Side) -> &AssetDescriptor {
        match side {
            Side::Offered => &self.offered,
            Side::Requested => &self.requested,
        }
    }

    pub fn splits(&self) -> &SplitCollection {
        &self.splits
    }

    pub fn validity(&self) -> &OrderValidity {
        &self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    pub fn total_percentage(&self) -> i64 {
        self.validity.total_percentage
    }

    // --- MUTATIONS ---

    pub fn set_asset_kind(&mut self, side: Side, kind: AssetKind) -> &OrderValidity {
        self.asset_mut(side).set_kind(kind);
        log_draft_event("ASSET_KIND_CHANGED", Some(side), &format!("kind='{:?}'", kind));
        self.revalidate()
    }

    pub fn set_asset_field(&mut self, side: Side, field: AssetField, value: &str) -> &OrderValidity {
        self.asset_mut(side).set_field(field, value);
        log_draft_event("ASSET_FIELD_CHANGED", Some(side), &format!("field='{}'", field));
        self.revalidate()
    }

    pub fn add_split(&mut self) -> &OrderValidity {
        if self.splits.add() {
            log_draft_event("SPLIT_ADDED", None, &format!("count='{}'", self.splits.len()));
        } else {
            log_draft_event("SPLIT_ADD_REJECTED", None, &format!("count='{}'", self.splits.len()));
        }
        self.revalidate()
    }

    pub fn remove_split(&mut self, index: usize) -> &OrderValidity {
        if self.splits.remove(index) {
            log_draft_event(
                "SPLIT_REMOVED",
                None,
                &format!("index='{}', count='{}'", index, self.splits.len()),
            );
        } else {
            log_draft_event(
                "SPLIT_REMOVE_REJECTED",
                None,
                &format!("index='{}', count='{}'", index, self.splits.len()),
            );
        }
        self.revalidate()
    }

    pub fn update_split(&mut self, index: usize, field: SplitField, value: &str) -> &OrderValidity {
        if self.splits.update(index, field, value) {
            log_draft_event(
                "SPLIT_UPDATED",
                None,
                &format!("index='{}', field='{:?}'", index, field),
            );
        }
        self.revalidate()
    }

    // --- SNAPSHOT & SUBMISSION ---

    /// Snapshots the draft into an immutable order. The draft itself is left
    /// untouched either way.
    pub fn build(&self) -> Result<SwapOrder, ValidationFailure> {
        SwapOrder::build(
            self.offered.clone(),
            self.requested.clone(),
            self.splits.clone(),
        )
    }

    /// Builds the order and hands it to `submitter` exactly once.
    pub fn submit<W, S>(
        &self,
        wallet: &W,
        submitter: &S,
    ) -> Result<S::Receipt, SubmitError<S::Error>>
    where
        W: WalletContext,
        S: SettlementSubmitter,
    {
        if !wallet.signer_available() {
            log_draft_event("SUBMIT_BLOCKED", None, "reason='no_signer'");
            return Err(SubmitError::NoSigner);
        }
        let order = self.build()?;
        submitter.submit(order).map_err(SubmitError::Settlement)
    }

    fn asset_mut(&mut self, side: Side) -> &mut AssetDescriptor {
        match side {
            Side::Offered => &mut self.offered,
            Side::Requested => &mut self.requested,
        }
    }

    fn revalidate(&mut self) -> &OrderValidity {
        self.validity = validate_order(&self.offered, &self.requested, &self.splits);
        &self.validity
    }
}

impl Default for SwapDraft {
    fn default() -> Self {
        Self::new()
    }
}
