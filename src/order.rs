use near_sdk::base64::{engine::general_purpose::STANDARD, Engine};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{env, near, CryptoHash};

use crate::asset::AssetDescriptor;
use crate::error::ValidationFailure;
use crate::splits::SplitCollection;
use crate::utils::{log_draft_event, log_order_event};
use crate::validator::validate_order;

/// A validated, immutable swap order ready to hand to a settlement contract.
///
/// Instances come from [`SwapOrder::build`] or from decoding a JSON/borsh
/// payload, and both paths run the full order validation, so every instance
/// satisfies the order invariants.
#[derive(BorshSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[borsh(crate = "near_sdk::borsh")]
#[serde(crate = "near_sdk::serde", try_from = "RawSwapOrder")]
pub struct SwapOrder {
    offered: AssetDescriptor,
    requested: AssetDescriptor,
    splits: SplitCollection,
}

/// Wire shape of [`SwapOrder`] before validation.
#[near(serializers = [json, borsh])]
pub(crate) struct RawSwapOrder {
    pub(crate) offered: AssetDescriptor,
    pub(crate) requested: AssetDescriptor,
    pub(crate) splits: SplitCollection,
}

impl TryFrom<RawSwapOrder> for SwapOrder {
    type Error = ValidationFailure;

    fn try_from(raw: RawSwapOrder) -> Result<Self, Self::Error> {
        Self::checked(raw.offered, raw.requested, raw.splits)
    }
}

impl BorshDeserialize for SwapOrder {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let raw = RawSwapOrder::deserialize_reader(reader)?;
        Self::try_from(raw)
            .map_err(|e| borsh::io::Error::new(borsh::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl SwapOrder {
    pub fn build(
        offered: AssetDescriptor,
        requested: AssetDescriptor,
        splits: SplitCollection,
    ) -> Result<Self, ValidationFailure> {
        let order = Self::checked(offered, requested, splits).map_err(|failure| {
            log_draft_event(
                "BUILD_REJECTED",
                None,
                &format!(
                    "problems='{}', total='{}'",
                    failure.errors.len(),
                    failure.total_percentage
                ),
            );
            failure
        })?;
        log_order_event(
            "BUILT",
            &order.order_hash(),
            &format!("splits='{}'", order.splits.len()),
        );
        Ok(order)
    }

    fn checked(
        offered: AssetDescriptor,
        requested: AssetDescriptor,
        splits: SplitCollection,
    ) -> Result<Self, ValidationFailure> {
        let validity = validate_order(&offered, &requested, &splits);
        if !validity.is_valid() {
            return Err(validity.into_failure());
        }
        Ok(Self {
            offered,
            requested,
            splits,
        })
    }

    pub fn offered(&self) -> &AssetDescriptor {
        &self.offered
    }

    pub fn requested(&self) -> &AssetDescriptor {
        &self.requested
    }

    pub fn splits(&self) -> &SplitCollection {
        &self.splits
    }

    /// Serializes the order into a canonical byte array for signing/verification.
    pub fn to_message_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        BorshSerialize::serialize(self, &mut buffer).expect("Serialization failed");
        buffer
    }

    /// SHA-256 of the canonical bytes. Identifies the order in logs and lets
    /// a settlement contract deduplicate submissions.
    pub fn order_hash(&self) -> CryptoHash {
        env::sha256_array(&self.to_message_bytes())
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_message_bytes())
    }
}
