use near_sdk::{AccountId, Gas, NearToken, Promise};

use crate::asset::AssetKind;
use crate::constants::{DEFAULT_SETTLEMENT_GAS, NATIVE_DECIMALS};
use crate::error::SettlementError;
use crate::ext_settlement;
use crate::order::SwapOrder;
use crate::utils::log_order_event;

/// Reports whether the current session has someone able to sign.
/// Implementations never expose key material.
pub trait WalletContext {
    fn signer_available(&self) -> bool;
}

/// Executes a validated order. Errors are returned to the caller as-is.
pub trait SettlementSubmitter {
    type Receipt;
    type Error;

    fn submit(&self, order: SwapOrder) -> Result<Self::Receipt, Self::Error>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectedWallet {
    account_id: Option<AccountId>,
}

impl ConnectedWallet {
    pub fn connected(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
        }
    }

    pub fn disconnected() -> Self {
        Self { account_id: None }
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }
}

impl WalletContext for ConnectedWallet {
    fn signer_available(&self) -> bool {
        self.account_id.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementConfig {
    pub contract_id: AccountId,
    pub gas: Gas,
}

impl SettlementConfig {
    pub fn new(contract_id: AccountId) -> Self {
        Self {
            contract_id,
            gas: DEFAULT_SETTLEMENT_GAS,
        }
    }

    pub fn with_gas(mut self, gas: Gas) -> Self {
        self.gas = gas;
        self
    }
}

/// Hands orders to a settlement contract as a `create_swap` cross-contract
/// call. A native offered asset is attached to the call as deposit.
pub struct NearSettlement {
    config: SettlementConfig,
}

impl NearSettlement {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Deposit to attach for `order`: the offered amount in yoctoNEAR when it
    /// is native, zero otherwise.
    pub fn attached_deposit(&self, order: &SwapOrder) -> Result<NearToken, SettlementError> {
        let offered = order.offered();
        if offered.kind != AssetKind::Native {
            return Ok(NearToken::from_yoctonear(0));
        }
        offered
            .amount_in_base_units(NATIVE_DECIMALS)
            .map(NearToken::from_yoctonear)
            .ok_or_else(|| SettlementError::UnconvertibleAmount {
                amount: offered.amount.clone().unwrap_or_default(),
            })
    }
}

impl SettlementSubmitter for NearSettlement {
    type Receipt = Promise;
    type Error = SettlementError;

    fn submit(&self, order: SwapOrder) -> Result<Promise, SettlementError> {
        let deposit = self.attached_deposit(&order)?;

        log_order_event(
            "DISPATCHED",
            &order.order_hash(),
            &format!(
                "contract='{}', deposit='{}'",
                self.config.contract_id,
                deposit.as_yoctonear()
            ),
        );

        Ok(ext_settlement::ext(self.config.contract_id.clone())
            .with_static_gas(self.config.gas)
            .with_attached_deposit(deposit)
            .create_swap(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetDescriptor;
    use crate::splits::{PaymentSplit, SplitCollection};
    use near_sdk::test_utils::{get_logs, VMContextBuilder};
    use near_sdk::testing_env;

    fn settlement() -> NearSettlement {
        NearSettlement::new(SettlementConfig::new("settle.testnet".parse().unwrap()))
    }

    fn order(offered: AssetDescriptor) -> SwapOrder {
        SwapOrder::build(
            offered,
            AssetDescriptor::non_fungible("nft.testnet", "7"),
            SplitCollection::from_splits(vec![PaymentSplit::new("alice.testnet", 100)]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_wallet_gate() {
        assert!(ConnectedWallet::connected("alice.testnet".parse().unwrap()).signer_available());
        assert!(!ConnectedWallet::disconnected().signer_available());
        assert!(!ConnectedWallet::default().signer_available());
    }

    #[test]
    fn test_config_defaults_gas() {
        let config = SettlementConfig::new("settle.testnet".parse().unwrap());
        assert_eq!(config.gas, DEFAULT_SETTLEMENT_GAS);
        let config = config.with_gas(Gas::from_tgas(50));
        assert_eq!(config.gas, Gas::from_tgas(50));
    }

    #[test]
    fn test_native_offer_is_attached_as_deposit() {
        let deposit = settlement()
            .attached_deposit(&order(AssetDescriptor::native("1.5")))
            .unwrap();
        assert_eq!(deposit, NearToken::from_millinear(1500));
    }

    #[test]
    fn test_token_offer_attaches_nothing() {
        let deposit = settlement()
            .attached_deposit(&order(AssetDescriptor::fungible("usdc.testnet", "10")))
            .unwrap();
        assert_eq!(deposit, NearToken::from_yoctonear(0));
    }

    #[test]
    fn test_too_precise_native_amount_is_rejected() {
        // 25 fractional digits, one more than yoctoNEAR allows
        let offered = AssetDescriptor::native("0.0000000000000000000000001");
        let result = settlement().submit(order(offered));
        assert_eq!(
            result.err(),
            Some(SettlementError::UnconvertibleAmount {
                amount: "0.0000000000000000000000001".to_string()
            })
        );
    }

    #[test]
    fn test_submit_dispatches_call() {
        testing_env!(VMContextBuilder::new()
            .current_account_id("swap-ui.testnet".parse().unwrap())
            .build());

        let result = settlement().submit(order(AssetDescriptor::native("2")));
        assert!(result.is_ok());
        assert!(get_logs().iter().any(|l| l.starts_with("ORDER_DISPATCHED")
            && l.contains("contract='settle.testnet'")
            && l.contains("deposit='2000000000000000000000000'")));
    }
}
