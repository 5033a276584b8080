use near_sdk::{bs58, env, CryptoHash};

use crate::asset::Side;

// Helper for consistent draft logging
pub fn log_draft_event(event: &str, side: Option<Side>, detail: &str) {
    match side {
        Some(side) => env::log_str(&format!(
            "DRAFT_{}: side='{}', {}",
            event, side, detail
        )),
        None => env::log_str(&format!("DRAFT_{}: {}", event, detail)),
    }
}

pub fn log_order_event(event: &str, order_hash: &CryptoHash, detail: &str) {
    env::log_str(&format!(
        "ORDER_{}: hash='{}', {}",
        event,
        bs58::encode(order_hash).into_string(),
        detail
    ));
}
