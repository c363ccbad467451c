use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    common::{Word, address::Address},
    view::AccountView,
};

const WEI_PER_MICRO_ETH: u64 = 1_000_000_000_000;

/// Field-wise changes between two views. An absent field means "unchanged".
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Changes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<(u64, u64)>,
    #[serde(rename = "balance_eth", skip_serializing_if = "Option::is_none")]
    pub balance_eth: Option<(f64, f64)>,
    #[serde(rename = "codeChanged", skip_serializing_if = "Option::is_none")]
    pub code_changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<BTreeMap<u8, (Word, Word)>>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.nonce.is_none()
            && self.balance_eth.is_none()
            && self.code_changed.is_none()
            && self.slots.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountDiff {
    pub address: Address,
    #[serde(rename = "diff")]
    pub changes: Changes,
}

/// Compares two views of the same account. All checks are independent and
/// run on raw values; only the reported balance is rounded.
pub fn diff(address: Address, a: &AccountView, b: &AccountView) -> AccountDiff {
    let mut changes = Changes::default();

    if a.nonce != b.nonce {
        changes.nonce = Some((a.nonce, b.nonce));
    }
    if a.balance != b.balance {
        changes.balance_eth = Some((wei_to_eth(&a.balance), wei_to_eth(&b.balance)));
    }
    if a.code != b.code {
        changes.code_changed = Some(true);
    }

    let slots = a
        .storage
        .iter()
        .filter_map(|(slot, old)| {
            let new = b.storage.get(slot)?;
            (old != new).then_some((*slot, (*old, *new)))
        })
        .collect::<BTreeMap<_, _>>();
    if !slots.is_empty() {
        changes.slots = Some(slots);
    }

    AccountDiff { address, changes }
}

/// Wei to ether, rounded half-up to 6 fractional digits.
pub fn wei_to_eth(wei: &Word) -> f64 {
    let unit = Word::from(WEI_PER_MICRO_ETH);
    let half = Word::from(WEI_PER_MICRO_ETH / 2);
    let mut micro = *wei / unit;
    if *wei % unit >= half {
        micro = micro + Word::one();
    }
    micro.as_f64() / 1e6
}
