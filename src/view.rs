use std::{collections::BTreeMap, time::Instant};

use crate::common::{Hex, Word, address::Address, block::BlockId};

/// Storage slots sampled per account. This is a light heuristic: changes in
/// any other slot go unnoticed, full storage diffing needs trie access.
pub const SAMPLED_SLOTS: [u8; 3] = [0, 1, 2];

/// Account state at one block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountView {
    pub balance: Word,
    pub nonce: u64,
    pub code: Hex,
    pub storage: BTreeMap<u8, Word>,
}

/// Historical state reads, one remote call each.
#[allow(async_fn_in_trait)]
pub trait StateReader {
    async fn get_balance(&self, address: &Address, block: &BlockId) -> eyre::Result<Word>;

    /// `eth_getTransactionCount`
    async fn get_nonce(&self, address: &Address, block: &BlockId) -> eyre::Result<u64>;

    async fn get_code(&self, address: &Address, block: &BlockId) -> eyre::Result<Hex>;

    async fn get_storage_at(
        &self,
        address: &Address,
        slot: &Word,
        block: &BlockId,
    ) -> eyre::Result<Word>;
}

impl<T: StateReader> StateReader for &T {
    async fn get_balance(&self, address: &Address, block: &BlockId) -> eyre::Result<Word> {
        (**self).get_balance(address, block).await
    }

    async fn get_nonce(&self, address: &Address, block: &BlockId) -> eyre::Result<u64> {
        (**self).get_nonce(address, block).await
    }

    async fn get_code(&self, address: &Address, block: &BlockId) -> eyre::Result<Hex> {
        (**self).get_code(address, block).await
    }

    async fn get_storage_at(
        &self,
        address: &Address,
        slot: &Word,
        block: &BlockId,
    ) -> eyre::Result<Word> {
        (**self).get_storage_at(address, slot, block).await
    }
}

/// Reads balance, nonce, code and the sampled slots. Stops at the first failed call.
pub async fn fetch<R: StateReader>(
    reader: &R,
    address: &Address,
    block: &BlockId,
) -> eyre::Result<AccountView> {
    let now = Instant::now();

    let balance = reader.get_balance(address, block).await?;
    let nonce = reader.get_nonce(address, block).await?;
    let code = reader.get_code(address, block).await?;
    let mut storage = BTreeMap::new();
    for slot in SAMPLED_SLOTS {
        let value = reader
            .get_storage_at(address, &Word::from(slot), block)
            .await?;
        storage.insert(slot, value);
    }

    let ms = now.elapsed().as_millis();
    tracing::debug!("VIEW: [{ms} ms] {address}@{block} nonce={nonce} code={}b", code.len());
    Ok(AccountView {
        balance,
        nonce,
        code,
        storage,
    })
}
