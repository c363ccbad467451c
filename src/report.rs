use eyre::WrapErr;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::{
    common::{address::Address, block::BlockId},
    diff::{AccountDiff, diff},
    view::{StateReader, fetch},
};

#[derive(Debug, Serialize)]
pub struct Report {
    pub rpc: String,
    #[serde(rename = "blockA")]
    pub block_a: BlockId,
    #[serde(rename = "blockB")]
    pub block_b: BlockId,
    pub results: Vec<AccountDiff>,
}

pub struct Auditor<R> {
    reader: R,
    concurrency: usize,
}

impl<R: StateReader> Auditor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            concurrency: 1,
        }
    }

    /// Number of accounts audited at once. Results keep input order either way.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn audit(
        &self,
        address: Address,
        block_a: &BlockId,
        block_b: &BlockId,
    ) -> eyre::Result<AccountDiff> {
        let a = fetch(&self.reader, &address, block_a)
            .await
            .wrap_err_with(|| format!("fetch {address}@{block_a}"))?;
        let b = fetch(&self.reader, &address, block_b)
            .await
            .wrap_err_with(|| format!("fetch {address}@{block_b}"))?;
        let diff = diff(address, &a, &b);
        tracing::info!(%address, changed = !diff.changes.is_empty(), "account audited");
        Ok(diff)
    }

    /// Audits every address, in order. The first failure aborts the run and
    /// no partial report is returned.
    pub async fn run(
        &self,
        rpc: &str,
        block_a: BlockId,
        block_b: BlockId,
        addresses: &[Address],
    ) -> eyre::Result<Report> {
        tracing::info!(
            %block_a,
            %block_b,
            accounts = addresses.len(),
            concurrency = self.concurrency,
            "audit started"
        );
        let results = futures::stream::iter(addresses)
            .map(|address| self.audit(*address, &block_a, &block_b))
            .buffered(self.concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(Report {
            rpc: rpc.to_string(),
            block_a,
            block_b,
            results,
        })
    }
}
