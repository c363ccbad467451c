use eyre::OptionExt;
use tracing::Level;

use crate::{
    common::{Hex, Word, address::Address, block::BlockId, error::Error},
    view::StateReader,
};

#[derive(Clone)]
pub struct EthClient {
    http: reqwest::Client,
    url: String,
}

impl EthClient {
    pub fn new(url: &str) -> eyre::Result<Self> {
        let http = reqwest::ClientBuilder::new().build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub async fn chain_id(&self) -> eyre::Result<u64> {
        let value = self.rpc("eth_chainId", serde_json::json!([])).await?;
        let chain_id = hex_to_u64(&value)?;
        Ok(chain_id)
    }

    /// Startup connectivity check. Any failure means the endpoint is unusable.
    pub async fn check_connectivity(&self) -> Result<u64, Error> {
        self.chain_id().await.map_err(|e| match e.downcast::<Error>() {
            Ok(e @ Error::Unreachable(_)) => e,
            Ok(e) => Error::Unreachable(format!("{}: {e}", self.url)),
            Err(e) => Error::Unreachable(format!("{}: {e}", self.url)),
        })
    }

    async fn rpc(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> eyre::Result<serde_json::Value> {
        let value = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 0
        });
        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(json=%value, "HTTP request");
        }

        let res = self
            .http
            .post(&self.url)
            .json(&value)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    eyre::Report::new(Error::Unreachable(format!("{}: {e}", self.url)))
                } else {
                    eyre::Report::new(e)
                }
            })?;

        let status = res.status();
        let (code, message) = (status.as_u16(), status.as_str());
        if !status.is_success() {
            tracing::error!(code, message, method, "Ethereum call failed");
            return Err(Error::Http(code).into());
        }

        let response: serde_json::Value = res.json().await?;
        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(json=%response, "HTTP response");
        }

        if let Some(error) = response["error"].as_object() {
            let json = serde_json::to_string(&error)?;
            return Err(Error::Rpc(format!("{method}: {json}")).into());
        }
        if let Some(error) = response["error"].as_str() {
            return Err(Error::Rpc(format!("{method}: {error}")).into());
        }
        Ok(response["result"].clone())
    }
}

impl StateReader for EthClient {
    async fn get_balance(&self, address: &Address, block: &BlockId) -> eyre::Result<Word> {
        let params = serde_json::json!([address.to_string(), block.to_param()]);
        self.rpc("eth_getBalance", params)
            .await
            .and_then(|value| hex_to_word(&value))
    }

    async fn get_nonce(&self, address: &Address, block: &BlockId) -> eyre::Result<u64> {
        let params = serde_json::json!([address.to_string(), block.to_param()]);
        self.rpc("eth_getTransactionCount", params)
            .await
            .and_then(|value| hex_to_u64(&value))
    }

    async fn get_code(&self, address: &Address, block: &BlockId) -> eyre::Result<Hex> {
        let params = serde_json::json!([address.to_string(), block.to_param()]);
        self.rpc("eth_getCode", params)
            .await
            .and_then(|value| hex_to_vec(&value))
            .map(Hex::from)
    }

    async fn get_storage_at(
        &self,
        address: &Address,
        slot: &Word,
        block: &BlockId,
    ) -> eyre::Result<Word> {
        let params = serde_json::json!([
            address.to_string(),
            slot.to_quantity(),
            block.to_param()
        ]);
        self.rpc("eth_getStorageAt", params)
            .await
            .and_then(|value| hex_to_word(&value))
    }
}

fn hex_to_word(val: &serde_json::Value) -> eyre::Result<Word> {
    let hex = val.as_str().ok_or_eyre("missing hex str")?;
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let num = Word::from_hex(hex)?;
    Ok(num)
}

fn hex_to_u64(val: &serde_json::Value) -> eyre::Result<u64> {
    let hex = val.as_str().ok_or_eyre("missing hex str")?;
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let num = u64::from_str_radix(hex, 16)?;
    Ok(num)
}

fn hex_to_vec(val: &serde_json::Value) -> eyre::Result<Vec<u8>> {
    let hex = val.as_str().ok_or_eyre("missing hex str")?;
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let vec = hex::decode(hex)?;
    Ok(vec)
}
