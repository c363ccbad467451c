use clap::Parser;

use crate::common::{address::Address, block::BlockId};

pub const DEFAULT_RPC: &str = "https://eth.drpc.org";

/// Compare account state (nonce, balance, code, storage slots 0-2) between two blocks.
#[derive(Clone, Debug, Parser)]
#[command(name = "state-auditor", version)]
pub struct Config {
    /// JSON-RPC endpoint URL
    #[arg(long, env = "RPC", default_value = DEFAULT_RPC)]
    pub rpc: String,

    /// Accounts audited at once; results keep input order
    #[arg(long, env = "CONCURRENCY", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Block height, hash or tag (latest, safe, finalized, ...)
    #[arg(value_name = "BLOCK_A")]
    pub block_a: BlockId,

    #[arg(value_name = "BLOCK_B")]
    pub block_b: BlockId,

    /// Account addresses, normalized to checksummed form
    #[arg(value_name = "ADDRESS", required = true, num_args = 1..)]
    pub addresses: Vec<Address>,
}
