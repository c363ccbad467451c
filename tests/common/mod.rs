#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};

#[derive(Clone, Debug, Default)]
pub struct Account {
    pub balance: u128,
    pub nonce: u64,
    pub code: Vec<u8>,
    pub slots: [u64; 3],
}

/// In-process JSON-RPC node serving historical account state.
#[derive(Default)]
pub struct Node {
    accounts: HashMap<(String, u64), Account>,
    pub calls: Mutex<Vec<String>>,
}

impl Node {
    pub fn with(mut self, address: &str, block: u64, account: Account) -> Self {
        self.accounts
            .insert((address.to_lowercase(), block), account);
        self
    }

    fn account(&self, address: &Value, block: &Value) -> Result<&Account, String> {
        let address = address.as_str().ok_or("invalid address")?.to_lowercase();
        let block = block.as_str().ok_or("invalid block")?;
        let block = u64::from_str_radix(block.trim_start_matches("0x"), 16)
            .map_err(|_| "invalid block".to_string())?;
        self.accounts
            .get(&(address, block))
            .ok_or_else(|| "header not found".to_string())
    }

    fn call(&self, method: &str, params: &[Value]) -> Result<Value, String> {
        let param = |i: usize| params.get(i).cloned().unwrap_or(Value::Null);
        match method {
            "eth_chainId" => Ok(json!("0x1")),
            "eth_getBalance" => {
                let account = self.account(&param(0), &param(1))?;
                Ok(json!(format!("{:#x}", account.balance)))
            }
            "eth_getTransactionCount" => {
                let account = self.account(&param(0), &param(1))?;
                Ok(json!(format!("{:#x}", account.nonce)))
            }
            "eth_getCode" => {
                let account = self.account(&param(0), &param(1))?;
                Ok(json!(format!("0x{}", hex::encode(&account.code))))
            }
            "eth_getStorageAt" => {
                let account = self.account(&param(0), &param(2))?;
                let slot = param(1);
                let slot = slot.as_str().ok_or("invalid slot")?;
                let slot = usize::from_str_radix(slot.trim_start_matches("0x"), 16)
                    .map_err(|_| "invalid slot".to_string())?;
                let value = account.slots.get(slot).copied().unwrap_or_default();
                Ok(json!(format!("0x{value:064x}")))
            }
            _ => Err(format!("the method {method} does not exist")),
        }
    }
}

pub async fn serve(node: Node) -> (String, Arc<Node>) {
    let node = Arc::new(node);
    let app = Router::new()
        .route("/", post(handle_jsonrpc))
        .with_state(node.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), node)
}

async fn handle_jsonrpc(State(node): State<Arc<Node>>, Json(body): Json<Value>) -> Json<Value> {
    let id = body["id"].clone();
    let method = body["method"].as_str().unwrap_or_default().to_string();
    let params = body["params"].as_array().cloned().unwrap_or_default();
    node.calls.lock().expect("lock").push(method.clone());

    let response = match node.call(&method, &params) {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32000, "message": message}
        }),
    };
    Json(response)
}

pub const ETH: u128 = 1_000_000_000_000_000_000;

pub fn aaaa() -> String {
    format!("0x{}", "aa".repeat(20))
}

pub fn bbbb() -> String {
    format!("0x{}", "bb".repeat(20))
}
