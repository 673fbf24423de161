use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::{Ledger, LedgerError, Pubkey};

/// JSON-RPC ledger client using `getAccountInfo`.
#[derive(Debug, Clone)]
pub struct RpcLedger {
    client: Client,
    url: Url,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    value: Option<AccountInfo>,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    /// `[payload, encoding]`
    data: (String, String),
}

impl RpcLedger {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> LedgerError {
        if e.is_timeout() {
            LedgerError::Timeout(self.timeout)
        } else {
            LedgerError::Transport(e)
        }
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAccountInfo",
            "params": [
                address.to_string(),
                { "encoding": "base64", "commitment": "confirmed" }
            ]
        });
        debug!(%address, "fetching account info");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?
            .error_for_status()
            .map_err(|e| self.map_transport(e))?;

        let response: RpcResponse<AccountInfoResult> =
            response.json().await.map_err(|e| self.map_transport(e))?;

        decode_account_info(response, address)
    }
}

fn decode_account_info(
    response: RpcResponse<AccountInfoResult>,
    address: &Pubkey,
) -> Result<Vec<u8>, LedgerError> {
    if let Some(error) = response.error {
        return Err(LedgerError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    let result = response
        .result
        .ok_or_else(|| LedgerError::MalformedResponse("missing result".to_string()))?;
    let account = result
        .value
        .ok_or(LedgerError::AccountNotFound(*address))?;

    let (payload, encoding) = account.data;
    if encoding != "base64" {
        return Err(LedgerError::MalformedResponse(format!(
            "unexpected encoding {encoding}"
        )));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| LedgerError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;

    async fn serve(response: Value) -> Url {
        let app = Router::new().route(
            "/",
            post(move |Json(request): Json<Value>| {
                let response = response.clone();
                async move {
                    assert_eq!(request["method"], "getAccountInfo");
                    assert_eq!(request["params"][1]["encoding"], "base64");
                    Json(response)
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Url::parse(&format!("http://{address}/")).unwrap()
    }

    #[tokio::test]
    async fn test_account_found() {
        let data = vec![1u8, 2, 3, 255];
        let url = serve(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 1 },
                "value": {
                    "data": [STANDARD.encode(&data), "base64"],
                    "executable": false,
                    "lamports": 1,
                    "owner": "11111111111111111111111111111111",
                    "rentEpoch": 0
                }
            }
        }))
        .await;

        let ledger = RpcLedger::new(url, Duration::from_secs(5)).unwrap();
        let fetched = ledger
            .get_account_data(&Pubkey::new_from_array([1; 32]))
            .await
            .unwrap();
        assert_eq!(fetched, data);
    }

    #[tokio::test]
    async fn test_account_not_found() {
        let url = serve(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "context": { "slot": 1 }, "value": null }
        }))
        .await;

        let ledger = RpcLedger::new(url, Duration::from_secs(5)).unwrap();
        let result = ledger
            .get_account_data(&Pubkey::new_from_array([1; 32]))
            .await;
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_rpc_error() {
        let url = serve(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param" }
        }))
        .await;

        let ledger = RpcLedger::new(url, Duration::from_secs(5)).unwrap();
        let result = ledger
            .get_account_data(&Pubkey::new_from_array([1; 32]))
            .await;
        assert!(matches!(result, Err(LedgerError::Rpc { code: -32602, .. })));
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{address}/")).unwrap();
        let ledger = RpcLedger::new(url, Duration::from_secs(5)).unwrap();
        let result = ledger
            .get_account_data(&Pubkey::new_from_array([1; 32]))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_unexpected_encoding() {
        let response = RpcResponse {
            result: Some(AccountInfoResult {
                value: Some(AccountInfo {
                    data: ("AQID".to_string(), "base58".to_string()),
                }),
            }),
            error: None,
        };
        assert!(matches!(
            decode_account_info(response, &Pubkey::default()),
            Err(LedgerError::MalformedResponse(_))
        ));
    }
}
