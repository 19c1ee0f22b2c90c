//! Request and response DTOs for the blackboard RPC surface.

use crate::{Item, SetItemRequest};
use serde::{Deserialize, Serialize};

/// Namespace used when a call carries no credential.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Batch write request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetItemsRequest {
    pub items: Vec<SetItemRequest>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Single `set_item` call: item fields plus the optional credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetItemCall {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(flatten)]
    pub item: SetItemRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetItemRequest {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetItemsRequest {
    pub refs: Vec<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Body of calls scoped to a whole namespace (`get_all_items`, `clear`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Generic call: method name, its arguments, and the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Base response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    #[serde(default = "default_code")]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

fn default_code() -> i32 {
    200
}

impl<T> BaseResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

pub type ItemResponse = BaseResponse<Item>;
pub type ItemsResponse = BaseResponse<Vec<Item>>;
pub type ClearResponse = BaseResponse<bool>;
pub type RpcResponse = BaseResponse<serde_json::Value>;
pub type StatsResponse = BaseResponse<BlackboardStats>;

/// Store-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackboardStats {
    pub namespaces: usize,
    pub items: usize,
}
