//! Blackboard operations keyed by caller credential, and dispatch by method name.

use crate::server::AppState;
use bb_types::{
    GetItemRequest, GetItemsRequest, Item, NamespaceRequest, RpcRequest, SetItemCall,
    SetItemRequest, SetItemsRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// Envelope code for this error.
    pub fn code(&self) -> i32 {
        match self {
            RpcError::UnknownMethod(_) | RpcError::InvalidParams(_) => 400,
            RpcError::Internal(_) => 500,
        }
    }
}

fn check_ref(req: &SetItemRequest) -> Result<(), RpcError> {
    if req.reference.is_empty() {
        return Err(RpcError::InvalidParams("ref must be non-empty".to_string()));
    }
    Ok(())
}

impl AppState {
    /// Store key of the namespace for a call carrying `token`.
    pub async fn namespace(&self, token: Option<&str>) -> String {
        self.access.resolve_namespace(token).await.namespace()
    }

    pub async fn set_item(
        &self,
        token: Option<&str>,
        req: SetItemRequest,
    ) -> Result<Item, RpcError> {
        check_ref(&req)?;
        let ns = self.namespace(token).await;
        Ok(self.store.set_item(&ns, req).await)
    }

    /// Every entry is validated before any is applied.
    pub async fn set_items(
        &self,
        token: Option<&str>,
        reqs: Vec<SetItemRequest>,
    ) -> Result<Vec<Item>, RpcError> {
        reqs.iter().try_for_each(check_ref)?;
        let ns = self.namespace(token).await;
        Ok(self.store.set_items(&ns, reqs).await)
    }

    pub async fn get_item(&self, token: Option<&str>, reference: &str) -> Item {
        let ns = self.namespace(token).await;
        self.store.get_item(&ns, reference).await
    }

    pub async fn get_items(&self, token: Option<&str>, refs: &[String]) -> Vec<Item> {
        let ns = self.namespace(token).await;
        self.store.get_items(&ns, refs).await
    }

    pub async fn get_all_items(&self, token: Option<&str>) -> Vec<Item> {
        let ns = self.namespace(token).await;
        self.store.get_all_items(&ns).await
    }

    pub async fn clear(&self, token: Option<&str>) -> bool {
        let ns = self.namespace(token).await;
        self.store.clear(&ns).await
    }
}

fn parse<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError::InvalidParams(e.to_string()))
}

fn encode<T: Serialize>(v: T) -> Result<Value, RpcError> {
    serde_json::to_value(v).map_err(|e| RpcError::Internal(e.to_string()))
}

/// Run one call. A top-level `auth_token` takes precedence over one inside `params`.
pub async fn dispatch(state: &AppState, req: RpcRequest) -> Result<Value, RpcError> {
    let params = match req.params {
        None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
        Some(p) => p,
    };
    let outer = req.auth_token;
    match req.method.as_str() {
        "set_item" => {
            let call: SetItemCall = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.set_item(token.as_deref(), call.item).await?)
        }
        "set_items" => {
            let call: SetItemsRequest = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.set_items(token.as_deref(), call.items).await?)
        }
        "get_item" => {
            let call: GetItemRequest = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.get_item(token.as_deref(), &call.reference).await)
        }
        "get_items" => {
            let call: GetItemsRequest = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.get_items(token.as_deref(), &call.refs).await)
        }
        "get_all_items" => {
            let call: NamespaceRequest = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.get_all_items(token.as_deref()).await)
        }
        "clear" => {
            let call: NamespaceRequest = parse(params)?;
            let token = outer.or(call.auth_token);
            encode(state.clear(token.as_deref()).await)
        }
        other => Err(RpcError::UnknownMethod(other.to_string())),
    }
}
