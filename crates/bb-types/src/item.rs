//! Blackboard items: a typed value plus optional confidence metadata and open extra fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request field that carries the caller credential. Never stored on an item.
pub const AUTH_TOKEN_FIELD: &str = "auth_token";

/// Keys that can never appear among an item's extra fields.
pub const RESERVED_FIELDS: &[&str] = &[
    "ref",
    "value",
    "belief",
    "probability",
    "accuracy",
    AUTH_TOKEN_FIELD,
];

/// Payload of an item.
///
/// Untagged so that JSON booleans, integral numbers, other numbers and strings map to
/// `Bool`, `Integer`, `Float` and `String` in that order. Integers above `i64::MAX` are `UInt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Bool(bool),
    Integer(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl From<bool> for ItemValue {
    fn from(v: bool) -> Self {
        ItemValue::Bool(v)
    }
}

impl From<i32> for ItemValue {
    fn from(v: i32) -> Self {
        ItemValue::Integer(v.into())
    }
}

impl From<i64> for ItemValue {
    fn from(v: i64) -> Self {
        ItemValue::Integer(v)
    }
}

impl From<u64> for ItemValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(ItemValue::UInt(v), ItemValue::Integer)
    }
}

impl From<f64> for ItemValue {
    fn from(v: f64) -> Self {
        ItemValue::Float(v)
    }
}

impl From<&str> for ItemValue {
    fn from(v: &str) -> Self {
        ItemValue::String(v.to_string())
    }
}

impl From<String> for ItemValue {
    fn from(v: String) -> Self {
        ItemValue::String(v)
    }
}

/// One stored fact.
///
/// The five core fields always serialize (as `null` when absent); extra caller fields are
/// flattened next to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub value: Option<ItemValue>,
    #[serde(default)]
    pub belief: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// The all-null item returned for every lookup miss and every delete.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the empty-item sentinel.
    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
    }
}

/// Write request for one item (`set_item` arguments, also the element type of `set_items`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetItemRequest {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub value: Option<ItemValue>,
    #[serde(default)]
    pub belief: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SetItemRequest {
    pub fn new(reference: impl Into<String>, value: Option<ItemValue>) -> Self {
        Self {
            reference: reference.into(),
            value,
            belief: None,
            probability: None,
            accuracy: None,
            extra: Map::new(),
        }
    }

    pub fn with_belief(mut self, belief: f64) -> Self {
        self.belief = Some(belief);
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Reserved keys are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !RESERVED_FIELDS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }

    /// Item to store, or `None` when the request is a delete (null value).
    /// Reserved keys, the credential included, are dropped from the extras.
    pub fn into_item(self) -> Option<Item> {
        let value = self.value?;
        let mut extra = self.extra;
        extra.retain(|k, _| !RESERVED_FIELDS.contains(&k.as_str()));
        Some(Item {
            reference: Some(self.reference),
            value: Some(value),
            belief: self.belief,
            probability: self.probability,
            accuracy: self.accuracy,
            extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_item_serializes_all_core_fields_as_null() {
        let v = serde_json::to_value(Item::empty()).unwrap();
        assert_eq!(
            v,
            json!({ "ref": null, "value": null, "belief": null, "probability": null, "accuracy": null })
        );
    }

    #[test]
    fn value_types_follow_json_kinds() {
        let cases = [
            (json!(true), ItemValue::Bool(true)),
            (json!(7), ItemValue::Integer(7)),
            (json!(21.5), ItemValue::Float(21.5)),
            (json!("warm"), ItemValue::String("warm".to_string())),
        ];
        for (raw, expected) in cases {
            let req: SetItemRequest =
                serde_json::from_value(json!({ "ref": "r", "value": raw })).unwrap();
            assert_eq!(req.value, Some(expected));
        }
    }

    #[test]
    fn integers_above_i64_stay_exact() {
        let req: SetItemRequest =
            serde_json::from_value(json!({ "ref": "r", "value": u64::MAX })).unwrap();
        assert_eq!(req.value, Some(ItemValue::UInt(u64::MAX)));
        let item = req.into_item().unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap()["value"], json!(u64::MAX));
        assert_eq!(ItemValue::from(5u64), ItemValue::Integer(5));
    }

    #[test]
    fn reserved_keys_never_become_extras() {
        let req = SetItemRequest::new("r", Some("v".into()))
            .with_extra("value", json!("shadow"))
            .with_extra("ref", json!("other"))
            .with_extra("note", json!("kept"));
        assert_eq!(req.extra.len(), 1);

        let mut req = SetItemRequest::new("r", Some("v".into()));
        req.extra.insert("belief".to_string(), json!(0.1));
        req.extra.insert("note".to_string(), json!("kept"));
        let item = req.into_item().unwrap();
        assert_eq!(item.extra.len(), 1);

        let text = serde_json::to_string(&item).unwrap();
        assert_eq!(text.matches("\"belief\"").count(), 1);
        assert_eq!(text.matches("\"value\"").count(), 1);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap()["belief"], Value::Null);
    }

    #[test]
    fn object_value_is_rejected() {
        let res: Result<SetItemRequest, _> =
            serde_json::from_value(json!({ "ref": "r", "value": { "nested": 1 } }));
        assert!(res.is_err());
    }

    #[test]
    fn extras_are_kept_and_auth_token_is_dropped() {
        let req: SetItemRequest = serde_json::from_value(json!({
            "ref": "door",
            "value": "open",
            "source": "sensor-3",
            "auth_token": "secret"
        }))
        .unwrap();
        let item = req.into_item().unwrap();
        assert_eq!(item.extra.get("source"), Some(&json!("sensor-3")));
        assert!(!item.extra.contains_key(AUTH_TOKEN_FIELD));

        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["ref"], "door");
        assert_eq!(v["source"], "sensor-3");
        assert!(v.get(AUTH_TOKEN_FIELD).is_none());
    }

    #[test]
    fn null_value_is_a_delete() {
        let req: SetItemRequest =
            serde_json::from_value(json!({ "ref": "r", "value": null, "belief": 0.5 })).unwrap();
        assert!(req.into_item().is_none());
        let req: SetItemRequest = serde_json::from_value(json!({ "ref": "r" })).unwrap();
        assert!(req.into_item().is_none());
    }
}
