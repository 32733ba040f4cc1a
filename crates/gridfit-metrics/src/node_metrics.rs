//! Wire types for the `metrics.k8s.io/v1beta1` `NodeMetricsList` resource.
//!
//! Only the fields the snapshot builder reads are modelled; everything else
//! in the document (timestamps, windows, managed fields) is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::quantity::QuantityError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeMetricsList {
    #[serde(default)]
    pub items: Vec<NodeMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeMetrics {
    pub metadata: ObjectMeta,
    /// Raw resource quantities, e.g. `{"cpu": "153427893n", "memory": "1843296Ki"}`.
    /// Kept untyped so one node with odd values cannot fail the whole listing.
    #[serde(default)]
    pub usage: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectMeta {
    pub name: String,
}

impl NodeMetrics {
    pub fn new(name: &str, cpu: &str, memory: &str) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.to_string(),
            },
            usage: json!({ "cpu": cpu, "memory": memory }),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// CPU quantity, `"0n"` when absent.
    pub fn cpu(&self) -> Result<&str, QuantityError> {
        self.quantity("cpu", "0n")
    }

    /// Memory quantity, `"0Ki"` when absent.
    pub fn memory(&self) -> Result<&str, QuantityError> {
        self.quantity("memory", "0Ki")
    }

    fn quantity<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, QuantityError> {
        let value = match &self.usage {
            Value::Null => return Ok(default),
            Value::Object(fields) => fields.get(key),
            other => return Err(QuantityError::NotAString(other.to_string())),
        };
        match value {
            None | Some(Value::Null) => Ok(default),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(QuantityError::NotAString(other.to_string())),
        }
    }
}

impl NodeMetricsList {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
