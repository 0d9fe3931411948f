use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ObjectMeta is the subset of kubernetes object metadata the client reads and writes
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String, //`json:"name"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub namespace: String, //`json:"namespace,omitempty"`

    #[serde(rename = "selfLink")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub self_link: String, //`json:"selfLink,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub uid: String, //`json:"uid,omitempty"`

    #[serde(rename = "resourceVersion")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub resource_version: String, //`json:"resourceVersion,omitempty"`

    // rfc3339
    #[serde(rename = "creationTimestamp")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub creation_timestamp: String, //`json:"creationTimestamp,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub labels: BTreeMap<String, String>, //`json:"labels,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub annotations: BTreeMap<String, String>, //`json:"annotations,omitempty"`
}

impl ObjectMeta {
    pub fn has_label(&self, key: &str, value: &str) -> bool {
        self.labels.get(key).map(|v| v == value).unwrap_or(false)
    }
}

/// List is the envelope the control plane wraps every collection in
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct List<T> {
    #[serde(rename = "apiVersion")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub api_version: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub kind: String,

    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> List<T> {
    pub fn new(items: Vec<T>) -> List<T> {
        List {
            api_version: String::new(),
            kind: String::new(),
            items,
        }
    }
}

/// ApiStatus is the body the control plane answers with when it rejects a request
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct ApiStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub code: u16,
}
