use crate::types::meta::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Service exposes a function inside the cluster
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct Service {
    #[serde(default)]
    pub metadata: ObjectMeta, //`json:"metadata"`
    #[serde(default)]
    pub spec: ServiceSpec, //`json:"spec"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct ServiceSpec {
    #[serde(rename = "clusterIP")]
    #[serde(default)]
    pub cluster_ip: String, //`json:"clusterIP"`

    #[serde(rename = "type")]
    #[serde(default)]
    pub service_type: String, //`json:"type"`

    #[serde(default)]
    pub ports: Vec<ServicePort>, //`json:"ports"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct ServicePort {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default)]
    pub port: i32,

    #[serde(rename = "targetPort")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,

    #[serde(rename = "nodePort")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,
}

/// a port may be referenced by number or by name
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i32),
    String(String),
}

impl Display for IntOrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IntOrString::Int(i) => write!(f, "{}", i),
            IntOrString::String(s) => write!(f, "{}", s),
        }
    }
}

impl ServicePort {
    /// the fields that are set, keyed by their wire name, in a stable order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(protocol) = &self.protocol {
            fields.push(("protocol", protocol.clone()));
        }
        fields.push(("port", self.port.to_string()));
        if let Some(target) = &self.target_port {
            fields.push(("targetPort", target.to_string()));
        }
        if let Some(node_port) = self.node_port {
            fields.push(("nodePort", node_port.to_string()));
        }
        fields
    }
}
