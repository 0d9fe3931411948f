use crate::types::meta::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Ingress routes outside traffic to a function's service
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct Ingress {
    #[serde(default)]
    pub metadata: ObjectMeta, //`json:"metadata"`
    #[serde(default)]
    pub spec: IngressSpec, //`json:"spec"`
    #[serde(default)]
    pub status: IngressStatus, //`json:"status"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct IngressSpec {
    #[serde(default)]
    pub rules: Vec<IngressRule>, //`json:"rules"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct IngressRule {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpIngressRuleValue>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct HttpIngressRuleValue {
    #[serde(default)]
    pub paths: Vec<HttpIngressPath>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct HttpIngressPath {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct IngressStatus {
    #[serde(rename = "loadBalancer")]
    #[serde(default)]
    pub load_balancer: LoadBalancerStatus, //`json:"loadBalancer"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct LoadBalancerStatus {
    #[serde(default)]
    pub ingress: Vec<LoadBalancerIngress>, //`json:"ingress"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct LoadBalancerIngress {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl Ingress {
    /// address of the first load balancer entry; the ip wins over the hostname
    pub fn load_balancer_address(&self) -> Option<&str> {
        let entry = self.status.load_balancer.ingress.first()?;
        entry.ip.as_deref().or_else(|| entry.hostname.as_deref())
    }

    /// path of the first http path of the first rule
    pub fn first_path(&self) -> Option<&str> {
        self.spec
            .rules
            .first()?
            .http
            .as_ref()?
            .paths
            .first()?
            .path
            .as_deref()
    }
}
