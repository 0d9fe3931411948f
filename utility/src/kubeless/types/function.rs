use crate::types::meta::ObjectMeta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FUNCTION_API_VERSION: &str = "kubeless.io/v1beta1";
pub const FUNCTION_KIND: &str = "Function";
pub const READY_CONDITION: &str = "Ready";
pub const DESCRIPTION_ANNOTATION: &str = "kubeless.serverless.com/description";

/// Function is the kubeless function resource as held by the control plane
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct Function {
    #[serde(rename = "apiVersion")]
    #[serde(default)]
    pub api_version: String, //`json:"apiVersion"`

    #[serde(default)]
    pub kind: String, //`json:"kind"`

    #[serde(default)]
    pub metadata: ObjectMeta, //`json:"metadata"`

    #[serde(default)]
    pub spec: FunctionResourceSpec, //`json:"spec"`

    // written by the control plane only
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FunctionStatus>, //`json:"status,omitempty"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct FunctionResourceSpec {
    // Handler in the form file.method
    #[serde(default)]
    pub handler: String, //`json:"handler"`

    #[serde(default)]
    pub runtime: String, //`json:"runtime"`

    // content of the dependency file (requirements.txt, package.json, ...)
    #[serde(default)]
    pub deps: String, //`json:"deps"`

    // source code of the function
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub function: String, //`json:"function,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub topic: String, //`json:"topic,omitempty"`

    // trigger type: HTTP, PubSub, ...
    #[serde(rename = "type")]
    #[serde(default)]
    pub trigger_type: String, //`json:"type"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct FunctionStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>, //`json:"conditions"`
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct Condition {
    #[serde(rename = "type")]
    #[serde(default)]
    pub condition_type: String, //`json:"type"`

    // "True", "False" or "Unknown"
    #[serde(default)]
    pub status: String, //`json:"status"`

    #[serde(rename = "lastUpdateTime")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub last_update_time: String, //`json:"lastUpdateTime,omitempty"`

    #[serde(rename = "lastTransitionTime")]
    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub last_transition_time: String, //`json:"lastTransitionTime,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub reason: String, //`json:"reason,omitempty"`

    #[serde(default)]
    #[serde(skip_serializing_if = "crate::is_default")]
    pub message: String, //`json:"message,omitempty"`
}

impl Function {
    pub fn ready_condition(&self) -> Option<&Condition> {
        self.status
            .as_ref()?
            .conditions
            .iter()
            .find(|c| c.condition_type == READY_CONDITION)
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata
            .annotations
            .get(DESCRIPTION_ANNOTATION)
            .map(|d| d.as_str())
    }
}

impl Condition {
    pub fn is_true(&self) -> bool {
        self.status == "True"
    }

    /// when the control plane last wrote this condition, falling back to the transition time
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = if !self.last_update_time.is_empty() {
            &self.last_update_time
        } else {
            &self.last_transition_time
        };
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
