use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utility::types::function::{
    Function, FunctionResourceSpec, DESCRIPTION_ANNOTATION, FUNCTION_API_VERSION, FUNCTION_KIND,
};
use utility::types::meta::ObjectMeta;
use utility::FUNCTION_LABEL;

pub const HTTP_TRIGGER: &str = "HTTP";
pub const PUBSUB_TRIGGER: &str = "PubSub";

///FunctionSpec everything the caller wants deployed for one function.
///It is submitted as is and never modified afterwards
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct FunctionSpec {
    pub name: String,
    pub namespace: String,
    pub handler: String,
    pub runtime: String,
    /// content of the dependency file
    pub deps: String,
    pub trigger_type: String,
    pub topic: Option<String>,
    /// function source code
    pub function: String,
    pub description: Option<String>,
    pub labels: BTreeMap<String, String>,
}

impl FunctionSpec {
    /// the full resource body written on deploy
    pub fn to_resource(&self) -> Function {
        let mut labels = self.labels.clone();
        labels.insert(FUNCTION_LABEL.to_string(), self.name.clone());

        let mut annotations = BTreeMap::new();
        if let Some(description) = &self.description {
            annotations.insert(DESCRIPTION_ANNOTATION.to_string(), description.clone());
        }

        Function {
            api_version: FUNCTION_API_VERSION.to_string(),
            kind: FUNCTION_KIND.to_string(),
            metadata: ObjectMeta {
                name: self.name.clone(),
                namespace: self.namespace.clone(),
                labels,
                annotations,
                ..Default::default()
            },
            spec: FunctionResourceSpec {
                handler: self.handler.clone(),
                runtime: self.runtime.clone(),
                deps: self.deps.clone(),
                function: self.function.clone(),
                topic: self.topic.clone().unwrap_or_default(),
                trigger_type: self.trigger_type.clone(),
            },
            status: None,
        }
    }
}
