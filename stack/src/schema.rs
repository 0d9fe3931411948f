use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Provider for the kubeless set of functions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Provider {
    pub name: String, //`yaml:"name"`
    #[serde(default)]
    pub namespace: String, //`yaml:"namespace,omitempty"`
    #[serde(default)]
    pub runtime: String, //`yaml:"runtime,omitempty"`
    // control plane the functions are deployed to
    #[serde(default)]
    pub server: String, //`yaml:"server,omitempty"`
}

/// Function as described in serverless.yml
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Function {
    // Name of deployed function, taken from the key in `functions`
    #[serde(skip_deserializing)]
    pub name: String,

    // Handler in the form <file>.<function>
    pub handler: String, //`yaml:"handler"`

    // Runtime overrides the provider runtime
    #[serde(default)]
    pub runtime: String, //`yaml:"runtime,omitempty"`

    #[serde(default)]
    pub description: String, //`yaml:"description,omitempty"`

    // Namespace of the function, overrides the provider namespace
    #[serde(default)]
    pub namespace: String, //`yaml:"namespace,omitempty"`

    #[serde(default)]
    pub labels: HashMap<String, String>, //`yaml:"labels,omitempty"`

    // Topic the function is triggered by; empty means HTTP
    #[serde(default)]
    pub topic: String, //`yaml:"topic,omitempty"`

    // Deps file path, relative to the service file
    #[serde(default)]
    pub deps: String, //`yaml:"deps,omitempty"`

    // Code file path; derived from the handler when empty
    #[serde(default)]
    pub code: String, //`yaml:"code,omitempty"`
}

// Services root level YAML file to define the kubeless function-set
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Services {
    #[serde(default)]
    pub service: String, //`yaml:"service"`
    #[serde(default)]
    pub provider: Provider, //`yaml:"provider"`
    #[serde(default)]
    pub functions: BTreeMap<String, Function>, //`yaml:"functions,omitempty"`
}
