pub mod function;
pub mod ingress;
pub mod meta;
pub mod service;
