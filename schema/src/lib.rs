pub mod function_spec;
pub mod info;
