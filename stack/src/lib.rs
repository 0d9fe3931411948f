pub mod schema;
pub mod stack;
