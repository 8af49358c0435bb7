pub mod identifier;
pub mod json;

pub use json::JsonBody;
