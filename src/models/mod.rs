pub mod attributes;
pub mod smart;
