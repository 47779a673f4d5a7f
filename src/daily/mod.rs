pub mod builder;
pub mod formulas;
pub mod merges;
pub mod payload_model;
