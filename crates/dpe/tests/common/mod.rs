pub mod generators;
pub mod harness;
