// refmart/src/commands/mod.rs

pub mod inspect;
pub mod query;
pub mod run;
