pub mod environment;
pub mod planet;
pub mod propulsion;
pub mod structure;
