pub mod lookup;
pub mod reset;
