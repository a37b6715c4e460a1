pub mod safe;
pub mod stats;
