pub mod optimization;
pub mod safety_stock;
pub mod what_if;
pub mod z_score;
