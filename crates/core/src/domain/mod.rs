pub mod listing;
pub mod preferences;
