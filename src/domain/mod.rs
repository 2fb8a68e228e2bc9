pub mod category;
pub mod item;
pub mod rating;
pub mod score;
pub mod types;
