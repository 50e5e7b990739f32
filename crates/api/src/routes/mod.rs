pub mod health;
pub mod lists;
