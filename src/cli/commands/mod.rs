pub mod health;
pub mod named;
pub mod recipe;
