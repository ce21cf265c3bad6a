pub mod health;
pub mod study;
