pub mod capacity;
pub mod dashboard;
pub mod forecast;
pub mod health;
