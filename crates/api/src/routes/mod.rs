pub mod github;
pub mod health;
