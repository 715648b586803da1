pub mod announcement;
pub mod approval;
pub mod board;
pub mod health;
pub mod registration;
pub mod sessions;
pub mod sweeper;
