pub mod chat;
pub mod dashboard;
pub mod gateway;
pub mod prompt;
pub mod providers;
