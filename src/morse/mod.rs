pub mod alphabet;
pub mod scheduler;
pub mod timing;
