pub mod booking;
pub mod operator;
