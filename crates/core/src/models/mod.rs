pub mod booking;
pub mod ids;
pub mod operator;
pub mod response;
