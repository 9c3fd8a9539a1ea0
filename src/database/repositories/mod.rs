pub mod reply;
pub mod review;
