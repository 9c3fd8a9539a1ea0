pub mod review;
pub mod thread;
