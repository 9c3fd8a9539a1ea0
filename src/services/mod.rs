pub mod reply_service;
pub mod review_service;
pub mod thread_audit;
