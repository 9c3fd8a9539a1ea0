pub mod replies;
pub mod reviews;
