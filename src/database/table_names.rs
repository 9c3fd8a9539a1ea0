pub const USER_TABLE_NAME: &'static str = "local_user";
pub const REVIEW_TABLE_NAME: &'static str = "review";
pub const REPLY_TABLE_NAME: &'static str = "reply";
