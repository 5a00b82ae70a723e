pub mod daily_log;
pub mod insight;
pub mod upload;
