pub mod roll_log;
