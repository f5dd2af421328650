pub mod civil_date_time;
pub mod time_frame;
