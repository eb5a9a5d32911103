pub mod interview_bookings;
pub mod interview_reports;
pub mod interview_slots;
