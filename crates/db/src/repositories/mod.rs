//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations that check a rule
//! and then write do both inside one transaction and return
//! [`StoreError`](crate::StoreError).

pub mod application_repo;
pub mod interview_availability_repo;
pub mod interview_booking_repo;
pub mod interview_slot_repo;
pub mod interview_statistics_repo;

pub use application_repo::ApplicationRepo;
pub use interview_availability_repo::InterviewAvailabilityRepo;
pub use interview_booking_repo::InterviewBookingRepo;
pub use interview_slot_repo::InterviewSlotRepo;
pub use interview_statistics_repo::InterviewStatisticsRepo;
