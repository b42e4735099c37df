pub mod appointment_repository;
pub mod service_record_repository;
pub mod service_repository;
pub mod user_repository;

pub use appointment_repository::AppointmentRepository;
pub use service_record_repository::ServiceRecordRepository;
pub use service_repository::ServiceRepository;
pub use user_repository::UserRepository;
