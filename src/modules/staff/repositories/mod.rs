mod staff_repository;

pub use staff_repository::StaffRepository;
