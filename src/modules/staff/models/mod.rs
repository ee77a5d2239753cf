mod staff_member;

pub use staff_member::{CreateStaffRequest, StaffMember, UpdateStaffRequest};
