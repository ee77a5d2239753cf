mod appointment;

pub use appointment::{
    normalize_notes, Appointment, AppointmentResponse, AppointmentStatus,
    CreateAppointmentRequest, CustomerBrief, ServiceBrief, StaffBrief,
    UpdateAppointmentRequest, MAX_NOTES_LEN,
};
