use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::{PageQuery, Pagination, Result};
use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::appointments::models::{
    normalize_notes, Appointment, AppointmentResponse, AppointmentStatus,
    CreateAppointmentRequest, CustomerBrief, ServiceBrief, StaffBrief, UpdateAppointmentRequest,
};
use crate::modules::appointments::repositories::AppointmentRepository;
use crate::modules::appointments::services::pricing::derive_totals;
use crate::modules::appointments::services::reference_validator::{
    ReferenceSource, ReferenceValidator,
};
use crate::modules::auth::repositories::UserRepository;

/// A page of resolved appointments plus its pagination metadata.
pub struct AppointmentPage {
    pub appointments: Vec<AppointmentResponse>,
    pub pagination: Pagination,
}

/// Orchestrates the appointment lifecycle: reference validation, derived
/// pricing, partial updates and soft cancellation.
pub struct AppointmentService {
    appointments: Arc<AppointmentRepository>,
    references: Arc<dyn ReferenceSource>,
    validator: ReferenceValidator,
    users: Arc<UserRepository>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<AppointmentRepository>,
        references: Arc<dyn ReferenceSource>,
        users: Arc<UserRepository>,
    ) -> Self {
        Self {
            appointments,
            validator: ReferenceValidator::new(references.clone()),
            references,
            users,
        }
    }

    /// Book an appointment.
    ///
    /// All referenced entities are resolved first; duration and price are
    /// derived from the resolved services, never taken from the client.
    /// Nothing is persisted if any reference fails to validate.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
        acting_user: &AuthenticatedUser,
    ) -> Result<AppointmentResponse> {
        let resolved = self
            .validator
            .validate_references(&request.customer_id, &request.staff_id, &request.service_ids)
            .await?;

        let totals = derive_totals(&resolved.services);
        let notes = normalize_notes(request.notes)?;

        let appointment = Appointment::new(
            request.customer_id,
            request.staff_id,
            request.service_ids,
            request.appointment_date,
            totals.duration,
            totals.price,
            request.status.unwrap_or_default(),
            notes,
            acting_user.id.clone(),
        );

        self.appointments.create(&appointment).await?;

        info!(
            appointment_id = %appointment.id,
            customer_id = %appointment.customer_id,
            "Appointment booked"
        );

        self.to_response(appointment).await
    }

    /// Partial update: only fields present in the request are validated and
    /// written; a changed service selection re-derives duration and price.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<AppointmentResponse> {
        let mut appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Appointment"))?;

        if let Some(customer_id) = request.customer_id {
            self.validator.resolve_customer(&customer_id).await?;
            appointment.customer_id = customer_id;
        }

        if let Some(staff_id) = request.staff_id {
            self.validator.resolve_staff(&staff_id).await?;
            appointment.staff_id = staff_id;
        }

        let services_changed = request.service_ids.is_some();
        if let Some(service_ids) = request.service_ids {
            let services = self.validator.resolve_services(&service_ids).await?;
            let totals = derive_totals(&services);
            appointment.service_ids = service_ids;
            appointment.duration = totals.duration;
            appointment.price = totals.price;
        }

        if let Some(appointment_date) = request.appointment_date {
            appointment.appointment_date = appointment_date;
        }

        if let Some(status) = request.status {
            if appointment.status.is_transition_allowed(status) {
                appointment.status = status;
            }
        }

        if let Some(notes) = request.notes {
            appointment.notes = normalize_notes(Some(notes))?;
        }

        appointment.updated_at = Utc::now();

        self.appointments.update(&appointment, services_changed).await?;

        self.to_response(appointment).await
    }

    /// Soft delete: cancellation is a status write and is idempotent.
    pub async fn cancel(&self, id: &str) -> Result<AppointmentResponse> {
        let mut appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Appointment"))?;

        if appointment.status != AppointmentStatus::Cancelled {
            self.appointments
                .update_status(id, AppointmentStatus::Cancelled)
                .await?;
            appointment.status = AppointmentStatus::Cancelled;
            appointment.updated_at = Utc::now();

            info!(appointment_id = %id, "Appointment cancelled");
        }

        self.to_response(appointment).await
    }

    pub async fn get(&self, id: &str) -> Result<AppointmentResponse> {
        let appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Appointment"))?;

        self.to_response(appointment).await
    }

    /// Full ledger, newest appointment date first.
    pub async fn list(&self, query: PageQuery) -> Result<AppointmentPage> {
        let total = self.appointments.count().await?;
        let pagination = Pagination::from_query(query, total);

        let appointments = self
            .appointments
            .list(pagination.skip, pagination.limit)
            .await?;

        Ok(AppointmentPage {
            appointments: self.to_responses(appointments).await?,
            pagination,
        })
    }

    /// Today's non-cancelled appointments, earliest first.
    pub async fn list_today(&self, query: PageQuery) -> Result<AppointmentPage> {
        let (start, end) = day_window(Utc::now());

        let total = self.appointments.count_in_window(start, end).await?;
        let pagination = Pagination::from_query(query, total);

        let appointments = self
            .appointments
            .list_in_window(start, end, pagination.skip, pagination.limit)
            .await?;

        Ok(AppointmentPage {
            appointments: self.to_responses(appointments).await?,
            pagination,
        })
    }

    async fn to_responses(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentResponse>> {
        let mut responses = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            responses.push(self.to_response(appointment).await?);
        }
        Ok(responses)
    }

    /// Join the referenced entities for presentation. References that no
    /// longer resolve come back as `null`; historical reads never fail on a
    /// deleted customer, staff member or service.
    async fn to_response(&self, appointment: Appointment) -> Result<AppointmentResponse> {
        let customer = self
            .references
            .find_customer(&appointment.customer_id)
            .await?
            .map(|c| CustomerBrief {
                id: c.id,
                name: c.name,
                phone_number: c.phone_number,
            });

        let staff = self
            .references
            .find_staff(&appointment.staff_id)
            .await?
            .map(|s| StaffBrief {
                id: s.id,
                name: s.name,
            });

        let services = self
            .appointments
            .find_services(&appointment.id)
            .await?
            .into_iter()
            .map(ServiceBrief::from)
            .collect();

        let created_by = self.users.find_summary(&appointment.created_by).await?;

        Ok(AppointmentResponse {
            id: appointment.id,
            customer,
            staff,
            services,
            appointment_date: appointment.appointment_date,
            duration: appointment.duration,
            price: appointment.price,
            status: appointment.status,
            notes: appointment.notes,
            created_by,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        })
    }
}

/// The [start-of-day, end-of-day] window containing `now`.
fn day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = date.and_hms_opt(0, 0, 0).expect("valid time").and_utc();
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid time")
        .and_utc();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_window_brackets_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        let (start, end) = day_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        assert!(end > now);
        assert_eq!(end.date_naive(), now.date_naive());
    }
}
