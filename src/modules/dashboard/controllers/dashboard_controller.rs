use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::auth::models::UserRole;
use crate::modules::auth::repositories::UserRepository;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::staff::repositories::StaffRepository;

const RECENT_STAFF_LIMIT: u32 = 5;

/// GET /dashboard: role-aware statistics. Owners see account counts;
/// receptionists get a reduced view.
pub async fn get_dashboard(
    staff_repo: web::Data<Arc<StaffRepository>>,
    customer_repo: web::Data<Arc<CustomerRepository>>,
    user_repo: web::Data<Arc<UserRepository>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let total_staff = staff_repo.count().await?;
    let recent_staff = staff_repo.recent(RECENT_STAFF_LIMIT).await?;

    let statistics = match user.role {
        UserRole::Owner => {
            let total_customers = customer_repo.count().await?;
            let total_users = user_repo.count().await?;
            let total_owners = user_repo.count_by_role(UserRole::Owner).await?;
            let total_receptionists = user_repo.count_by_role(UserRole::Receptionist).await?;

            serde_json::json!({
                "totalStaff": total_staff,
                "totalCustomers": total_customers,
                "totalUsers": total_users,
                "totalOwners": total_owners,
                "totalReceptionists": total_receptionists,
            })
        }
        UserRole::Receptionist => serde_json::json!({
            "totalStaff": total_staff,
        }),
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {
            "statistics": statistics,
            "recentStaff": recent_staff,
            "greeting": format!("Welcome back, {}!", user.name),
            "userType": user.role,
        },
    })))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
