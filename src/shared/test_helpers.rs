#[cfg(test)]
use crate::features::auth::model::AuthenticatedAdmin;
#[cfg(test)]
use crate::shared::constants::{ROLE_STAFF, ROLE_SUPER_ADMIN};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_super_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        id: Uuid::new_v4(),
        email: "super@example.org".to_string(),
        role: ROLE_SUPER_ADMIN.to_string(),
    }
}

#[cfg(test)]
pub fn create_staff_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        id: Uuid::new_v4(),
        email: "staff@example.org".to_string(),
        role: ROLE_STAFF.to_string(),
    }
}
