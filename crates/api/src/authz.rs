//! Authorization guards translating access predicates into API errors.
//!
//! The predicates in `taskup_db::repositories::AccessRepo` report a
//! missing or soft-deleted project as `None`. These guards turn that
//! into a 404 and a failed relationship check into a 403, keeping the
//! two outcomes distinct at every call site.
//!
//! The asymmetry between the two guards is deliberate: membership is
//! enough to read a project and work inside it, but restructuring
//! (deleting the project, managing members, creating teams, managing
//! stakeholders and scope) is reserved for the owner.

use taskup_core::error::CoreError;
use taskup_core::types::DbId;
use taskup_db::repositories::AccessRepo;
use taskup_db::DbPool;

use crate::error::AppError;

/// Require that `user_id` owns the live project.
pub async fn require_owner(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
) -> Result<(), AppError> {
    match AccessRepo::is_owner(pool, project_id, user_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })),
        Some(false) => Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner can perform this operation".into(),
        ))),
        Some(true) => Ok(()),
    }
}

/// Require that `user_id` is the owner of or a member of the live
/// project.
pub async fn require_access(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
) -> Result<(), AppError> {
    match AccessRepo::has_access(pool, project_id, user_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })),
        Some(false) => Err(AppError::Core(CoreError::Forbidden(
            "You are not a member of this project".into(),
        ))),
        Some(true) => Ok(()),
    }
}
