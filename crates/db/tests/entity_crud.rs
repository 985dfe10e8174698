//! Integration tests for basic CRUD behaviour and schema-level
//! constraints (partial unique indexes, CHECK constraints).

use sqlx::PgPool;
use taskup_db::models::project::CreateProject;
use taskup_db::models::scope::{CreateScope, UpdateScope};
use taskup_db::models::stakeholder::CreateStakeholder;
use taskup_db::models::task::CreateTask;
use taskup_db::models::user::{CreateUser, User};
use taskup_db::repositories::{ProjectRepo, ScopeRepo, StakeholderRepo, TaskRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Crud".to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
        },
        "$argon2id$fake-hash",
    )
    .await
    .unwrap()
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        deadline: None,
        total_budget: Some(1000.0),
    }
}

// ---------------------------------------------------------------------------
// Test: project create defaults and update
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_project_create_and_update(pool: PgPool) {
    let owner = seed_user(&pool, "owner@crud.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Budgeted"))
        .await
        .unwrap();

    assert_eq!(project.owner_id, owner.id);
    assert_eq!(project.total_budget, 1000.0);
    assert_eq!(
        project.remaining_budget, 1000.0,
        "remaining budget starts equal to total"
    );
    assert_eq!(project.progress, 0);
    assert!(!project.is_deleted);

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &taskup_db::models::project::UpdateProject {
            name: Some("Renamed".to_string()),
            description: None,
            deadline: None,
            progress: Some(40),
            total_budget: None,
            remaining_budget: Some(600.0),
        },
    )
    .await
    .unwrap()
    .expect("live project should update");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.progress, 40);
    assert_eq!(updated.remaining_budget, 600.0);
    // Untouched fields survive a partial update.
    assert_eq!(updated.total_budget, 1000.0);
}

// ---------------------------------------------------------------------------
// Test: duplicate email is rejected by the unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_duplicate_email_rejected(pool: PgPool) {
    seed_user(&pool, "dup@crud.test").await;
    let result = UserRepo::create(
        &pool,
        &CreateUser {
            first_name: "Second".to_string(),
            last_name: "User".to_string(),
            email: "dup@crud.test".to_string(),
        },
        "$argon2id$fake-hash",
    )
    .await;
    assert!(result.is_err(), "duplicate email must violate uq_users_email");
}

// ---------------------------------------------------------------------------
// Test: one live membership per (project, user)
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_duplicate_membership_rejected(pool: PgPool) {
    let owner = seed_user(&pool, "owner@dupmember.test").await;
    let member = seed_user(&pool, "member@dupmember.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Members"))
        .await
        .unwrap();

    ProjectRepo::add_member(&pool, project.id, member.id, None)
        .await
        .unwrap();
    let dup = ProjectRepo::add_member(&pool, project.id, member.id, None).await;
    assert!(dup.is_err(), "second live membership must be rejected");
}

// ---------------------------------------------------------------------------
// Test: stakeholder percentage CHECK constraint backstop
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_percentage_check_constraint(pool: PgPool) {
    let owner = seed_user(&pool, "owner@pct.test").await;
    let user = seed_user(&pool, "stake@pct.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Shares"))
        .await
        .unwrap();

    // Boundary values are accepted.
    for (email_suffix, pct) in [("zero", 0.0), ("hundred", 100.0)] {
        let extra = seed_user(&pool, &format!("stake-{email_suffix}@pct.test")).await;
        StakeholderRepo::create(
            &pool,
            &CreateStakeholder {
                project_id: project.id,
                user_id: extra.id,
                role: None,
                percentage: pct,
            },
        )
        .await
        .unwrap_or_else(|e| panic!("percentage {pct} should be accepted: {e}"));
    }

    // Out-of-range values hit the CHECK constraint even if a caller
    // skips the core validation.
    let result = StakeholderRepo::create(
        &pool,
        &CreateStakeholder {
            project_id: project.id,
            user_id: user.id,
            role: None,
            percentage: 101.0,
        },
    )
    .await;
    assert!(result.is_err(), "percentage 101 must violate the CHECK");
}

// ---------------------------------------------------------------------------
// Test: task assignment exclusivity CHECK constraint
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_task_assignment_check_constraint(pool: PgPool) {
    let owner = seed_user(&pool, "owner@assign.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Assigned"))
        .await
        .unwrap();
    let team = taskup_db::repositories::TeamRepo::create(
        &pool,
        owner.id,
        &taskup_db::models::team::CreateTeam {
            project_id: project.id,
            name: "Crew".to_string(),
            description: None,
            color_index: None,
        },
    )
    .await
    .unwrap();

    let result = TaskRepo::create(
        &pool,
        owner.id,
        &CreateTask {
            project_id: project.id,
            team_id: Some(team.id),
            user_id: Some(owner.id),
            parent_task_id: None,
            title: "Doubly assigned".to_string(),
            description: None,
            cost: None,
            status: None,
            priority: None,
            deadline: None,
        },
    )
    .await;
    assert!(
        result.is_err(),
        "a task assigned to both a team and a user must be rejected"
    );
}

// ---------------------------------------------------------------------------
// Test: one live scope per project; update touches only given fields
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_scope_single_live_row(pool: PgPool) {
    let owner = seed_user(&pool, "owner@scope.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Scoped"))
        .await
        .unwrap();

    ScopeRepo::create(
        &pool,
        project.id,
        &CreateScope {
            included_items: Some("API".to_string()),
            excluded_items: Some("Mobile app".to_string()),
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();

    let second = ScopeRepo::create(
        &pool,
        project.id,
        &CreateScope {
            included_items: None,
            excluded_items: None,
            start_date: None,
            end_date: None,
        },
    )
    .await;
    assert!(second.is_err(), "a second live scope must be rejected");

    let updated = ScopeRepo::update_by_project(
        &pool,
        project.id,
        &UpdateScope {
            included_items: Some("API, batch jobs".to_string()),
            excluded_items: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap()
    .expect("live scope should update");
    assert_eq!(updated.included_items.as_deref(), Some("API, batch jobs"));
    assert_eq!(
        updated.excluded_items.as_deref(),
        Some("Mobile app"),
        "untouched fields survive"
    );
}
