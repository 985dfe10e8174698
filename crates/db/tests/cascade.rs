//! Integration tests for the table-driven cascade resolver.
//!
//! Verifies cascade completeness (no orphaned-active dependents after a
//! root deletion), the no-op behaviour on repeated deletion, and the
//! narrower member-removal and team cascades.

use sqlx::PgPool;
use taskup_core::graph::EntityKind;
use taskup_db::models::project::CreateProject;
use taskup_db::models::risk::{CreateRisk, CreateRiskAnalysis, CreateRiskResponsePlan};
use taskup_db::models::scope::CreateScope;
use taskup_db::models::stakeholder::CreateStakeholder;
use taskup_db::models::task::CreateTask;
use taskup_db::models::team::{AddTeamMember, CreateTeam};
use taskup_db::models::user::{CreateUser, User};
use taskup_db::repositories::{
    CascadeOutcome, LifecycleRepo, ProjectRepo, RiskAnalysisRepo, RiskRepo, RiskResponsePlanRepo,
    ScopeRepo, StakeholderRepo, TaskRepo, TeamRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Cascade".to_string(),
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
        total_budget: None,
    }
}

fn new_team(project_id: uuid::Uuid, name: &str) -> CreateTeam {
    CreateTeam {
        project_id,
        name: name.to_string(),
        description: None,
        color_index: None,
    }
}

fn user_task(project_id: uuid::Uuid, user_id: uuid::Uuid, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        team_id: None,
        user_id: Some(user_id),
        parent_task_id: None,
        title: title.to_string(),
        description: None,
        cost: None,
        status: None,
        priority: None,
        deadline: None,
    }
}

// ---------------------------------------------------------------------------
// Test: project deletion deactivates every dependent
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_project_cascade_completeness(pool: PgPool) {
    let owner = seed_user(&pool, "owner@cascade.test").await;
    let member = seed_user(&pool, "member@cascade.test").await;
    let stakeholder = seed_user(&pool, "stake@cascade.test").await;

    let project = ProjectRepo::create(&pool, owner.id, &new_project("Doomed"))
        .await
        .unwrap();
    let membership = ProjectRepo::add_member(&pool, project.id, member.id, None)
        .await
        .unwrap();
    let team = TeamRepo::create(&pool, owner.id, &new_team(project.id, "Alpha"))
        .await
        .unwrap();
    let team_membership = TeamRepo::add_member(
        &pool,
        team.id,
        &AddTeamMember {
            user_id: member.id,
            role: None,
            is_leader: None,
        },
    )
    .await
    .unwrap();
    let task = TaskRepo::create(&pool, owner.id, &user_task(project.id, member.id, "Work"))
        .await
        .unwrap();
    let stake = StakeholderRepo::create(
        &pool,
        &CreateStakeholder {
            project_id: project.id,
            user_id: stakeholder.id,
            role: None,
            percentage: 25.0,
        },
    )
    .await
    .unwrap();
    let scope = ScopeRepo::create(
        &pool,
        project.id,
        &CreateScope {
            included_items: Some("everything".to_string()),
            excluded_items: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();

    let outcome = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Project, project.id)
        .await
        .unwrap();
    assert_eq!(outcome, CascadeOutcome::Deleted);

    // No orphaned-active dependent may survive.
    for (kind, id) in [
        (EntityKind::Project, project.id),
        (EntityKind::ProjectMember, membership.id),
        (EntityKind::Team, team.id),
        (EntityKind::TeamMember, team_membership.id),
        (EntityKind::Task, task.id),
        (EntityKind::Stakeholder, stake.id),
        (EntityKind::Scope, scope.id),
    ] {
        let live = LifecycleRepo::is_live(&pool, kind, id).await.unwrap();
        assert_eq!(live, Some(false), "{kind:?} should be inactive after cascade");
    }
}

// ---------------------------------------------------------------------------
// Test: repeated deletion is a no-op success, missing id is not found
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_repeat_deletion_is_noop(pool: PgPool) {
    let owner = seed_user(&pool, "owner@repeat.test").await;
    let member = seed_user(&pool, "member@repeat.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Twice"))
        .await
        .unwrap();

    let first = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Project, project.id)
        .await
        .unwrap();
    assert_eq!(first, CascadeOutcome::Deleted);

    // A member added after the cascade would be caught by a re-run; the
    // second call must not re-run it.
    let late_member = ProjectRepo::add_member(&pool, project.id, member.id, None)
        .await
        .unwrap();

    let second = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Project, project.id)
        .await
        .unwrap();
    assert_eq!(second, CascadeOutcome::AlreadyDeleted);

    let live = LifecycleRepo::is_live(&pool, EntityKind::ProjectMember, late_member.id)
        .await
        .unwrap();
    assert_eq!(
        live,
        Some(true),
        "second deletion must not re-run the cascade"
    );

    let missing = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Project, uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert_eq!(missing, CascadeOutcome::NotFound);
}

// ---------------------------------------------------------------------------
// Test: removing a project member takes their team memberships and
// assigned tasks, but leaves the team itself alone
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_remove_member_cascade(pool: PgPool) {
    let owner = seed_user(&pool, "owner@member.test").await;
    let member = seed_user(&pool, "member@member.test").await;

    let project = ProjectRepo::create(&pool, owner.id, &new_project("P1"))
        .await
        .unwrap();
    let membership = ProjectRepo::add_member(&pool, project.id, member.id, None)
        .await
        .unwrap();
    let team = TeamRepo::create(&pool, owner.id, &new_team(project.id, "Tm1"))
        .await
        .unwrap();
    let team_membership = TeamRepo::add_member(
        &pool,
        team.id,
        &AddTeamMember {
            user_id: member.id,
            role: None,
            is_leader: None,
        },
    )
    .await
    .unwrap();
    let task = TaskRepo::create(&pool, owner.id, &user_task(project.id, member.id, "K1"))
        .await
        .unwrap();

    let removed = LifecycleRepo::remove_project_member(&pool, project.id, member.id)
        .await
        .unwrap();
    assert!(removed);

    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::ProjectMember, membership.id)
            .await
            .unwrap(),
        Some(false)
    );
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::TeamMember, team_membership.id)
            .await
            .unwrap(),
        Some(false)
    );
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Task, task.id)
            .await
            .unwrap(),
        Some(false)
    );
    // The team itself stays live; only the membership and the task go.
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Team, team.id)
            .await
            .unwrap(),
        Some(true)
    );

    // Removing the same member again reports the missing membership.
    let again = LifecycleRepo::remove_project_member(&pool, project.id, member.id)
        .await
        .unwrap();
    assert!(!again);
}

// ---------------------------------------------------------------------------
// Test: team deletion takes memberships and team tasks, not the project
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_team_cascade(pool: PgPool) {
    let owner = seed_user(&pool, "owner@team.test").await;
    let member = seed_user(&pool, "member@team.test").await;

    let project = ProjectRepo::create(&pool, owner.id, &new_project("Keeps Going"))
        .await
        .unwrap();
    let team = TeamRepo::create(&pool, owner.id, &new_team(project.id, "Bravo"))
        .await
        .unwrap();
    let team_membership = TeamRepo::add_member(
        &pool,
        team.id,
        &AddTeamMember {
            user_id: member.id,
            role: None,
            is_leader: None,
        },
    )
    .await
    .unwrap();
    let team_task = TaskRepo::create(
        &pool,
        owner.id,
        &CreateTask {
            project_id: project.id,
            team_id: Some(team.id),
            user_id: None,
            parent_task_id: None,
            title: "Team work".to_string(),
            description: None,
            cost: None,
            status: None,
            priority: None,
            deadline: None,
        },
    )
    .await
    .unwrap();
    let other_task = TaskRepo::create(&pool, owner.id, &user_task(project.id, owner.id, "Other"))
        .await
        .unwrap();

    let outcome = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Team, team.id)
        .await
        .unwrap();
    assert_eq!(outcome, CascadeOutcome::Deleted);

    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::TeamMember, team_membership.id)
            .await
            .unwrap(),
        Some(false)
    );
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Task, team_task.id)
            .await
            .unwrap(),
        Some(false)
    );
    // Tasks outside the team and the project itself are untouched.
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Task, other_task.id)
            .await
            .unwrap(),
        Some(true)
    );
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Project, project.id)
            .await
            .unwrap(),
        Some(true)
    );
}

// ---------------------------------------------------------------------------
// Test: deleting a task takes its subtasks
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_task_cascade_takes_subtasks(pool: PgPool) {
    let owner = seed_user(&pool, "owner@subtask.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Nested"))
        .await
        .unwrap();
    let parent = TaskRepo::create(&pool, owner.id, &user_task(project.id, owner.id, "Parent"))
        .await
        .unwrap();
    let subtask = TaskRepo::create(
        &pool,
        owner.id,
        &CreateTask {
            project_id: project.id,
            team_id: None,
            user_id: None,
            parent_task_id: Some(parent.id),
            title: "Child".to_string(),
            description: None,
            cost: None,
            status: None,
            priority: None,
            deadline: None,
        },
    )
    .await
    .unwrap();

    let outcome = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Task, parent.id)
        .await
        .unwrap();
    assert_eq!(outcome, CascadeOutcome::Deleted);

    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::Task, subtask.id)
            .await
            .unwrap(),
        Some(false),
        "subtask should follow its parent"
    );
}

// ---------------------------------------------------------------------------
// Test: risk deletion takes analyses and response plans
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_risk_cascade(pool: PgPool) {
    let owner = seed_user(&pool, "owner@risk.test").await;
    let project = ProjectRepo::create(&pool, owner.id, &new_project("Risky"))
        .await
        .unwrap();
    let risk = RiskRepo::create(
        &pool,
        owner.id,
        &CreateRisk {
            project_id: project.id,
            name: "Supplier failure".to_string(),
            description: None,
            category: "External".to_string(),
            probability: 0.3,
            impact: None,
            severity: 4.0,
            status: None,
        },
    )
    .await
    .unwrap();
    let analysis = RiskAnalysisRepo::create(
        &pool,
        risk.id,
        owner.id,
        &CreateRiskAnalysis {
            analysis_type: "Qualitative".to_string(),
            matrix_score: "3x4".to_string(),
            expected_value: 1.2,
        },
    )
    .await
    .unwrap();
    let plan = RiskResponsePlanRepo::create(
        &pool,
        risk.id,
        owner.id,
        &CreateRiskResponsePlan {
            strategy: "Mitigate".to_string(),
            description: None,
            planned_actions: "Dual-source".to_string(),
            status: None,
        },
    )
    .await
    .unwrap();

    let outcome = LifecycleRepo::soft_delete_tree(&pool, EntityKind::Risk, risk.id)
        .await
        .unwrap();
    assert_eq!(outcome, CascadeOutcome::Deleted);

    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::RiskAnalysis, analysis.id)
            .await
            .unwrap(),
        Some(false)
    );
    assert_eq!(
        LifecycleRepo::is_live(&pool, EntityKind::RiskResponsePlan, plan.id)
            .await
            .unwrap(),
        Some(false)
    );
}
