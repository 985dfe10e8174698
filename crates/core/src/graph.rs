//! Entity graph registry: which tables soft-delete, how each table
//! spells its live flag, and which child rows a root deactivation
//! drags along.
//!
//! This module is the single source of truth consulted by the cascade
//! resolver and the access predicates in `taskup-db`. Adding a new
//! dependent entity to an existing cascade means adding one
//! [`ChildRelation`] entry here, not writing a new cascade function.

use serde::Serialize;

/// Every entity type that participates in soft-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    ProjectMember,
    Team,
    TeamMember,
    Task,
    Stakeholder,
    Scope,
    Risk,
    RiskAnalysis,
    RiskResponsePlan,
    Resource,
    ActivityResource,
    Attachment,
}

/// Which boolean value on the flag column means "removed".
///
/// Most tables follow the `is_deleted` convention (true means removed);
/// `team_members` inherited the opposite `is_active` convention (false
/// means removed). The registry carries the polarity so no caller ever
/// branches on which convention a given entity uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagPolarity {
    /// Column is `is_deleted`-shaped: `true` = removed.
    DeletedWhenTrue,
    /// Column is `is_active`-shaped: `false` = removed.
    ActiveWhenTrue,
}

/// The soft-delete flag column of one entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveFlag {
    pub column: &'static str,
    pub polarity: FlagPolarity,
}

impl LiveFlag {
    /// The flag value a live row carries.
    pub const fn live_value(&self) -> bool {
        matches!(self.polarity, FlagPolarity::ActiveWhenTrue)
    }

    /// The flag value a removed row carries.
    pub const fn dead_value(&self) -> bool {
        !self.live_value()
    }

    /// SQL fragment matching live rows, e.g. `is_deleted = FALSE`.
    pub fn live_sql(&self) -> String {
        format!(
            "{} = {}",
            self.column,
            if self.live_value() { "TRUE" } else { "FALSE" }
        )
    }
}

/// A parent-to-child edge in the entity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRelation {
    pub child: EntityKind,
    /// Column on the child table referencing the parent's id.
    pub foreign_key: &'static str,
}

const DELETED: FlagPolarity = FlagPolarity::DeletedWhenTrue;
const ACTIVE: FlagPolarity = FlagPolarity::ActiveWhenTrue;

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Project,
        EntityKind::ProjectMember,
        EntityKind::Team,
        EntityKind::TeamMember,
        EntityKind::Task,
        EntityKind::Stakeholder,
        EntityKind::Scope,
        EntityKind::Risk,
        EntityKind::RiskAnalysis,
        EntityKind::RiskResponsePlan,
        EntityKind::Resource,
        EntityKind::ActivityResource,
        EntityKind::Attachment,
    ];

    /// The database table backing this entity.
    pub const fn table(self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::ProjectMember => "project_members",
            EntityKind::Team => "teams",
            EntityKind::TeamMember => "team_members",
            EntityKind::Task => "tasks",
            EntityKind::Stakeholder => "stakeholders",
            EntityKind::Scope => "project_scopes",
            EntityKind::Risk => "risks",
            EntityKind::RiskAnalysis => "risk_analyses",
            EntityKind::RiskResponsePlan => "risk_response_plans",
            EntityKind::Resource => "resources",
            EntityKind::ActivityResource => "activity_resources",
            EntityKind::Attachment => "attachments",
        }
    }

    /// The soft-delete flag column and its polarity.
    pub const fn flag(self) -> LiveFlag {
        match self {
            EntityKind::TeamMember => LiveFlag {
                column: "is_active",
                polarity: ACTIVE,
            },
            _ => LiveFlag {
                column: "is_deleted",
                polarity: DELETED,
            },
        }
    }

    /// Child relations deactivated together with this entity.
    ///
    /// Order is significant: the cascade resolver walks these edges
    /// depth-first, collecting child ids before marking, so the listed
    /// order is the order dependents go inactive.
    pub const fn children(self) -> &'static [ChildRelation] {
        match self {
            EntityKind::Project => &[
                ChildRelation {
                    child: EntityKind::ProjectMember,
                    foreign_key: "project_id",
                },
                ChildRelation {
                    child: EntityKind::Team,
                    foreign_key: "project_id",
                },
                ChildRelation {
                    child: EntityKind::Task,
                    foreign_key: "project_id",
                },
                ChildRelation {
                    child: EntityKind::Stakeholder,
                    foreign_key: "project_id",
                },
                ChildRelation {
                    child: EntityKind::Scope,
                    foreign_key: "project_id",
                },
            ],
            EntityKind::Team => &[
                ChildRelation {
                    child: EntityKind::TeamMember,
                    foreign_key: "team_id",
                },
                ChildRelation {
                    child: EntityKind::Task,
                    foreign_key: "team_id",
                },
            ],
            EntityKind::Task => &[ChildRelation {
                child: EntityKind::Task,
                foreign_key: "parent_task_id",
            }],
            EntityKind::Risk => &[
                ChildRelation {
                    child: EntityKind::RiskAnalysis,
                    foreign_key: "risk_id",
                },
                ChildRelation {
                    child: EntityKind::RiskResponsePlan,
                    foreign_key: "risk_id",
                },
            ],
            EntityKind::Resource => &[ChildRelation {
                child: EntityKind::ActivityResource,
                foreign_key: "resource_id",
            }],
            _ => &[],
        }
    }
}

/// One step of a cascade: mark `kind` rows inactive, reached through
/// `via` from the parent level (`None` for the root itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeStep {
    pub kind: EntityKind,
    pub via: Option<&'static str>,
}

/// The ordered deactivation plan for a root entity.
///
/// Depth-first over [`EntityKind::children`], root first. Self-referencing
/// edges (task subtasks) appear once in the plan; the resolver loops on
/// collected ids at execution time instead of recursing into the plan.
pub fn cascade_plan(root: EntityKind) -> Vec<CascadeStep> {
    let mut steps = vec![CascadeStep {
        kind: root,
        via: None,
    }];
    push_children(root, &mut steps);
    steps
}

fn push_children(kind: EntityKind, steps: &mut Vec<CascadeStep>) {
    for rel in kind.children() {
        steps.push(CascadeStep {
            kind: rel.child,
            via: Some(rel.foreign_key),
        });
        if rel.child != kind {
            push_children(rel.child, steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_polarity_adapter() {
        // team_members is the lone is_active table.
        let tm = EntityKind::TeamMember.flag();
        assert_eq!(tm.column, "is_active");
        assert!(!tm.dead_value(), "inactive team member stores false");
        assert_eq!(tm.live_sql(), "is_active = TRUE");

        let p = EntityKind::Project.flag();
        assert_eq!(p.column, "is_deleted");
        assert!(p.dead_value(), "deleted project stores true");
        assert_eq!(p.live_sql(), "is_deleted = FALSE");
    }

    #[test]
    fn test_project_plan_covers_canonical_order() {
        // The canonical deletion order: project, members, teams,
        // team members, tasks, stakeholders, scope. The plan may
        // contain additional (idempotent) steps from nested relations,
        // but the canonical sequence must appear in this relative order.
        let plan = cascade_plan(EntityKind::Project);
        let canonical = [
            EntityKind::Project,
            EntityKind::ProjectMember,
            EntityKind::Team,
            EntityKind::TeamMember,
            EntityKind::Task,
            EntityKind::Stakeholder,
            EntityKind::Scope,
        ];

        let mut pos = 0;
        for want in canonical {
            pos += plan[pos..]
                .iter()
                .position(|s| s.kind == want)
                .unwrap_or_else(|| panic!("{want:?} missing from project plan after index {pos}"));
        }
    }

    #[test]
    fn test_project_plan_root_first() {
        let plan = cascade_plan(EntityKind::Project);
        assert_eq!(plan[0].kind, EntityKind::Project);
        assert_eq!(plan[0].via, None);
        assert!(plan[1..].iter().all(|s| s.via.is_some()));
    }

    #[test]
    fn test_team_plan() {
        let plan = cascade_plan(EntityKind::Team);
        let kinds: Vec<_> = plan.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Team,
                EntityKind::TeamMember,
                EntityKind::Task,
                EntityKind::Task, // subtasks via parent_task_id
            ]
        );
        assert_eq!(plan[3].via, Some("parent_task_id"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let plan = cascade_plan(EntityKind::Task);
        assert_eq!(plan.len(), 2, "subtask edge must appear exactly once");
        assert_eq!(plan[1].via, Some("parent_task_id"));
    }

    #[test]
    fn test_leaf_kinds_have_empty_plans() {
        for kind in [
            EntityKind::ProjectMember,
            EntityKind::TeamMember,
            EntityKind::Stakeholder,
            EntityKind::Scope,
            EntityKind::Attachment,
        ] {
            assert_eq!(cascade_plan(kind).len(), 1, "{kind:?} should be a leaf");
        }
    }

    #[test]
    fn test_tables_are_unique() {
        let mut tables: Vec<_> = EntityKind::ALL.iter().map(|k| k.table()).collect();
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), EntityKind::ALL.len());
    }
}
