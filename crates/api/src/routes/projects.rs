//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped sub-resources (members, stakeholders,
//! scope, risks, resources, attachments, chat) under
//! `/projects/{id}/...`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{attachment, chat, project, resource, risk, scope, stakeholder};
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/members",
            get(project::list_members).post(project::add_member),
        )
        .route("/{id}/members/{user_id}", delete(project::remove_member))
        .route("/{id}/teams", get(project::list_teams))
        .route("/{id}/tasks", get(project::list_tasks))
        .route(
            "/{id}/stakeholders",
            get(stakeholder::list_by_project).post(stakeholder::create),
        )
        .route(
            "/{id}/scope",
            get(scope::get_by_project)
                .post(scope::create)
                .put(scope::update),
        )
        .route("/{id}/risks", get(risk::list_by_project))
        .route("/{id}/resources", get(resource::list_by_project))
        .route(
            "/{id}/attachments",
            get(attachment::list_by_project).post(attachment::upload),
        )
        .route("/{id}/chat/messages", get(chat::history))
        .route("/{id}/chat/presence", get(chat::presence))
        .route("/{id}/chat/ws", get(ws::handler::chat_ws))
}
