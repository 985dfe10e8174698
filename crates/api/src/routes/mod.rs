pub mod attachments;
pub mod auth;
pub mod health;
pub mod projects;
pub mod resources;
pub mod risks;
pub mod stakeholders;
pub mod tasks;
pub mod teams;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/verify-email                      verify code (public)
/// /auth/resend-code                       resend code (public)
/// /auth/login                             login (public)
/// /auth/refresh                           refresh (public)
/// /auth/logout                            logout (requires auth)
/// /auth/me                                profile (requires auth)
///
/// /users/{id}                             get user
/// /users/me/teams                         caller's teams
/// /users/me/tasks/assigned                tasks assigned to caller
/// /users/me/tasks/created                 tasks created by caller
///
/// /projects                               list, create
/// /projects/{id}                          get, update, delete (cascade)
/// /projects/{id}/members                  list, add
/// /projects/{id}/members/{user_id}        remove (cascade)
/// /projects/{id}/teams                    project teams
/// /projects/{id}/tasks                    project tasks
/// /projects/{id}/stakeholders             list, add
/// /projects/{id}/scope                    get, create, update
/// /projects/{id}/risks                    project risks
/// /projects/{id}/resources                project resources
/// /projects/{id}/attachments              list, upload (multipart)
/// /projects/{id}/chat/messages            chat history
/// /projects/{id}/chat/presence            users in the room
/// /projects/{id}/chat/ws                  WebSocket chat
///
/// /teams                                  create
/// /teams/{id}                             get, update, delete (cascade)
/// /teams/{id}/members                     list, add
/// /teams/{id}/members/{user_id}           remove
/// /teams/{id}/tasks                       team tasks
///
/// /tasks                                  create
/// /tasks/{id}                             get, update, delete (cascade)
/// /tasks/{id}/subtasks                    subtasks
/// /tasks/{id}/resources                   list, assign
///
/// /stakeholders/{id}                      get, update, delete
///
/// /risks                                  create
/// /risks/{id}                             get, update, delete (cascade)
/// /risks/{id}/analyses                    list, add
/// /risks/{id}/response-plans              list, add
/// /risk-analyses/{id}                     update, delete
/// /risk-plans/{id}                        update, delete
///
/// /resources/{id}                         get, update, delete (cascade)
/// /attachments/{id}                       get, delete
/// /attachments/{id}/download              stored bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/teams", teams::router())
        .nest("/tasks", tasks::router())
        .merge(stakeholders::router())
        .merge(risks::router())
        .merge(resources::router())
        .merge(attachments::router())
}
