//! Edge access-gate middleware.
//!
//! Runs before every handler and decides public/auth-only/protected access
//! from the route table and cookie **presence** alone. Deliberately no
//! store lookup and no database call: the gate must stay fast and must not
//! block on the database. Full validation is the `CurrentSession`
//! extractor's job inside handlers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use jeton_auth::gate::{self, DASHBOARD_PATH, GateDecision, LOGIN_PATH};

use crate::cookies;
use crate::state::AppState;

/// Evaluates the route gate for each inbound request.
pub async fn access_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let jar = CookieJar::from_headers(request.headers());
    let has_session = cookies::extract(&jar, &state.config.session).is_some();

    match gate::evaluate(&path, has_session, gate::default_route_table()) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin { redirect } => {
            Redirect::temporary(&format!("{LOGIN_PATH}?redirect={redirect}")).into_response()
        }
        GateDecision::RedirectToDashboard => Redirect::temporary(DASHBOARD_PATH).into_response(),
    }
}
