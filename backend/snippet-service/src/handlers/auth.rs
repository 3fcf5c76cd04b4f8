/// Auth handlers - the login/signup form actions and the OAuth redirect
///
/// Form actions answer with redirects rather than JSON: back to `/` on
/// success, to `/error` on any failure.
use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::clients::IdentityClient;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Login form action
/// POST /auth/login
pub async fn login(identity: web::Data<IdentityClient>, form: web::Form<LoginForm>) -> HttpResponse {
    match identity
        .sign_in_with_password(&form.email, &form.password)
        .await
    {
        Ok(session) => {
            let cookie = Cookie::build("access_token", session.access_token)
                .path("/")
                .http_only(true)
                .finish();
            HttpResponse::SeeOther()
                .cookie(cookie)
                .insert_header((header::LOCATION, "/"))
                .finish()
        }
        Err(err) => {
            tracing::warn!("login failed: {err}");
            see_other("/error")
        }
    }
}

/// Signup form action
/// POST /auth/signup
pub async fn signup(
    identity: web::Data<IdentityClient>,
    form: web::Form<SignupForm>,
) -> HttpResponse {
    if form.password != form.confirm_password {
        return see_other("/error");
    }

    match identity.sign_up(&form.email, &form.password).await {
        Ok(()) => see_other("/"),
        Err(err) => {
            tracing::warn!("signup failed: {err}");
            see_other("/error")
        }
    }
}

/// Start the GitHub OAuth flow
/// GET /auth/github
pub async fn github(identity: web::Data<IdentityClient>) -> HttpResponse {
    see_other(&identity.authorize_url("github"))
}

/// Static error route the form actions redirect to
/// GET /error
pub async fn error_page() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "error": "Sorry, something went wrong"
    }))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}
