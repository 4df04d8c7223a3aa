use actix_web::{cookie::Cookie, get, http::header, post, web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use diesel::OptionalExtension;
use hyperschool_common::config::Config;
use hyperschool_common::error::{AppError, AppResult};
use hyperschool_common::forms::FormErrors;
use hyperschool_common::render::{page_context, redirect, render};
use hyperschool_common::utils::{create_token, Role, TOKEN_COOKIE};
use hyperschool_db::connection::{get_conn, PgPool};
use hyperschool_db::models::user::{NewUser, User};
use serde::Serialize;

use crate::forms::{
    login_error, LoginInput, SignUpInput, DUPLICATE_USERNAME, INACTIVE, INVALID_LOGIN,
};

const SIGN_UP_TEMPLATE: &str = "schedule/sign_up.html";
const LOGIN_TEMPLATE: &str = "schedule/login.html";
const SUCCESS_URL: &str = "/schedule/main/";

fn render_form<F: Serialize>(
    req: &HttpRequest,
    template: &str,
    form: &F,
    errors: &FormErrors,
) -> AppResult<HttpResponse> {
    let mut ctx = page_context(req);
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    render(template, &ctx)
}

#[get("/signup/")]
pub(crate) async fn sign_up_page(req: HttpRequest) -> AppResult<HttpResponse> {
    render_form(&req, SIGN_UP_TEMPLATE, &SignUpInput::default(), &FormErrors::new())
}

#[post("/signup/")]
pub(crate) async fn sign_up(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    form: web::Form<SignUpInput>,
) -> AppResult<HttpResponse> {
    let input = form.into_inner();
    let cleaned = match input.clean() {
        Ok(cleaned) => cleaned,
        Err(errors) => return render_form(&req, SIGN_UP_TEMPLATE, &input, &errors),
    };

    let created = web::block(move || -> AppResult<Option<User>> {
        let conn = get_conn(&pool)?;
        let new_user = NewUser {
            username: cleaned.username,
            hash_pwd: hash(&cleaned.password, DEFAULT_COST)
                .map_err(|e| AppError::Hash(e.to_string()))?,
            user_role: Role::User.to_string(),
        };
        Ok(new_user.create_unique(&conn)?)
    })
    .await?;

    match created {
        Some(user) => {
            log::info!("signed up user {}", user.username);
            Ok(redirect(SUCCESS_URL))
        }
        None => {
            let mut errors = FormErrors::new();
            errors.add("username", DUPLICATE_USERNAME);
            render_form(&req, SIGN_UP_TEMPLATE, &input, &errors)
        }
    }
}

#[get("/login/")]
pub(crate) async fn login_page(req: HttpRequest) -> AppResult<HttpResponse> {
    render_form(&req, LOGIN_TEMPLATE, &LoginInput::default(), &FormErrors::new())
}

enum LoginOutcome {
    Authenticated(User),
    Inactive,
    Rejected,
}

#[post("/login/")]
pub(crate) async fn login(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    form: web::Form<LoginInput>,
) -> AppResult<HttpResponse> {
    let input = form.into_inner();
    let creds = match input.clean() {
        Ok(creds) => creds,
        Err(errors) => return render_form(&req, LOGIN_TEMPLATE, &input, &errors),
    };

    let outcome = web::block(move || -> AppResult<LoginOutcome> {
        let conn = get_conn(&pool)?;
        let user = match User::get_by_username(&creds.username, &conn).optional()? {
            Some(user) => user,
            None => return Ok(LoginOutcome::Rejected),
        };
        if !verify(&creds.password, &user.hash_pwd).map_err(|e| AppError::Hash(e.to_string()))? {
            return Ok(LoginOutcome::Rejected);
        }
        if !user.is_active {
            return Ok(LoginOutcome::Inactive);
        }
        user.update_last_login(Utc::now().naive_utc(), &conn)?;
        Ok(LoginOutcome::Authenticated(user))
    })
    .await?;

    let user = match outcome {
        LoginOutcome::Authenticated(user) => user,
        LoginOutcome::Inactive => {
            return render_form(&req, LOGIN_TEMPLATE, &input, &login_error(INACTIVE))
        }
        LoginOutcome::Rejected => {
            log::info!("failed login for {}", input.username.trim());
            return render_form(&req, LOGIN_TEMPLATE, &input, &login_error(INVALID_LOGIN));
        }
    };

    let role = user.user_role.parse::<Role>().unwrap_or_else(|_| {
        log::warn!("user {} has unknown role {}", user.username, user.user_role);
        Role::User
    });
    let token = create_token(user.username.clone(), role, &config.jwt_secret, config.token_ttl)?;
    log::info!("user {} logged in", user.username);

    Ok(HttpResponse::Found()
        .header(header::LOCATION, SUCCESS_URL)
        .cookie(
            Cookie::build(TOKEN_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .finish())
}
