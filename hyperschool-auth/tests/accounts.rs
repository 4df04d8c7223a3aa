//! Runs against a live PostgreSQL named by `DATABASE_URL`:
//! `cargo test -p hyperschool-auth -- --ignored`.
//! Accounts created here are committed; usernames carry a per-run suffix.

use actix_web::{http::header, http::StatusCode, test, App};
use chrono::{Duration, Utc};
use hyperschool_auth::forms::DUPLICATE_USERNAME;
use hyperschool_common::config::Config;
use hyperschool_common::utils::{decode_token, Role, TOKEN_COOKIE};
use hyperschool_db::connection::{create_connection_pool, get_conn, PgPool};
use hyperschool_db::models::user::{NewUser, User};
use hyperschool_db::run_migrations;

const SECRET: &str = "s3cret";

fn pool() -> PgPool {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_connection_pool(&url).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

fn config() -> Config {
    Config {
        database_url: String::new(),
        bind_address: String::new(),
        jwt_secret: SECRET.into(),
        token_ttl: Duration::hours(1),
    }
}

fn unique_username(prefix: &str) -> String {
    let now = Utc::now();
    format!("{}{}{}", prefix, now.timestamp(), now.timestamp_subsec_nanos())
}

#[actix_rt::test]
#[ignore]
async fn taken_username_is_a_form_error() {
    let username = unique_username("grace");
    let form = [
        ("username", username.as_str()),
        ("password1", "cobol-1959"),
        ("password2", "cobol-1959"),
    ];
    let mut app = test::init_service(
        App::new()
            .data(pool())
            .data(config())
            .configure(hyperschool_auth::configure_service),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_form(&form)
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/schedule/main/"
    );

    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_form(&form)
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains(DUPLICATE_USERNAME));
}

#[actix_rt::test]
#[ignore]
async fn login_sets_token_cookie_and_last_login() {
    let pool = pool();
    let username = unique_username("ada");
    let user = NewUser {
        username: username.clone(),
        hash_pwd: bcrypt::hash("engine-1843", 4).unwrap(),
        user_role: Role::User.to_string(),
    }
    .create(&get_conn(&pool).unwrap())
    .unwrap();
    assert!(user.last_login.is_none());

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .data(config())
            .configure(hyperschool_auth::configure_service),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/login/")
        .set_form(&[("username", username.as_str()), ("password", "engine-1843")])
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == TOKEN_COOKIE)
        .expect("no token cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    let claims = decode_token(cookie.value(), SECRET).unwrap();
    assert_eq!(claims.sub, username);
    assert_eq!(claims.role(), Some(Role::User));

    let refreshed = User::get_by_username(&username, &get_conn(&pool).unwrap()).unwrap();
    assert!(refreshed.last_login.is_some());
}

#[actix_rt::test]
#[ignore]
async fn wrong_password_is_rejected() {
    let pool = pool();
    let username = unique_username("alan");
    NewUser {
        username: username.clone(),
        hash_pwd: bcrypt::hash("enigma-1941", 4).unwrap(),
        user_role: Role::User.to_string(),
    }
    .create(&get_conn(&pool).unwrap())
    .unwrap();

    let mut app = test::init_service(
        App::new()
            .data(pool.clone())
            .data(config())
            .configure(hyperschool_auth::configure_service),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/login/")
        .set_form(&[("username", username.as_str()), ("password", "bombe-1940")])
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().all(|c| c.name() != TOKEN_COOKIE));

    let refreshed = User::get_by_username(&username, &get_conn(&pool).unwrap()).unwrap();
    assert!(refreshed.last_login.is_none());
}
