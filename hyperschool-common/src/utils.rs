use actix_web::{http::header, web, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::config::Config;
use crate::error::AppResult;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

impl Claims {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

pub fn create_token(sub: String, role: Role, secret: &str, ttl: Duration) -> AppResult<String> {
    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Reads claims from a `Bearer` authorization header, falling back to the
/// login cookie. Invalid or expired tokens count as anonymous.
pub fn get_claims(req: &HttpRequest) -> Option<Claims> {
    let config = req.app_data::<web::Data<Config>>()?;
    let token = bearer_token(req)
        .or_else(|| req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string()))?;
    match decode_token(&token, &config.jwt_secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::debug!("rejected token: {}", e);
            None
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}
