//! HTML rendering over the templates embedded in this crate.
//!
//! Every page extends `base.html`; names mirror the paths under
//! `templates/`, e.g. `schedule/index.html`.

use actix_web::{http::header, HttpRequest, HttpResponse};
use tera::{Context, Tera};

use crate::error::AppResult;
use crate::utils::get_claims;

lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("error.html", include_str!("../templates/error.html")),
            ("schedule/index.html", include_str!("../templates/schedule/index.html")),
            ("schedule/course.html", include_str!("../templates/schedule/course.html")),
            ("schedule/teacher.html", include_str!("../templates/schedule/teacher.html")),
            ("schedule/add_course.html", include_str!("../templates/schedule/add_course.html")),
            ("schedule/sign_up.html", include_str!("../templates/schedule/sign_up.html")),
            ("schedule/login.html", include_str!("../templates/schedule/login.html")),
        ])
        .expect("Failed to compile templates");
        tera
    };
}

/// Context every page starts from: the logged-in username, if any.
pub fn page_context(req: &HttpRequest) -> Context {
    let mut ctx = Context::new();
    if let Some(claims) = get_claims(req) {
        ctx.insert("user", &claims.sub);
    }
    ctx
}

pub fn render_to_string(template: &str, ctx: &Context) -> AppResult<String> {
    Ok(TEMPLATES.render(template, ctx)?)
}

/// Renders `template` into a `200 OK` HTML response.
pub fn render(template: &str, ctx: &Context) -> AppResult<HttpResponse> {
    let body = render_to_string(template, ctx)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .header(header::LOCATION, location)
        .finish()
}
