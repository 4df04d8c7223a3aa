use std::sync::Mutex;

use actix_web::{get, post, web, HttpResponse};
use hyperschool_common::render::redirect;
use serde::Deserialize;

/// Ordered, duplicate-free list of todo items.
#[derive(Debug, Default)]
pub struct TodoList {
    items: Vec<String>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` unless an identical one is already listed. Important
    /// items go to the front. Returns whether the list changed.
    pub fn add(&mut self, item: String, important: bool) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        if important {
            self.items.insert(0, item);
        } else {
            self.items.push(item);
        }
        true
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

pub type SharedTodoList = web::Data<Mutex<TodoList>>;

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub todo: String,
    #[serde(default)]
    pub important: String,
}

#[post("/todo/")]
pub async fn add_todo(todos: SharedTodoList, form: web::Form<TodoForm>) -> HttpResponse {
    let TodoForm { todo, important } = form.into_inner();
    let important = !important.is_empty();
    let mut list = todos.lock().unwrap_or_else(|e| e.into_inner());
    if list.add(todo, important) {
        log::debug!("todo list now has {} items", list.items().len());
    }
    redirect("/")
}

#[get("/todo/")]
pub async fn list_todos(todos: SharedTodoList) -> HttpResponse {
    let list = todos.lock().unwrap_or_else(|e| e.into_inner());
    HttpResponse::Ok().json(list.items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[test]
    fn important_items_go_first_and_duplicates_are_skipped() {
        let mut list = TodoList::new();
        assert!(list.add("buy milk".into(), false));
        assert!(list.add("pay rent".into(), true));
        assert!(list.add("walk dog".into(), false));
        assert!(!list.add("buy milk".into(), true));
        assert!(list.add("Buy milk".into(), false));
        assert_eq!(
            list.items(),
            ["pay rent", "buy milk", "walk dog", "Buy milk"]
        );
    }

    #[actix_rt::test]
    async fn post_redirects_home_and_updates_list() {
        let todos = web::Data::new(Mutex::new(TodoList::new()));
        let mut app = test::init_service(
            App::new()
                .app_data(todos.clone())
                .service(add_todo)
                .service(list_todos),
        )
        .await;

        for (todo, important) in &[("first", ""), ("urgent", "on"), ("first", "on")] {
            let req = test::TestRequest::post()
                .uri("/todo/")
                .set_form(&[("todo", *todo), ("important", *important)])
                .to_request();
            let resp = test::call_service(&mut app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(resp.headers().get("location").unwrap(), "/");
        }

        let req = test::TestRequest::get().uri("/todo/").to_request();
        let items: Vec<String> = test::read_response_json(&mut app, req).await;
        assert_eq!(items, vec!["urgent".to_string(), "first".to_string()]);
    }

    #[actix_rt::test]
    async fn missing_important_means_not_important() {
        let todos = web::Data::new(Mutex::new(TodoList::new()));
        let mut app =
            test::init_service(App::new().app_data(todos.clone()).service(add_todo)).await;

        for todo in &["a", "b"] {
            let req = test::TestRequest::post()
                .uri("/todo/")
                .set_form(&[("todo", *todo)])
                .to_request();
            test::call_service(&mut app, req).await;
        }
        assert_eq!(todos.lock().unwrap().items(), ["a", "b"]);
    }
}
