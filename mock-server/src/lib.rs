//! In-memory stand-in for the todo collaborator API.
//!
//! Ids are assigned sequentially from 1 and listings come back in id order.
//! Creates answer `200` with the stored item, deletes answer `200
//! {"ok":true}`, and unknown ids get `404 {"detail":"Todo not found"}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
}

/// Body of both `POST /todos` and `PUT /todos/{id}`.
#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
}

#[derive(Debug, Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
}

impl Store {
    fn insert(&mut self, title: String) -> Todo {
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            title,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Todo not found" })))
}

/// Every body rejection (bad syntax, wrong shape, missing content type)
/// answers `422 {"detail": ...}`.
fn todo_input(body: Result<Json<TodoInput>, JsonRejection>) -> ApiResult<TodoInput> {
    body.map(|Json(input)| input).map_err(|rejection| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": rejection.body_text() })),
        )
    })
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo api listening");
    }
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let input = todo_input(body)?;
    let todo = db.write().await.insert(input.title);
    info!(id = todo.id, "created todo");
    Ok(Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let input = todo_input(body)?;
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(not_found)?;
    todo.title = input.title;
    info!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or_else(not_found)?;
    info!(id, "deleted todo");
    Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, json!({ "id": 1, "title": "Test" }));
    }

    #[test]
    fn input_rejects_missing_title() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn input_ignores_extra_fields() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"Read","completed":true}"#).unwrap();
        assert_eq!(input.title, "Read");
    }

    #[test]
    fn store_ids_are_sequential_and_never_reused() {
        let mut store = Store::default();
        let a = store.insert("a".to_string());
        let b = store.insert("b".to_string());
        store.todos.remove(&b.id);
        let c = store.insert("c".to_string());
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }
}
