//! A small persistence backend for exercising the request adapter over real
//! HTTP: a `horses` collection plus an `/echo` route that reflects what it
//! received.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
}

#[derive(Deserialize)]
pub struct CreateHorse {
    pub name: String,
    #[serde(default)]
    pub breed: String,
}

#[derive(Deserialize)]
pub struct UpdateHorse {
    pub name: Option<String>,
    pub breed: Option<String>,
}

#[derive(Deserialize)]
pub struct HorseFilter {
    pub breed: Option<String>,
    pub limit: Option<usize>,
}

/// What `/echo` saw, returned as JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Horse>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/horses", get(list_horses).post(create_horse))
        .route("/horses/{id}", get(get_horse).put(update_horse).delete(delete_horse))
        .route("/echo", any(echo))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn rejection(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "code": code }))).into_response()
}

fn validate(name: &str) -> Result<(), Response> {
    if name.trim().is_empty() {
        return Err(rejection(StatusCode::BAD_REQUEST, "INVALID_HORSE"));
    }
    Ok(())
}

async fn list_horses(State(db): State<Db>, Query(filter): Query<HorseFilter>) -> Json<Vec<Horse>> {
    let horses = db.read().await;
    let mut matching: Vec<Horse> = horses
        .values()
        .filter(|horse| filter.breed.as_deref().map_or(true, |breed| horse.breed == breed))
        .cloned()
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(limit) = filter.limit {
        matching.truncate(limit);
    }
    Json(matching)
}

async fn create_horse(
    State(db): State<Db>,
    Json(input): Json<CreateHorse>,
) -> Result<(StatusCode, Json<Horse>), Response> {
    validate(&input.name)?;
    let horse = Horse {
        id: Uuid::new_v4(),
        name: input.name,
        breed: input.breed,
    };
    db.write().await.insert(horse.id, horse.clone());
    Ok((StatusCode::CREATED, Json(horse)))
}

async fn get_horse(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Horse>, Response> {
    let horses = db.read().await;
    horses
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| rejection(StatusCode::NOT_FOUND, "NOT_FOUND"))
}

async fn update_horse(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateHorse>,
) -> Result<Json<Horse>, Response> {
    if let Some(name) = &input.name {
        validate(name)?;
    }
    let mut horses = db.write().await;
    let horse = horses
        .get_mut(&id)
        .ok_or_else(|| rejection(StatusCode::NOT_FOUND, "NOT_FOUND"))?;
    if let Some(name) = input.name {
        horse.name = name;
    }
    if let Some(breed) = input.breed {
        horse.breed = breed;
    }
    Ok(Json(horse.clone()))
}

async fn delete_horse(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, Response> {
    let mut horses = db.write().await;
    horses
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| rejection(StatusCode::NOT_FOUND, "NOT_FOUND"))
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        body,
    })
}
