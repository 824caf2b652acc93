use super::DemoState;
use super::error::{DemoError, DemoResult};
use super::store::ListParams;
use crate::api::envelope::ApiEnvelope;
use crate::api::resources::Resource;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{Value as JsonValue, json};

const SERVICES_FIELD: &str = "services";

pub async fn healthcheck() -> Json<ApiEnvelope> {
    Json(ApiEnvelope::new("ok", JsonValue::Null))
}

pub async fn list_records(
    State(state): State<DemoState>,
    Path(resource): Path<String>,
    Query(params): Query<ListParams>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = resource_for(&resource)?;
    let (items, pagination) = state.store()?.list(resource, &params);

    let message = format!("{} fetched successfully", resource.title());
    Ok(Json(ApiEnvelope::page(
        message,
        resource.list_key(),
        &items,
        &pagination,
    )?))
}

pub async fn create_record(
    State(state): State<DemoState>,
    Path(resource): Path<String>,
    Json(payload): Json<JsonValue>,
) -> DemoResult<(StatusCode, Json<ApiEnvelope>)> {
    let resource = resource_for(&resource)?;
    let record = state.store()?.insert(resource, payload)?;
    let envelope = ApiEnvelope::single("Created successfully", resource.item_key(), &record)?;
    Ok((StatusCode::CREATED, Json(envelope)))
}

pub async fn get_record(
    State(state): State<DemoState>,
    Path((resource, id)): Path<(String, String)>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = resource_for(&resource)?;
    let store = state.store()?;
    let record = store.get(resource, &id)?;
    Ok(Json(ApiEnvelope::single(
        "Fetched successfully",
        resource.item_key(),
        record,
    )?))
}

pub async fn update_record(
    State(state): State<DemoState>,
    Path((resource, id)): Path<(String, String)>,
    Json(payload): Json<JsonValue>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = resource_for(&resource)?;
    let record = state.store()?.update(resource, &id, payload)?;
    Ok(Json(ApiEnvelope::single(
        "Updated successfully",
        resource.item_key(),
        &record,
    )?))
}

pub async fn delete_record(
    State(state): State<DemoState>,
    Path((resource, id)): Path<(String, String)>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = resource_for(&resource)?;
    state.store()?.delete(resource, &id)?;
    Ok(Json(ApiEnvelope::new("Deleted successfully", json!({}))))
}

pub async fn create_service(
    State(state): State<DemoState>,
    Path((resource, id)): Path<(String, String)>,
    Json(payload): Json<JsonValue>,
) -> DemoResult<(StatusCode, Json<ApiEnvelope>)> {
    let resource = location_resource(&resource)?;
    let service = state
        .store()?
        .push_child(resource, &id, SERVICES_FIELD, payload)?;
    let envelope = ApiEnvelope::single("Service added successfully", "service", &service)?;
    Ok((StatusCode::CREATED, Json(envelope)))
}

pub async fn update_service(
    State(state): State<DemoState>,
    Path((resource, id, service_id)): Path<(String, String, String)>,
    Json(payload): Json<JsonValue>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = location_resource(&resource)?;
    let service = state
        .store()?
        .update_child(resource, &id, SERVICES_FIELD, &service_id, payload)?;
    Ok(Json(ApiEnvelope::single(
        "Service updated successfully",
        "service",
        &service,
    )?))
}

pub async fn delete_service(
    State(state): State<DemoState>,
    Path((resource, id, service_id)): Path<(String, String, String)>,
) -> DemoResult<Json<ApiEnvelope>> {
    let resource = location_resource(&resource)?;
    state
        .store()?
        .delete_child(resource, &id, SERVICES_FIELD, &service_id)?;
    Ok(Json(ApiEnvelope::new("Service deleted successfully", json!({}))))
}

pub async fn get_about(State(state): State<DemoState>) -> DemoResult<Json<ApiEnvelope>> {
    let store = state.store()?;
    Ok(Json(ApiEnvelope::single(
        "Fetched successfully",
        "about",
        store.about(),
    )?))
}

pub async fn update_about(
    State(state): State<DemoState>,
    Json(payload): Json<JsonValue>,
) -> DemoResult<Json<ApiEnvelope>> {
    let about = state.store()?.update_about(payload)?;
    Ok(Json(ApiEnvelope::single(
        "About section updated successfully",
        "about",
        &about,
    )?))
}

fn resource_for(segment: &str) -> DemoResult<Resource> {
    Resource::from_path(segment)
        .ok_or_else(|| DemoError::not_found(format!("unknown resource {segment}")))
}

fn location_resource(segment: &str) -> DemoResult<Resource> {
    match resource_for(segment)? {
        Resource::LocationServices => Ok(Resource::LocationServices),
        other => Err(DemoError::not_found(format!("{other} has no service items"))),
    }
}
