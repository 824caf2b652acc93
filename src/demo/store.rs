use super::error::{DemoError, DemoResult};
use crate::api::envelope::Pagination;
use crate::api::resources::Resource;
use crate::list::entity::{ALL, NAME_SORT_KEY};
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Query string accepted by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// In-memory documents behind the demo API, stored as raw JSON objects.
#[derive(Debug, Default)]
pub struct DemoStore {
    collections: HashMap<Resource, Vec<JsonValue>>,
    about: JsonValue,
    rejected_deletes: HashMap<String, String>,
}

impl DemoStore {
    pub fn new() -> Self {
        Self {
            about: JsonValue::Object(JsonMap::new()),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, resource: Resource, mut record: JsonValue) -> DemoResult<JsonValue> {
        let object = record
            .as_object_mut()
            .ok_or_else(|| DemoError::input("request body must be a JSON object"))?;
        if !object.contains_key("id") {
            object.insert("id".to_string(), JsonValue::String(new_id()));
        }
        assign_child_ids(object);
        self.collections
            .entry(resource)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    pub fn len(&self, resource: Resource) -> usize {
        self.collections.get(&resource).map_or(0, Vec::len)
    }

    pub fn get(&self, resource: Resource, id: &str) -> DemoResult<&JsonValue> {
        self.records(resource)
            .iter()
            .find(|record| record_id(record) == Some(id))
            .ok_or_else(|| not_found(resource, id))
    }

    /// Merge `patch` into the stored record. Array children without an id get one.
    pub fn update(&mut self, resource: Resource, id: &str, patch: JsonValue) -> DemoResult<JsonValue> {
        let JsonValue::Object(mut patch) = patch else {
            return Err(DemoError::input("request body must be a JSON object"));
        };
        patch.remove("id");
        assign_child_ids(&mut patch);

        let record = self.get_mut(resource, id)?;
        if let Some(object) = record.as_object_mut() {
            object.extend(patch);
        }
        Ok(record.clone())
    }

    pub fn delete(&mut self, resource: Resource, id: &str) -> DemoResult<()> {
        if let Some(message) = self.rejected_deletes.get(id) {
            return Err(DemoError::Conflict(message.clone()));
        }
        let records = self.collections.entry(resource).or_default();
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id));
        if records.len() == before {
            return Err(not_found(resource, id));
        }
        Ok(())
    }

    /// Make every future delete of `id` fail with `message`.
    pub fn reject_delete(&mut self, id: &str, message: &str) {
        self.rejected_deletes
            .insert(id.to_string(), message.to_string());
    }

    pub fn about(&self) -> &JsonValue {
        &self.about
    }

    pub fn set_about(&mut self, about: JsonValue) {
        self.about = about;
    }

    pub fn update_about(&mut self, patch: JsonValue) -> DemoResult<JsonValue> {
        let JsonValue::Object(mut patch) = patch else {
            return Err(DemoError::input("request body must be a JSON object"));
        };
        assign_child_ids(&mut patch);
        if let Some(object) = self.about.as_object_mut() {
            object.extend(patch);
        }
        Ok(self.about.clone())
    }

    /// Push `item` onto the `field` array of a record, assigning an id.
    pub fn push_child(
        &mut self,
        resource: Resource,
        id: &str,
        field: &str,
        mut item: JsonValue,
    ) -> DemoResult<JsonValue> {
        let object = item
            .as_object_mut()
            .ok_or_else(|| DemoError::input("request body must be a JSON object"))?;
        object.insert("id".to_string(), JsonValue::String(new_id()));

        let children = self.children_mut(resource, id, field)?;
        children.push(item.clone());
        Ok(item)
    }

    pub fn update_child(
        &mut self,
        resource: Resource,
        id: &str,
        field: &str,
        child_id: &str,
        patch: JsonValue,
    ) -> DemoResult<JsonValue> {
        let JsonValue::Object(mut patch) = patch else {
            return Err(DemoError::input("request body must be a JSON object"));
        };
        patch.remove("id");

        let children = self.children_mut(resource, id, field)?;
        let child = children
            .iter_mut()
            .find(|child| record_id(child) == Some(child_id))
            .ok_or_else(|| DemoError::not_found(format!("{field} item {child_id} not found")))?;
        if let Some(object) = child.as_object_mut() {
            object.extend(patch);
        }
        Ok(child.clone())
    }

    pub fn delete_child(
        &mut self,
        resource: Resource,
        id: &str,
        field: &str,
        child_id: &str,
    ) -> DemoResult<()> {
        let children = self.children_mut(resource, id, field)?;
        let before = children.len();
        children.retain(|child| record_id(child) != Some(child_id));
        if children.len() == before {
            return Err(DemoError::not_found(format!("{field} item {child_id} not found")));
        }
        Ok(())
    }

    /// Search, status filter, sort and paginate one collection.
    pub fn list(&self, resource: Resource, params: &ListParams) -> (Vec<JsonValue>, Pagination) {
        let name_field = display_field(resource);
        let mut records: Vec<&JsonValue> = self.records(resource).iter().collect();

        if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty() && *s != ALL) {
            records.retain(|record| status_matches(resource, record, status));
        }

        if let Some(search) = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
        {
            let search = search.to_lowercase();
            records.retain(|record| {
                [name_field, "email"].iter().any(|field| {
                    record
                        .get(*field)
                        .and_then(JsonValue::as_str)
                        .is_some_and(|value| value.to_lowercase().contains(&search))
                })
            });
        }

        if let Some(sort_by) = params.sort_by.as_deref() {
            let field = if sort_by == NAME_SORT_KEY { name_field } else { sort_by };
            let descending = params.order.as_deref() == Some("desc");
            records.sort_by(|left, right| {
                let order = compare_json(left.get(field), right.get(field));
                if descending { order.reverse() } else { order }
            });
        }

        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let page = params.page.unwrap_or(1).max(1);
        let total = records.len() as u64;
        let start = ((page - 1) as usize).saturating_mul(limit as usize);

        let items = records
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        (items, Pagination::for_total(total, page, limit))
    }

    fn records(&self, resource: Resource) -> &[JsonValue] {
        self.collections
            .get(&resource)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn get_mut(&mut self, resource: Resource, id: &str) -> DemoResult<&mut JsonValue> {
        self.collections
            .get_mut(&resource)
            .and_then(|records| records.iter_mut().find(|record| record_id(record) == Some(id)))
            .ok_or_else(|| not_found(resource, id))
    }

    fn children_mut(
        &mut self,
        resource: Resource,
        id: &str,
        field: &str,
    ) -> DemoResult<&mut Vec<JsonValue>> {
        let record = self.get_mut(resource, id)?;
        let object = record
            .as_object_mut()
            .ok_or_else(|| DemoError::Internal(format!("record {id} is not an object")))?;
        let children = object
            .entry(field.to_string())
            .or_insert_with(|| JsonValue::Array(Vec::new()));
        children
            .as_array_mut()
            .ok_or_else(|| DemoError::Internal(format!("{field} of {id} is not an array")))
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn record_id(record: &JsonValue) -> Option<&str> {
    record.get("id").and_then(JsonValue::as_str)
}

fn not_found(resource: Resource, id: &str) -> DemoError {
    DemoError::not_found(format!("{} {id} not found", resource.item_key()))
}

/// Give every object inside an array field an id if it lacks one.
fn assign_child_ids(object: &mut JsonMap<String, JsonValue>) {
    for value in object.values_mut() {
        let JsonValue::Array(items) = value else {
            continue;
        };
        for item in items {
            if let Some(child) = item.as_object_mut() {
                let missing = child.get("id").is_none_or(|id| id.is_null());
                if missing {
                    child.insert("id".to_string(), JsonValue::String(new_id()));
                }
            }
        }
    }
}

fn display_field(resource: Resource) -> &'static str {
    match resource {
        Resource::CareSeekers | Resource::Caregivers | Resource::Applications => "fullName",
        Resource::Bookings => "careSeekerName",
        Resource::Blogs | Resource::ResourceCards => "title",
        Resource::Testimonials => "name",
        Resource::Faqs => "question",
        Resource::LocationServices => "city",
    }
}

fn status_matches(resource: Resource, record: &JsonValue, status: &str) -> bool {
    match resource {
        Resource::Caregivers => record.get("reviewStatus").and_then(JsonValue::as_str) == Some(status),
        Resource::Blogs => {
            let published = record
                .get("published")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);
            match status {
                "published" => published,
                "draft" => !published,
                _ => false,
            }
        }
        _ => record.get("status").and_then(JsonValue::as_str) == Some(status),
    }
}

fn compare_json(left: Option<&JsonValue>, right: Option<&JsonValue>) -> Ordering {
    match (left, right) {
        (Some(JsonValue::String(l)), Some(JsonValue::String(r))) => {
            l.to_lowercase().cmp(&r.to_lowercase())
        }
        (Some(JsonValue::Number(l)), Some(JsonValue::Number(r))) => l
            .as_f64()
            .partial_cmp(&r.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(JsonValue::Bool(l)), Some(JsonValue::Bool(r))) => l.cmp(r),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
