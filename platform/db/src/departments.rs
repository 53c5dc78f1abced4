use entity::departments::{ActiveModel, Column, Entity, Model};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::Deserialize;

use crate::{DbPool, FieldErrors, StoreError, StoreResult, map_update_err, require_text};

/// Incoming department fields. Presence is part of validation, so every
/// field is optional at the deserialization boundary.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DepartmentInput {
    pub name: Option<String>,
}

impl DepartmentInput {
    fn validated(&self) -> StoreResult<String> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", self.name.as_deref());
        match name {
            Some(name) if errors.is_empty() => Ok(name),
            _ => Err(StoreError::Validation(errors)),
        }
    }
}

pub async fn list(db: &DbPool) -> StoreResult<Vec<Model>> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn get(db: &DbPool, id: i32) -> StoreResult<Model> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound)
}

pub async fn create(db: &DbPool, input: DepartmentInput) -> StoreResult<Model> {
    let name = input.validated()?;
    let model = ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

pub async fn update(db: &DbPool, id: i32, input: DepartmentInput) -> StoreResult<Model> {
    let existing = get(db, id).await?;
    let name = input.validated()?;
    let mut model: ActiveModel = existing.into();
    model.name = Set(name);
    model.update(db).await.map_err(map_update_err)
}

pub async fn delete(db: &DbPool, id: i32) -> StoreResult<()> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
