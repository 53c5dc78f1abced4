use chrono::NaiveDate;
use entity::employees::{ActiveModel, Column, Entity, Model, NO_PHOTO};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use serde::Deserialize;

use crate::{DbPool, FieldErrors, StoreError, StoreResult, map_update_err, require_text};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub department: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
    pub photo_file_name: Option<String>,
}

struct ValidatedEmployee {
    name: String,
    department: String,
    date_of_joining: NaiveDate,
    /// `None` means the caller did not send a photo name.
    photo_file_name: Option<String>,
}

impl EmployeeInput {
    fn validated(&self) -> StoreResult<ValidatedEmployee> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", self.name.as_deref());
        let department = require_text(&mut errors, "department", self.department.as_deref());
        if self.date_of_joining.is_none() {
            errors
                .entry("date_of_joining".to_string())
                .or_default()
                .push("this field is required".to_string());
        }
        let photo_file_name = self
            .photo_file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        match (name, department, self.date_of_joining) {
            (Some(name), Some(department), Some(date_of_joining)) if errors.is_empty() => {
                Ok(ValidatedEmployee {
                    name,
                    department,
                    date_of_joining,
                    photo_file_name,
                })
            }
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

pub async fn create(db: &DbPool, input: EmployeeInput) -> StoreResult<Model> {
    let fields = input.validated()?;
    let model = ActiveModel {
        name: Set(fields.name),
        department: Set(fields.department),
        date_of_joining: Set(fields.date_of_joining),
        photo_file_name: Set(fields
            .photo_file_name
            .unwrap_or_else(|| NO_PHOTO.to_string())),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

pub async fn update(db: &DbPool, id: i32, input: EmployeeInput) -> StoreResult<Model> {
    let existing = get(db, id).await?;
    let fields = input.validated()?;
    let mut model: ActiveModel = existing.into();
    model.name = Set(fields.name);
    model.department = Set(fields.department);
    model.date_of_joining = Set(fields.date_of_joining);
    // An absent photo name leaves the stored one untouched.
    if let Some(photo) = fields.photo_file_name {
        model.photo_file_name = Set(photo);
    }
    model.update(db).await.map_err(map_update_err)
}

pub async fn delete(db: &DbPool, id: i32) -> StoreResult<()> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
