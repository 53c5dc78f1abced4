use sea_orm::prelude::{Date, *};
use serde::Serialize;

/// Default photo name assigned when an employee is created without one.
pub const NO_PHOTO: &str = "anonymous.png";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Free-text department name. Deliberately not a foreign key; the
    /// referenced department is not required to exist.
    pub department: String,
    pub date_of_joining: Date,
    pub photo_file_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations")
    }
}

impl ActiveModelBehavior for ActiveModel {}
