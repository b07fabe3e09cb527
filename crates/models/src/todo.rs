use chrono::{NaiveDateTime, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// A single task record. Serialized field order is the canonical wire
/// representation of a todo.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new todo; `id`, `created_at` and `updated_at` are assigned here.
pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: Option<String>,
    completed: bool,
    deadline_at: Option<NaiveDateTime>,
) -> Result<Model, errors::ModelError> {
    let now = Utc::now().naive_utc();
    let am = ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        description: Set(description),
        completed: Set(completed),
        deadline_at: Set(deadline_at),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
