use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::department;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "position")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub department_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Department }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef { Relation::Department.def() }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Is `title` taken inside `department_id` by a position other than `exclude`?
pub async fn title_taken<C: ConnectionTrait>(
    db: &C,
    title: &str,
    department_id: i32,
    exclude: Option<i32>,
) -> Result<bool, ModelError> {
    let mut q = Entity::find()
        .filter(Column::Title.eq(title))
        .filter(Column::DepartmentId.eq(department_id));
    if let Some(id) = exclude {
        q = q.filter(Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

pub async fn list_by_department<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::DepartmentId.eq(department_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
