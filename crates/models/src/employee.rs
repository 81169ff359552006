use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::prelude::*, ConnectionTrait, FromQueryResult, PaginatorTrait, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{department, position};

/// Employment status. Deleting an employee moves it to `Terminated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[default]
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "ON_LEAVE")]
    OnLeave,
    #[sea_orm(string_value = "TERMINATED")]
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::OnLeave => "ON_LEAVE",
            EmployeeStatus::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(EmployeeStatus::Active),
            "ON_LEAVE" => Ok(EmployeeStatus::OnLeave),
            "TERMINATED" => Ok(EmployeeStatus::Terminated),
            other => Err(ModelError::Validation(format!("unknown employee status: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub hire_date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub salary: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub status: EmployeeStatus,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Department,
    Position,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
            Relation::Position => Entity::belongs_to(position::Entity)
                .from(Column::PositionId)
                .to(position::Column::Id)
                .into(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef { Relation::Department.def() }
}

impl Related<position::Entity> for Entity {
    fn to() -> RelationDef { Relation::Position.def() }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert {
            if self.created_at.is_not_set() {
                self.created_at = Set(now);
            }
            if self.status.is_not_set() {
                self.status = Set(EmployeeStatus::default());
            }
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Live count of employees referencing a department, regardless of status.
pub async fn count_by_department<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<u64, ModelError> {
    Ok(Entity::find()
        .filter(Column::DepartmentId.eq(department_id))
        .count(db)
        .await?)
}

/// Live count of employees referencing a position, regardless of status.
pub async fn count_by_position<C: ConnectionTrait>(db: &C, position_id: i32) -> Result<u64, ModelError> {
    Ok(Entity::find()
        .filter(Column::PositionId.eq(position_id))
        .count(db)
        .await?)
}

/// Employees, from any department, holding a position that belongs to `department_id`.
pub async fn count_by_positions_of_department<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<u64, ModelError> {
    Ok(Entity::find()
        .inner_join(position::Entity)
        .filter(position::Column::DepartmentId.eq(department_id))
        .count(db)
        .await?)
}

#[derive(Debug, FromQueryResult)]
struct GroupCount {
    group_key: Option<i32>,
    n: i64,
}

async fn grouped_counts<C: ConnectionTrait>(db: &C, col: Column) -> Result<HashMap<i32, u64>, ModelError> {
    let rows = Entity::find()
        .select_only()
        .column_as(col, "group_key")
        .column_as(Expr::col(Column::Id).count(), "n")
        .group_by(col)
        .into_model::<GroupCount>()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|r| r.group_key.map(|k| (k, u64::try_from(r.n).unwrap_or_default())))
        .collect())
}

/// Employee counts keyed by department id, in one query. Departments with
/// no employees are absent from the map.
pub async fn counts_per_department<C: ConnectionTrait>(db: &C) -> Result<HashMap<i32, u64>, ModelError> {
    grouped_counts(db, Column::DepartmentId).await
}

pub async fn counts_per_position<C: ConnectionTrait>(db: &C) -> Result<HashMap<i32, u64>, ModelError> {
    grouped_counts(db, Column::PositionId).await
}

pub async fn email_exists<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?.is_some())
}

/// Soft delete: the row and its history stay, only the status changes.
pub async fn terminate<C: ConnectionTrait>(db: &C, found: Model) -> Result<Model, ModelError> {
    let mut am: ActiveModel = found.into();
    am.status = Set(EmployeeStatus::Terminated);
    Ok(am.update(db).await?)
}
