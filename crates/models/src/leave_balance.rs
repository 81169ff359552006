use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::employee;
use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    #[sea_orm(string_value = "ANNUAL")]
    Annual,
    #[sea_orm(string_value = "SICK")]
    Sick,
    #[sea_orm(string_value = "PERSONAL")]
    Personal,
    #[sea_orm(string_value = "MATERNITY")]
    Maternity,
    #[sea_orm(string_value = "PATERNITY")]
    Paternity,
    #[sea_orm(string_value = "UNPAID")]
    Unpaid,
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeaveType::Annual => "ANNUAL",
            LeaveType::Sick => "SICK",
            LeaveType::Personal => "PERSONAL",
            LeaveType::Maternity => "MATERNITY",
            LeaveType::Paternity => "PATERNITY",
            LeaveType::Unpaid => "UNPAID",
        };
        f.write_str(s)
    }
}

impl FromStr for LeaveType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANNUAL" => Ok(LeaveType::Annual),
            "SICK" => Ok(LeaveType::Sick),
            "PERSONAL" => Ok(LeaveType::Personal),
            "MATERNITY" => Ok(LeaveType::Maternity),
            "PATERNITY" => Ok(LeaveType::Paternity),
            "UNPAID" => Ok(LeaveType::Unpaid),
            other => Err(ModelError::Validation(format!("unknown leave type: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_balance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub year: i32,
    pub leave_type: LeaveType,
    pub total_days: i32,
    pub used_days: i32,
    pub remaining_days: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Employee }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::belongs_to(employee::Entity)
                .from(Column::EmployeeId)
                .to(employee::Column::Id)
                .into(),
        }
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employee.def() }
}

fn current<V: Copy + Into<sea_orm::Value>>(v: &ActiveValue<V>) -> Option<V> {
    match v {
        ActiveValue::Set(x) | ActiveValue::Unchanged(x) => Some(*x),
        ActiveValue::NotSet => None,
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// `remaining_days` is derived here on every insert and update, so a
    /// value set by a caller never reaches the table.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if self.used_days.is_not_set() {
            self.used_days = Set(0);
        }
        let total = current(&self.total_days)
            .ok_or_else(|| DbErr::Custom("leave_balance.total_days is required".into()))?;
        let used = current(&self.used_days).unwrap_or_default();
        self.remaining_days = Set(total - used);

        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

pub async fn exists_for<C: ConnectionTrait>(
    db: &C,
    employee_id: i32,
    year: i32,
    leave_type: LeaveType,
) -> Result<bool, ModelError> {
    Ok(Entity::find()
        .filter(Column::EmployeeId.eq(employee_id))
        .filter(Column::Year.eq(year))
        .filter(Column::LeaveType.eq(leave_type))
        .one(db)
        .await?
        .is_some())
}

pub async fn list_by_employee<C: ConnectionTrait>(db: &C, employee_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::EmployeeId.eq(employee_id))
        .order_by_asc(Column::Year)
        .order_by_asc(Column::LeaveType)
        .all(db)
        .await?)
}
