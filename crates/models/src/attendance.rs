use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::employee;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub date: Date,
    pub check_in_time: Option<DateTime>,
    pub check_out_time: Option<DateTime>,
    #[sea_orm(column_type = "Decimal(Some((4, 2)))", nullable)]
    pub hours_worked: Option<Decimal>,
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

/// Hours between check-in and check-out, rounded to two decimals.
/// `None` when check-out precedes check-in.
pub fn hours_between(check_in: DateTime, check_out: DateTime) -> Option<Decimal> {
    let minutes = (check_out - check_in).num_minutes();
    if minutes < 0 {
        return None;
    }
    Some((Decimal::from(minutes) / Decimal::from(60)).round_dp(2))
}

pub async fn exists_for_day<C: ConnectionTrait>(db: &C, employee_id: i32, date: Date) -> Result<bool, ModelError> {
    Ok(Entity::find()
        .filter(Column::EmployeeId.eq(employee_id))
        .filter(Column::Date.eq(date))
        .one(db)
        .await?
        .is_some())
}

pub async fn list_by_employee<C: ConnectionTrait>(db: &C, employee_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::EmployeeId.eq(employee_id))
        .order_by_asc(Column::Date)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> DateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn hours_between_rounds_to_two_places() {
        assert_eq!(hours_between(at(9, 0), at(17, 30)), Some(Decimal::new(850, 2)));
        assert_eq!(hours_between(at(9, 0), at(9, 20)), Some(Decimal::new(33, 2)));
    }

    #[test]
    fn hours_between_rejects_reversed_times() {
        assert_eq!(hours_between(at(17, 0), at(9, 0)), None);
    }
}
