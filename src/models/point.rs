use diesel::prelude::*;

/// Point balance row, one per employee
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::point)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Point {
    pub id: i32,
    pub employee_id: i32,
    pub point_total: Option<i32>,
    pub last_update: Option<jiff_diesel::Timestamp>,
}

/// NewPoint insert model, used to seed a zero balance on employee creation
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::point)]
pub struct NewPoint {
    pub employee_id: i32,
    pub point_total: i32,
    pub last_update: jiff_diesel::Timestamp,
}

impl NewPoint {
    pub fn zero_balance(employee_id: i32, now: jiff_diesel::Timestamp) -> Self {
        Self {
            employee_id,
            point_total: 0,
            last_update: now,
        }
    }
}
