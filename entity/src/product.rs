use audited_repo::{context::FieldError, AuditedEntity};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    pub price_cents: i64,
    pub created_by: Option<String>,
    pub created_date: DateTimeUtc,
    pub modified_by: Option<String>,
    pub modified_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl AuditedEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn created_by_column() -> Column {
        Column::CreatedBy
    }

    fn created_date_column() -> Column {
        Column::CreatedDate
    }

    fn modified_by_column() -> Column {
        Column::ModifiedBy
    }

    fn modified_date_column() -> Column {
        Column::ModifiedDate
    }

    fn validate(model: &ActiveModel) -> Result<(), Vec<FieldError>> {
        match &model.price_cents {
            ActiveValue::Set(price) | ActiveValue::Unchanged(price) if *price < 0 => Err(vec![
                FieldError::new("price_cents", "must not be negative"),
            ]),
            _ => Ok(()),
        }
    }
}
