use audited_repo::{context::FieldError, AuditedEntity};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
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

    /// Name must not be blank and email must look like an address.
    fn validate(model: &ActiveModel) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let ActiveValue::Set(name) | ActiveValue::Unchanged(name) = &model.name {
            if name.trim().is_empty() {
                errors.push(FieldError::new("name", "must not be empty"));
            }
        }

        if let ActiveValue::Set(email) | ActiveValue::Unchanged(email) = &model.email {
            if !email.contains('@') {
                errors.push(FieldError::new("email", "must contain '@'"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
