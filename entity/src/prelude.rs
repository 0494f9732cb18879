pub use super::customer::Entity as Customer;
pub use super::product::Entity as Product;
