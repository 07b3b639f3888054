pub use super::account::Entity as Account;
pub use super::dealer::Entity as Dealer;
pub use super::opportunity::Entity as Opportunity;
