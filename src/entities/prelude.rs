pub use super::bad_words::Entity as BadWords;
pub use super::confessions::Entity as Confessions;
pub use super::users::Entity as Users;
pub use super::votes::Entity as Votes;
