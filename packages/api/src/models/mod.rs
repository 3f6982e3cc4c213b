mod user;

pub use user::{User, UserFields, UserInfo, COLLECTION as USERS};
