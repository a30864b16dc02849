pub mod add;
pub mod delete;
pub mod list;
pub mod login;
pub mod logout;
pub mod show;
pub mod status;
