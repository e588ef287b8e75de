pub mod add;
pub mod change_master_password;
pub mod completions;
pub mod delete;
pub mod generate_password;
pub mod init;
pub mod show;
