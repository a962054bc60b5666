pub mod config;
pub mod error;
pub mod file_list;
pub mod form_token;
pub mod logger;
pub mod post;
pub mod publish;
pub mod server;
mod test_data;
mod view;
