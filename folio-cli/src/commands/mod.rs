//! CLI command implementations.

pub mod build;
pub mod contact;
pub mod dev;
pub mod init;
pub mod links;

pub use build::build_site;
pub use contact::send_contact;
pub use dev::dev_server;
pub use init::init_project;
pub use links::list_links;
