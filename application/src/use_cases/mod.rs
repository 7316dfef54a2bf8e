//! Use cases
//!
//! Application-level operations that orchestrate domain logic over a
//! [`DriveGateway`](crate::ports::drive_gateway::DriveGateway).

pub mod batch;
pub mod comments;
pub mod error;
pub mod manage_files;
pub mod permissions;
pub mod quota;
pub mod read_file;
pub mod search_files;
pub(crate) mod shared;
pub mod shared_drives;
pub mod write_content;

#[cfg(test)]
pub(crate) mod testing;
