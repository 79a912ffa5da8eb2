//! # Stratus Client
//!
//! Typed client for the Stratus Cloud API: site, environment, server,
//! database, backup, task, SSH key, and domain operations over a signed
//! REST protocol.
//!
//! Each operation performs exactly one request/response exchange. Operations
//! that trigger asynchronous server-side jobs return a [`Task`] handle;
//! obtaining the final state is the caller's responsibility (poll
//! [`CloudClient::task`] until [`Task::completed`]).
//!
//! ## Example
//!
//! ```ignore
//! use stratus_auth::Credentials;
//! use stratus_client::{CloudClient, Resource};
//!
//! let client = CloudClient::new(Credentials::new("my-client", "my-secret"));
//!
//! let site = client.site("stage-one:mysite").await?;
//! println!("{}", site.title()?);
//!
//! let task = client.create_database_backup("stage-one:mysite", "prod", "mysite").await?;
//! println!("queued backup task {}", task.id()?);
//! ```

mod client;
mod error;
mod request;
mod resources;
mod response;

pub use client::{CloudClient, Endpoint, BASE_PATH, BASE_URL};
pub use error::Error;
pub use request::RequestDescriptor;
pub use resources::{DistroSource, LiveDevAction};
pub use response::{
    Database, DatabaseBackup, DatabaseName, Domain, Environment, Server, Site, SshKey, VcsUser,
};

// Re-exported so callers need only this crate for everyday use.
pub use stratus_auth::Credentials;
pub use stratus_core::{Collection, Envelope, Resource, Task, TaskState};
