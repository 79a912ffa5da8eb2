//! Typed envelopes for each resource kind.
//!
//! Every wrapper is a read-only view over the raw response envelope with
//! named accessors for the fields that endpoint documents. Fields the server
//! marks nullable return `Option`; everything else fails with a missing or
//! wrong-shape error rather than defaulting silently.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use stratus_core::{Envelope, EnvelopeError, Resource};

/// A hosted site (a "sitegroup" in platform terms).
///
/// Site names are composite identifiers of the form `realm:name`, e.g.
/// `stage-one:mysite`.
#[derive(Debug, Clone)]
pub struct Site(Envelope);

impl From<Envelope> for Site {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Site {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Site {
    /// Composite site name.
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn title(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("title")
    }

    pub fn production_mode(&self) -> Result<bool, EnvelopeError> {
        self.0.bool_field("production_mode")
    }

    pub fn unix_username(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("unix_username")
    }

    pub fn uuid(&self) -> Result<Uuid, EnvelopeError> {
        self.0.uuid_field("uuid")
    }

    /// Version control flavor, `git` or `svn`.
    pub fn vcs_type(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("vcs_type")
    }

    pub fn vcs_url(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("vcs_url")
    }
}

/// A site environment (e.g. `dev`, `test`, `prod`).
#[derive(Debug, Clone)]
pub struct Environment(Envelope);

impl From<Envelope> for Environment {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Environment {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Environment {
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    /// Identifiers of the database clusters backing this environment.
    pub fn db_clusters(&self) -> Result<Vec<String>, EnvelopeError> {
        self.0.text_array_field("db_clusters")
    }

    pub fn default_domain(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("default_domain")
    }

    pub fn ssh_host(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("ssh_host")
    }

    /// Currently deployed VCS path (a branch or tag reference).
    pub fn vcs_path(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("vcs_path")
    }

    /// Whether live development mode is switched on. The wire value is the
    /// mode name, with `disabled` meaning off.
    pub fn live_dev(&self) -> Result<bool, EnvelopeError> {
        Ok(self.0.str_field("livedev")? != "disabled")
    }
}

/// A server attached to an environment.
#[derive(Debug, Clone)]
pub struct Server(Envelope);

impl From<Envelope> for Server {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Server {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Server {
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn fqdn(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("fqdn")
    }

    /// Machine image flavor the server runs on.
    pub fn ami_type(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("ami_type")
    }

    pub fn availability_zone(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("ec2_availability_zone")
    }

    pub fn region(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("ec2_region")
    }

    /// Per-service detail map; its shape varies by server role, so it is
    /// exposed raw.
    pub fn services(&self) -> Result<&Value, EnvelopeError> {
        self.0.value_field("services")
    }
}

/// An SSH public key registered on a site.
#[derive(Debug, Clone)]
pub struct SshKey(Envelope);

impl From<Envelope> for SshKey {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for SshKey {
    const PRIMARY_FIELD: &'static str = "id";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl SshKey {
    pub fn id(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn public_key(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("ssh_pub_key")
    }

    pub fn nickname(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("nickname")
    }
}

/// A version-control user registered on a site.
#[derive(Debug, Clone)]
pub struct VcsUser(Envelope);

impl From<Envelope> for VcsUser {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for VcsUser {
    const PRIMARY_FIELD: &'static str = "id";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl VcsUser {
    pub fn id(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn username(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("username")
    }
}

/// A database name registered on a site, independent of environment.
#[derive(Debug, Clone)]
pub struct DatabaseName(Envelope);

impl From<Envelope> for DatabaseName {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for DatabaseName {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl DatabaseName {
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }
}

/// A database instance within an environment, including its connection
/// details.
#[derive(Debug, Clone)]
pub struct Database(Envelope);

impl From<Envelope> for Database {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Database {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Database {
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn username(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("username")
    }

    pub fn password(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("password")
    }

    pub fn instance_name(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("instance_name")
    }

    pub fn db_cluster(&self) -> Result<String, EnvelopeError> {
        self.0.text_field("db_cluster")
    }

    pub fn host(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("host")
    }
}

/// An on-demand or scheduled backup of one database.
#[derive(Debug, Clone)]
pub struct DatabaseBackup(Envelope);

impl From<Envelope> for DatabaseBackup {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for DatabaseBackup {
    const PRIMARY_FIELD: &'static str = "id";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl DatabaseBackup {
    pub fn id(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }

    pub fn checksum(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("checksum")
    }

    pub fn database_name(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("name")
    }

    pub fn deleted(&self) -> Result<bool, EnvelopeError> {
        self.0.bool_field("deleted")
    }

    /// Download URL for the dump.
    pub fn link(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("link")
    }

    pub fn started(&self) -> Result<DateTime<Utc>, EnvelopeError> {
        self.0.timestamp_field("started")
    }

    pub fn completed(&self) -> Result<DateTime<Utc>, EnvelopeError> {
        self.0.timestamp_field("completed")
    }

    /// Backup kind, e.g. `daily` or `ondemand`.
    pub fn backup_type(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("type")
    }

    /// Storage path of the dump on the backup host.
    pub fn path(&self) -> Result<&str, EnvelopeError> {
        self.0.str_field("path")
    }
}

/// A domain attached to an environment.
#[derive(Debug, Clone)]
pub struct Domain(Envelope);

impl From<Envelope> for Domain {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl Resource for Domain {
    const PRIMARY_FIELD: &'static str = "name";

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

impl Domain {
    pub fn name(&self) -> Result<String, EnvelopeError> {
        self.primary_value()
    }
}
