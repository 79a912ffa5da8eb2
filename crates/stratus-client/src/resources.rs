//! Resource operations of the Stratus Cloud API.
//!
//! One public method per REST endpoint. Each operation builds a request
//! descriptor with a fixed path template and method, supplies the caller's
//! arguments as placeholder values, performs exactly one signed exchange,
//! and wraps the response in the envelope variant appropriate to the
//! resource: a single record, a collection, or a [`Task`] handle for any
//! operation that triggers an asynchronous server-side job.

use reqwest::Method;
use serde_json::json;
use tokio::io::AsyncWrite;

use stratus_core::{Collection, Task};

use crate::client::CloudClient;
use crate::error::Error;
use crate::request::RequestDescriptor;
use crate::response::{
    Database, DatabaseBackup, DatabaseName, Domain, Environment, Server, Site, SshKey, VcsUser,
};

/// Where a distribution install takes its source from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistroSource {
    /// One of the platform's built-in distributions, by name.
    Name(String),
    /// A publicly accessible distribution archive.
    Url(String),
    /// A makefile describing the build.
    MakeUrl(String),
}

impl DistroSource {
    fn kind(&self) -> &'static str {
        match self {
            Self::Name(_) => "distro_name",
            Self::Url(_) => "distro_url",
            Self::MakeUrl(_) => "make_url",
        }
    }

    fn location(&self) -> &str {
        match self {
            Self::Name(source) | Self::Url(source) | Self::MakeUrl(source) => source,
        }
    }
}

/// Live development toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveDevAction {
    Enable,
    Disable,
}

impl LiveDevAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl CloudClient {
    // Sites

    /// List the sites the credentials may manage.
    pub async fn sites(&self) -> Result<Collection<Site>, Error> {
        let descriptor = RequestDescriptor::new(Method::GET, "{+base_path}/sites.json");
        self.fetch_collection(descriptor).await
    }

    /// A single site record.
    pub async fn site(&self, site: &str) -> Result<Site, Error> {
        let descriptor = RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}.json")
            .param("site", site);
        Ok(Site::from(self.fetch_envelope(descriptor).await?))
    }

    // Environments

    pub async fn environments(&self, site: &str) -> Result<Collection<Environment>, Error> {
        let descriptor = RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/envs.json")
            .param("site", site);
        self.fetch_collection(descriptor).await
    }

    pub async fn environment(&self, site: &str, env: &str) -> Result<Environment, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/envs/{env}.json")
                .param("site", site)
                .param("env", env);
        Ok(Environment::from(self.fetch_envelope(descriptor).await?))
    }

    /// Install a distribution into an environment.
    pub async fn install_distro(
        &self,
        site: &str,
        env: &str,
        source: &DistroSource,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/envs/{env}/install/{type}.json?source={source}",
        )
        .param("site", site)
        .param("env", env)
        .param("type", source.kind())
        .param("source", source.location());
        self.fetch_task(descriptor).await
    }

    /// Toggle live development mode on an environment.
    pub async fn live_dev(
        &self,
        site: &str,
        env: &str,
        action: LiveDevAction,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/envs/{env}/livedev/{action}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("action", action.as_str());
        self.fetch_task(descriptor).await
    }

    // Servers

    pub async fn servers(&self, site: &str, env: &str) -> Result<Collection<Server>, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/servers.json",
        )
        .param("site", site)
        .param("env", env);
        self.fetch_collection(descriptor).await
    }

    pub async fn server(&self, site: &str, env: &str, server: &str) -> Result<Server, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/servers/{server}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("server", server);
        Ok(Server::from(self.fetch_envelope(descriptor).await?))
    }

    // SSH keys

    pub async fn ssh_keys(&self, site: &str) -> Result<Collection<SshKey>, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/sshkeys.json")
                .param("site", site);
        self.fetch_collection(descriptor).await
    }

    pub async fn ssh_key(&self, site: &str, id: &str) -> Result<SshKey, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/sshkeys/{id}.json")
                .param("site", site)
                .param("id", id);
        Ok(SshKey::from(self.fetch_envelope(descriptor).await?))
    }

    /// Register an SSH public key on a site.
    ///
    /// The key material travels in the request body; the nickname rides as
    /// a query parameter.
    pub async fn add_ssh_key(
        &self,
        site: &str,
        public_key: &str,
        nickname: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/sshkeys.json?nickname={nickname}",
        )
        .param("site", site)
        .param("nickname", nickname)
        .json_body(&json!({ "ssh_pub_key": public_key }));
        self.fetch_task(descriptor).await
    }

    pub async fn delete_ssh_key(&self, site: &str, id: &str) -> Result<Task, Error> {
        let descriptor =
            RequestDescriptor::new(Method::DELETE, "{+base_path}/sites/{site}/sshkeys/{id}.json")
                .param("site", site)
                .param("id", id);
        self.fetch_task(descriptor).await
    }

    // VCS users

    pub async fn vcs_users(&self, site: &str) -> Result<Collection<VcsUser>, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/svnusers.json")
                .param("site", site);
        self.fetch_collection(descriptor).await
    }

    pub async fn vcs_user(&self, site: &str, id: &str) -> Result<VcsUser, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/svnusers/{id}.json")
                .param("site", site)
                .param("id", id);
        Ok(VcsUser::from(self.fetch_envelope(descriptor).await?))
    }

    pub async fn add_vcs_user(
        &self,
        site: &str,
        username: &str,
        password: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/svnusers/{username}.json",
        )
        .param("site", site)
        .param("username", username)
        .json_body(&json!({ "password": password }));
        self.fetch_task(descriptor).await
    }

    pub async fn delete_vcs_user(&self, site: &str, id: &str) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::DELETE,
            "{+base_path}/sites/{site}/svnusers/{id}.json",
        )
        .param("site", site)
        .param("id", id);
        self.fetch_task(descriptor).await
    }

    // Databases

    /// Database names registered on a site, independent of environment.
    pub async fn site_databases(&self, site: &str) -> Result<Collection<DatabaseName>, Error> {
        let descriptor = RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/dbs.json")
            .param("site", site);
        self.fetch_collection(descriptor).await
    }

    pub async fn site_database(&self, site: &str, db: &str) -> Result<DatabaseName, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/dbs/{db}.json")
                .param("site", site)
                .param("db", db);
        Ok(DatabaseName::from(self.fetch_envelope(descriptor).await?))
    }

    /// Database instances in an environment, with connection details.
    pub async fn environment_databases(
        &self,
        site: &str,
        env: &str,
    ) -> Result<Collection<Database>, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/envs/{env}/dbs.json")
                .param("site", site)
                .param("env", env);
        self.fetch_collection(descriptor).await
    }

    pub async fn environment_database(
        &self,
        site: &str,
        env: &str,
        db: &str,
    ) -> Result<Database, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db);
        Ok(Database::from(self.fetch_envelope(descriptor).await?))
    }

    // Database backups

    pub async fn database_backups(
        &self,
        site: &str,
        env: &str,
        db: &str,
    ) -> Result<Collection<DatabaseBackup>, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}/backups.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db);
        self.fetch_collection(descriptor).await
    }

    pub async fn database_backup(
        &self,
        site: &str,
        env: &str,
        db: &str,
        id: &str,
    ) -> Result<DatabaseBackup, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}/backups/{id}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db)
        .param("id", id);
        Ok(DatabaseBackup::from(self.fetch_envelope(descriptor).await?))
    }

    /// Queue an on-demand backup of one database.
    pub async fn create_database_backup(
        &self,
        site: &str,
        env: &str,
        db: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}/backups.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db);
        self.fetch_task(descriptor).await
    }

    pub async fn delete_database_backup(
        &self,
        site: &str,
        env: &str,
        db: &str,
        id: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::DELETE,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}/backups/{id}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db)
        .param("id", id);
        self.fetch_task(descriptor).await
    }

    /// Stream a backup dump to `sink`, bypassing JSON decoding.
    pub async fn download_database_backup<W>(
        &self,
        site: &str,
        env: &str,
        db: &str,
        id: &str,
        sink: &mut W,
    ) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/dbs/{db}/backups/{id}/download.json",
        )
        .param("site", site)
        .param("env", env)
        .param("db", db)
        .param("id", id);
        self.fetch_download(descriptor, sink).await
    }

    /// Copy a database from one environment to another.
    pub async fn copy_database(
        &self,
        site: &str,
        db: &str,
        source: &str,
        target: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/dbs/{db}/db-copy/{source}/{target}.json",
        )
        .param("site", site)
        .param("db", db)
        .param("source", source)
        .param("target", target);
        self.fetch_task(descriptor).await
    }

    // Tasks

    /// Recent tasks queued for a site.
    pub async fn tasks(&self, site: &str) -> Result<Collection<Task>, Error> {
        let descriptor = RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/tasks.json")
            .param("site", site);
        self.fetch_collection(descriptor).await
    }

    /// One task by id; poll this until [`Task::completed`] reports `true`.
    pub async fn task(&self, site: &str, id: &str) -> Result<Task, Error> {
        let descriptor =
            RequestDescriptor::new(Method::GET, "{+base_path}/sites/{site}/tasks/{task}.json")
                .param("site", site)
                .param("task", id);
        self.fetch_task(descriptor).await
    }

    // Domains

    pub async fn domains(&self, site: &str, env: &str) -> Result<Collection<Domain>, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/domains.json",
        )
        .param("site", site)
        .param("env", env);
        self.fetch_collection(descriptor).await
    }

    pub async fn domain(&self, site: &str, env: &str, domain: &str) -> Result<Domain, Error> {
        let descriptor = RequestDescriptor::new(
            Method::GET,
            "{+base_path}/sites/{site}/envs/{env}/domains/{domain}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("domain", domain);
        Ok(Domain::from(self.fetch_envelope(descriptor).await?))
    }

    pub async fn add_domain(&self, site: &str, env: &str, domain: &str) -> Result<Domain, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/envs/{env}/domains/{domain}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("domain", domain);
        Ok(Domain::from(self.fetch_envelope(descriptor).await?))
    }

    pub async fn delete_domain(
        &self,
        site: &str,
        env: &str,
        domain: &str,
    ) -> Result<Domain, Error> {
        let descriptor = RequestDescriptor::new(
            Method::DELETE,
            "{+base_path}/sites/{site}/envs/{env}/domains/{domain}.json",
        )
        .param("site", site)
        .param("env", env)
        .param("domain", domain);
        Ok(Domain::from(self.fetch_envelope(descriptor).await?))
    }

    /// Purge the edge cache for one domain.
    pub async fn purge_domain_cache(
        &self,
        site: &str,
        env: &str,
        domain: &str,
    ) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::DELETE,
            "{+base_path}/sites/{site}/envs/{env}/domains/{domain}/cache.json",
        )
        .param("site", site)
        .param("env", env)
        .param("domain", domain);
        self.fetch_task(descriptor).await
    }

    // Code and files

    /// Copy user-uploaded files from one environment to another.
    pub async fn copy_files(&self, site: &str, source: &str, target: &str) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/files-copy/{source}/{target}.json",
        )
        .param("site", site)
        .param("source", source)
        .param("target", target);
        self.fetch_task(descriptor).await
    }

    /// Deploy the code currently on `source` to `target`.
    pub async fn deploy_code(&self, site: &str, source: &str, target: &str) -> Result<Task, Error> {
        let descriptor = RequestDescriptor::new(
            Method::POST,
            "{+base_path}/sites/{site}/code-deploy/{source}/{target}.json",
        )
        .param("site", site)
        .param("source", source)
        .param("target", target);
        self.fetch_task(descriptor).await
    }
}
