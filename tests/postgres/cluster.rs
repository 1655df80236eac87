//! Embedded `PostgreSQL` cluster shared by the store tests.
//!
//! The cluster starts once per test binary. Each test then gets its own
//! database, dropped again when the test finishes. Root runs go through the
//! privilege-dropping worker named by `PG_EMBEDDED_WORKER`.

use std::ffi::OsString;
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

use crate::test_helpers::EnvVarGuard;

/// Boxed error type used by fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<ManagedCluster> = OnceLock::new();
static START_LOCK: Mutex<()> = Mutex::new(());

/// Running embedded cluster plus the handles that keep it alive.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    _runtime: Option<Runtime>,
    _postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let port_guard = EnvVarGuard::set_many(&port_override()?);
        let mut bootstrap = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(port_guard);
        sync_password_from_file(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap,
            env_vars,
            _runtime: None,
            _postgres: None,
        };
        match cluster.bootstrap.privileges {
            ExecutionPrivileges::Root => cluster.start_via_worker()?,
            ExecutionPrivileges::Unprivileged => cluster.start_in_process()?,
        }
        Ok(cluster)
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let env_guard = EnvVarGuard::set_many(&env_vars_to_os(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.bootstrap.settings.clone());
        runtime.block_on(async {
            postgres
                .setup()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
            if !matches!(postgres.status(), Status::Started) {
                postgres
                    .start()
                    .await
                    .map_err(|err| Box::new(err) as BoxError)?;
            }
            Ok::<(), BoxError>(())
        })?;
        drop(env_guard);
        self.bootstrap.settings = postgres.settings().clone();
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        self._runtime = Some(runtime);
        self._postgres = Some(postgres);
        Ok(())
    }

    fn start_via_worker(&mut self) -> Result<(), BoxError> {
        self.run_worker_operation(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
        self.run_worker_operation(WorkerOperation::Start, self.bootstrap.start_timeout)?;
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        Ok(())
    }

    fn run_worker_operation(
        &self,
        operation: WorkerOperation,
        timeout: Duration,
    ) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "running as root requires PG_EMBEDDED_WORKER to name a pg_worker binary",
            )) as BoxError
        })?;
        let args = WorkerRequestArgs {
            worker: worker.as_path(),
            settings: &self.bootstrap.settings,
            env_vars: &self.env_vars,
            operation,
            timeout,
        };
        run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    /// Returns the connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }
}

/// Database created for one test and dropped with the guard.
pub struct TemporaryDatabase {
    cluster: &'static ManagedCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Creates an empty database on the shared cluster, starting the
    /// cluster on first use.
    ///
    /// Blocks; call from `spawn_blocking` inside async tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster cannot start or the database cannot be
    /// created.
    pub fn create() -> Result<Self, BoxError> {
        let cluster = shared_cluster()?;
        let name = format!("taskgate_{}", Uuid::new_v4().simple());
        cluster.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(&name)))?;
        let url = cluster.database_url(&name);
        Ok(Self { cluster, name, url })
    }

    /// Returns the connection URL of this database.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        drop(self.cluster.execute_admin_sql(&sql));
    }
}

fn shared_cluster() -> Result<&'static ManagedCluster, BoxError> {
    let _guard = START_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cluster) = SHARED_CLUSTER.get() {
        return Ok(cluster);
    }
    let started = ManagedCluster::start()?;
    Ok(SHARED_CLUSTER.get_or_init(|| started))
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn env_vars_to_os(env_vars: &[(String, Option<String>)]) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Picks a free port unless `PG_PORT` already names one.
fn port_override() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    if std::env::var_os("PG_PORT").is_some() {
        return Ok(Vec::new());
    }
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(vec![(
        OsString::from("PG_PORT"),
        Some(OsString::from(port.to_string())),
    )])
}

fn open_parent_dir(path: &Path) -> Result<(Dir, &Path), BoxError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Box::new(std::io::Error::other("path must include a file name")) as BoxError)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, Path::new(file_name)))
}

fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let (dir, file_name) = open_parent_dir(&settings.password_file)?;
    match dir.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(Box::new(err) as BoxError),
    }
    Ok(())
}

/// Reads the bound port back from `postmaster.pid`, whose fourth line
/// holds it.
fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let data_dir = Dir::open_ambient_dir(&settings.data_dir, ambient_authority())?;
    let contents = match data_dir.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(Box::new(err) as BoxError),
    };
    if let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    {
        settings.port = port;
    }
    Ok(())
}
