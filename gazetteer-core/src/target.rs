//! The connection descriptor shared by every database-facing operation.

/// Connection parameters for the target database.
///
/// The descriptor is owned by the caller and handed unchanged to every stage.
/// External helper binaries (`createdb`, `osm2pgsql`) receive it as libpq
/// environment variables rather than command-line flags so that credentials
/// stay out of the process listing.
///
/// # Examples
/// ```
/// use gazetteer_core::ConnectionTarget;
///
/// let target = ConnectionTarget::new("gazetteer")
///     .with_host("db.example.org")
///     .with_port(5433);
/// let env = target.client_env();
/// assert!(env.contains(&("PGDATABASE".to_owned(), "gazetteer".to_owned())));
/// assert!(env.contains(&("PGPORT".to_owned(), "5433".to_owned())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Name of the database to create and populate.
    pub dbname: String,
    /// Server host; `None` falls back to the client library default.
    pub host: Option<String>,
    /// Server port; `None` falls back to the client library default.
    pub port: Option<u16>,
    /// Role to connect as; `None` falls back to the client library default.
    pub user: Option<String>,
    /// Password for the connecting role, if one is required.
    pub password: Option<String>,
}

impl ConnectionTarget {
    /// Construct a target for the named database with library defaults for
    /// everything else.
    #[must_use]
    pub fn new(dbname: impl Into<String>) -> Self {
        Self {
            dbname: dbname.into(),
            host: None,
            port: None,
            user: None,
            password: None,
        }
    }

    /// Set the server host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the connecting role.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password for the connecting role.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Render the target as libpq `PG*` environment variables.
    ///
    /// Only parameters that are actually set are emitted, leaving the client
    /// library's own defaulting (unix socket, current OS user) intact.
    #[must_use]
    pub fn client_env(&self) -> Vec<(String, String)> {
        let mut env = vec![("PGDATABASE".to_owned(), self.dbname.clone())];
        if let Some(host) = &self.host {
            env.push(("PGHOST".to_owned(), host.clone()));
        }
        if let Some(port) = self.port {
            env.push(("PGPORT".to_owned(), port.to_string()));
        }
        if let Some(user) = &self.user {
            env.push(("PGUSER".to_owned(), user.clone()));
        }
        if let Some(password) = &self.password {
            env.push(("PGPASSWORD".to_owned(), password.clone()));
        }
        env
    }
}
