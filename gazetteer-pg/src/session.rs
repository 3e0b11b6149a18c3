//! PostgreSQL-backed implementation of the database capability surface.

use gazetteer_core::{ConnectionTarget, Connector, DbSession, SessionError, VersionTuple};
use postgres::{Client, NoTls};

/// Opens one [`PgSession`] per pipeline stage against the configured target.
#[derive(Debug, Clone)]
pub struct PgConnector {
    target: ConnectionTarget,
}

impl PgConnector {
    /// Build a connector for the given target.
    #[must_use]
    pub const fn new(target: ConnectionTarget) -> Self {
        Self { target }
    }
}

impl Connector for PgConnector {
    type Session = PgSession;

    fn connect(&self) -> Result<Self::Session, SessionError> {
        let mut config = Client::configure();
        config.dbname(&self.target.dbname);
        config.host(self.target.host.as_deref().unwrap_or("localhost"));
        if let Some(port) = self.target.port {
            config.port(port);
        }
        match &self.target.user {
            Some(user) => {
                config.user(user);
            }
            // The driver has no implicit current-user fallback the way libpq
            // does, so mirror it from the environment.
            None => {
                if let Ok(user) = std::env::var("USER") {
                    config.user(&user);
                }
            }
        }
        if let Some(password) = &self.target.password {
            config.password(password);
        }
        let client = config.connect(NoTls).map_err(SessionError::new)?;
        Ok(PgSession { client })
    }
}

/// A live connection to the target database.
pub struct PgSession {
    client: Client,
}

impl DbSession for PgSession {
    fn execute(&mut self, statement: &str) -> Result<(), SessionError> {
        self.client.batch_execute(statement).map_err(SessionError::new)
    }

    fn query_count(&mut self, statement: &str) -> Result<i64, SessionError> {
        let row = self
            .client
            .query_one(statement, &[])
            .map_err(SessionError::new)?;
        row.try_get(0).map_err(SessionError::new)
    }

    fn server_version(&mut self) -> Result<VersionTuple, SessionError> {
        let row = self
            .client
            .query_one("SHOW server_version_num", &[])
            .map_err(SessionError::new)?;
        let raw: String = row.try_get(0).map_err(SessionError::new)?;
        let number: u32 = raw
            .trim()
            .parse()
            .map_err(|err| SessionError::new(format!("bad server_version_num '{raw}': {err}")))?;
        Ok(split_server_version_num(number))
    }

    fn extension_version(&mut self, extension: &str) -> Result<VersionTuple, SessionError> {
        let row = self
            .client
            .query_one(
                "SELECT extversion FROM pg_extension WHERE extname = $1",
                &[&extension],
            )
            .map_err(SessionError::new)?;
        let raw: String = row.try_get(0).map_err(SessionError::new)?;
        parse_version_text(&raw).ok_or_else(|| {
            SessionError::new(format!(
                "extension '{extension}' reported unparseable version '{raw}'"
            ))
        })
    }

    // Statements are issued on an autocommitting connection; there is no
    // open transaction to close.
    fn commit(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    fn role_exists(&mut self, role: &str) -> Result<bool, SessionError> {
        let row = self
            .client
            .query_one("SELECT count(*) FROM pg_user WHERE usename = $1", &[&role])
            .map_err(SessionError::new)?;
        let count: i64 = row.try_get(0).map_err(SessionError::new)?;
        Ok(count > 0)
    }
}

/// Split `server_version_num` into a version tuple.
///
/// From PostgreSQL 10 the scheme is `major * 10000 + minor`; the 9.x series
/// used `major * 10000 + minor * 100 + patch`.
fn split_server_version_num(number: u32) -> VersionTuple {
    if number >= 100_000 {
        VersionTuple::new(number / 10_000, number % 10_000)
    } else {
        VersionTuple::new(number / 10_000, number / 100 % 100)
    }
}

/// Take the leading `major.minor` out of a dotted version string such as the
/// `3.4.2` reported in `pg_extension`.
fn parse_version_text(raw: &str) -> Option<VersionTuple> {
    let mut parts = raw.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()
        .map_or(Some(0), |part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })?;
    Some(VersionTuple::new(major, minor))
}

#[cfg(test)]
mod tests {
    use super::{parse_version_text, split_server_version_num};
    use gazetteer_core::VersionTuple;
    use rstest::rstest;

    #[rstest]
    #[case::v16(160_002, VersionTuple::new(16, 2))]
    #[case::v10(100_000, VersionTuple::new(10, 0))]
    #[case::v9_6(90_605, VersionTuple::new(9, 6))]
    #[case::v9_5(90_500, VersionTuple::new(9, 5))]
    fn splits_server_version_numbers(#[case] number: u32, #[case] expected: VersionTuple) {
        assert_eq!(split_server_version_num(number), expected);
    }

    #[rstest]
    #[case::three_components("3.4.2", Some(VersionTuple::new(3, 4)))]
    #[case::two_components("2.5", Some(VersionTuple::new(2, 5)))]
    #[case::major_only("3", Some(VersionTuple::new(3, 0)))]
    #[case::dev_suffix("3.5dev", Some(VersionTuple::new(3, 5)))]
    #[case::garbage("not a version", None)]
    fn parses_extension_version_text(
        #[case] raw: &str,
        #[case] expected: Option<VersionTuple>,
    ) {
        assert_eq!(parse_version_text(raw), expected);
    }
}
