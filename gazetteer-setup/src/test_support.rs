//! Shared in-memory stubs for pipeline tests.

use std::{cell::RefCell, rc::Rc};

use gazetteer_core::{
    Connector, DbSession, ProcessError, ProcessRequest, ProcessRunner, ProcessStatus,
    SessionError, VersionTuple,
};

/// Observable state behind a [`StubConnector`] and its sessions.
#[derive(Debug)]
pub struct StubState {
    pub executed: Vec<String>,
    pub commits: usize,
    pub server_version: VersionTuple,
    pub postgis_version: VersionTuple,
    pub roles: Vec<String>,
    pub place_rows: i64,
    pub dropped_tables: Vec<String>,
    pub connections: usize,
    /// When set, `execute` fails for any statement containing this fragment.
    pub fail_execute_containing: Option<String>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            executed: Vec::new(),
            commits: 0,
            server_version: VersionTuple::new(14, 2),
            postgis_version: VersionTuple::new(3, 2),
            roles: Vec::new(),
            place_rows: 1,
            dropped_tables: Vec::new(),
            connections: 0,
            fail_execute_containing: None,
        }
    }
}

/// Connector producing sessions over shared in-memory state.
#[derive(Debug, Clone, Default)]
pub struct StubConnector {
    state: Rc<RefCell<StubState>>,
}

impl StubConnector {
    pub fn state(&self) -> std::cell::Ref<'_, StubState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> std::cell::RefMut<'_, StubState> {
        self.state.borrow_mut()
    }
}

impl Connector for StubConnector {
    type Session = StubSession;

    fn connect(&self) -> Result<Self::Session, SessionError> {
        self.state.borrow_mut().connections += 1;
        Ok(StubSession {
            state: Rc::clone(&self.state),
        })
    }
}

/// In-memory [`DbSession`] recording every statement it is asked to run.
#[derive(Debug)]
pub struct StubSession {
    state: Rc<RefCell<StubState>>,
}

impl DbSession for StubSession {
    fn execute(&mut self, statement: &str) -> Result<(), SessionError> {
        let mut state = self.state.borrow_mut();
        if let Some(fragment) = &state.fail_execute_containing {
            if statement.contains(fragment.as_str()) {
                return Err(SessionError::new(format!(
                    "stubbed failure for statement: {statement}"
                )));
            }
        }
        state.executed.push(statement.to_owned());
        Ok(())
    }

    fn query_count(&mut self, statement: &str) -> Result<i64, SessionError> {
        let mut state = self.state.borrow_mut();
        state.executed.push(statement.to_owned());
        Ok(state.place_rows)
    }

    fn server_version(&mut self) -> Result<VersionTuple, SessionError> {
        Ok(self.state.borrow().server_version)
    }

    fn extension_version(&mut self, extension: &str) -> Result<VersionTuple, SessionError> {
        if extension == "postgis" {
            Ok(self.state.borrow().postgis_version)
        } else {
            Err(SessionError::new(format!(
                "unknown extension: {extension}"
            )))
        }
    }

    fn commit(&mut self) -> Result<(), SessionError> {
        self.state.borrow_mut().commits += 1;
        Ok(())
    }

    fn role_exists(&mut self, role: &str) -> Result<bool, SessionError> {
        Ok(self.state.borrow().roles.iter().any(|name| name == role))
    }

    fn drop_table(&mut self, table: &str) -> Result<(), SessionError> {
        self.state.borrow_mut().dropped_tables.push(table.to_owned());
        Ok(())
    }
}

/// [`ProcessRunner`] returning a fixed exit code and recording each request.
#[derive(Debug)]
pub struct StubRunner {
    exit_code: i32,
    requests: RefCell<Vec<ProcessRequest>>,
}

impl StubRunner {
    pub fn succeeding() -> Self {
        Self::exiting_with(0)
    }

    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.borrow().clone()
    }
}

impl ProcessRunner for StubRunner {
    fn run(&self, request: &ProcessRequest) -> Result<ProcessStatus, ProcessError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(ProcessStatus::from_code(self.exit_code))
    }
}
