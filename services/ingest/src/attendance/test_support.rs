//! In-memory collaborators for exercising the sync without databases.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use punchsync_common::error::{PunchsyncError, PunchsyncResult};
use punchsync_common::types::Direction;
use punchsync_db::checkin::models::{CheckinEvent, LastCheckin};
use punchsync_db::checkin::repositories::{CheckinHistory, CheckinSink};
use punchsync_db::cursor::repositories::CursorStore;
use punchsync_db::device_log::models::{
    DeviceLogRecord, LogPassthrough, SourceTable, TableNaming,
};
use punchsync_db::device_log::repositories::{DeviceLogSource, SourceConnector};
use punchsync_db::employee::models::EmployeeRef;
use punchsync_db::employee::repositories::IdentityLookup;
use uuid::Uuid;

/// 2026-10-19 at `h:m`.
pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub fn punch(subject_id: &str, log_date: NaiveDateTime) -> DeviceLogRecord {
    DeviceLogRecord {
        device_log_id: 0,
        download_date: Some(log_date),
        device_id: Some(1),
        subject_id: subject_id.to_owned(),
        log_date,
        direction: None,
        att_direction: None,
        direction_hint: None,
        passthrough: LogPassthrough::default(),
    }
}

// ── Device log source ───────────────────────────────────────

#[derive(Clone)]
pub struct MockSource {
    naming: TableNaming,
    tables: HashMap<String, Vec<DeviceLogRecord>>,
    failing_fetch: HashSet<String>,
    probes: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            naming: TableNaming::new(None, "DeviceLogs"),
            tables: HashMap::new(),
            failing_fetch: HashSet::new(),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_table(mut self, name: &str, rows: Vec<DeviceLogRecord>) -> Self {
        self.tables.insert(name.to_owned(), rows);
        self
    }

    /// The table probes fine but the range query errors.
    pub fn failing_fetch(mut self, name: &str) -> Self {
        self.failing_fetch.insert(name.to_owned());
        self
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeviceLogSource for MockSource {
    fn naming(&self) -> &TableNaming {
        &self.naming
    }

    async fn probe(&self, table: &SourceTable) -> PunchsyncResult<()> {
        self.probes.lock().unwrap().push(table.name.clone());
        if self.tables.contains_key(&table.name) {
            Ok(())
        } else {
            Err(PunchsyncError::source_query(
                table.to_string(),
                format!("relation \"{}\" does not exist", table.name),
            ))
        }
    }

    async fn fetch_after(
        &self,
        table: &SourceTable,
        after: NaiveDateTime,
    ) -> PunchsyncResult<Vec<DeviceLogRecord>> {
        if self.failing_fetch.contains(&table.name) {
            return Err(PunchsyncError::source_query(table.to_string(), "statement timeout"));
        }
        let mut rows: Vec<DeviceLogRecord> = self
            .tables
            .get(&table.name)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.log_date > after)
            .collect();
        rows.sort_by_key(|r| r.log_date);
        Ok(rows)
    }
}

#[derive(Clone, Copy)]
pub enum ConnectFailure {
    Config,
    Connection,
}

pub struct MockConnector {
    source: Result<MockSource, ConnectFailure>,
    connects: Arc<Mutex<usize>>,
}

impl MockConnector {
    pub fn ok(source: MockSource) -> Self {
        Self {
            source: Ok(source),
            connects: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(failure: ConnectFailure) -> Self {
        Self {
            source: Err(failure),
            connects: Arc::new(Mutex::new(0)),
        }
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock().unwrap()
    }
}

#[async_trait]
impl SourceConnector for MockConnector {
    type Session = MockSource;

    async fn connect(&self) -> PunchsyncResult<MockSource> {
        *self.connects.lock().unwrap() += 1;
        match &self.source {
            Ok(source) => Ok(source.clone()),
            Err(ConnectFailure::Config) => Err(PunchsyncError::Config(
                "ATTENDANCE_DB_HOST is required but not set".to_owned(),
            )),
            Err(ConnectFailure::Connection) => {
                Err(PunchsyncError::Connection("connection refused".to_owned()))
            }
        }
    }
}

// ── Attendance store ────────────────────────────────────────

#[derive(Default)]
struct StoreInner {
    employees: HashMap<String, String>,
    checkins: Vec<CheckinEvent>,
    cursor: Option<String>,
    cursor_writes: Vec<String>,
    lookups: Vec<String>,
    fail_create_after: Option<usize>,
}

/// Employees, checkins and the cursor behind one lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employee(self, device_id: &str, employee_id: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .employees
            .insert(device_id.to_owned(), employee_id.to_owned());
        self
    }

    pub fn with_cursor(self, value: &str) -> Self {
        self.inner.lock().unwrap().cursor = Some(value.to_owned());
        self
    }

    /// `create` starts failing once `n` checkins exist.
    pub fn failing_create_after(self, n: usize) -> Self {
        self.inner.lock().unwrap().fail_create_after = Some(n);
        self
    }

    pub fn heal(&self) {
        self.inner.lock().unwrap().fail_create_after = None;
    }

    pub fn set_cursor(&self, value: Option<&str>) {
        self.inner.lock().unwrap().cursor = value.map(str::to_owned);
    }

    pub fn cursor_value(&self) -> Option<String> {
        self.inner.lock().unwrap().cursor.clone()
    }

    pub fn cursor_writes(&self) -> Vec<String> {
        self.inner.lock().unwrap().cursor_writes.clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.inner.lock().unwrap().lookups.clone()
    }

    pub fn checkins(&self) -> Vec<CheckinEvent> {
        self.inner.lock().unwrap().checkins.clone()
    }

    /// `(employee, time, direction)` sorted, for set comparisons.
    pub fn checkin_keys(&self) -> Vec<(String, NaiveDateTime, Direction)> {
        let mut keys: Vec<_> = self
            .checkins()
            .into_iter()
            .map(|c| (c.employee_id, c.time, c.direction))
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl IdentityLookup for MemoryStore {
    async fn find_employee_by_device_subject_id(
        &self,
        subject_id: &str,
    ) -> PunchsyncResult<Option<EmployeeRef>> {
        let mut inner = self.inner.lock().unwrap();
        inner.lookups.push(subject_id.to_owned());
        Ok(inner.employees.get(subject_id).map(EmployeeRef::new))
    }
}

#[async_trait]
impl CheckinHistory for MemoryStore {
    async fn most_recent(&self, employee: &EmployeeRef) -> PunchsyncResult<Option<LastCheckin>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .checkins
            .iter()
            .filter(|c| c.employee_id == employee.id)
            .max_by_key(|c| c.time)
            .map(|c| LastCheckin {
                direction: c.direction,
                time: c.time,
            }))
    }

    async fn exists(&self, employee: &EmployeeRef, time: NaiveDateTime) -> PunchsyncResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .checkins
            .iter()
            .any(|c| c.employee_id == employee.id && c.time == time))
    }
}

#[async_trait]
impl CheckinSink for MemoryStore {
    async fn create(
        &self,
        employee: &EmployeeRef,
        time: NaiveDateTime,
        direction: Direction,
    ) -> PunchsyncResult<CheckinEvent> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(limit) = inner.fail_create_after {
            if inner.checkins.len() >= limit {
                return Err(PunchsyncError::Database("connection reset by peer".to_owned()));
            }
        }
        let event = CheckinEvent {
            id: Uuid::new_v4(),
            employee_id: employee.id.clone(),
            time,
            direction,
            created_at: Utc::now(),
        };
        inner.checkins.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl CursorStore for MemoryStore {
    async fn get(&self) -> PunchsyncResult<Option<String>> {
        Ok(self.inner.lock().unwrap().cursor.clone())
    }

    async fn set(&self, value: &str) -> PunchsyncResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.cursor = Some(value.to_owned());
        inner.cursor_writes.push(value.to_owned());
        Ok(())
    }
}
