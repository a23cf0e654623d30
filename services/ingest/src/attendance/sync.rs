use chrono::{Local, NaiveDateTime};

use punchsync_common::error::{PunchsyncError, PunchsyncResult};
use punchsync_db::checkin::repositories::{CheckinHistory, CheckinSink};
use punchsync_db::cursor::repositories::CursorStore;
use punchsync_db::device_log::models::{DeviceLogRecord, SourceTable};
use punchsync_db::device_log::repositories::SourceConnector;
use punchsync_db::employee::repositories::IdentityLookup;
use punchsync_rules::{format_cursor, resolve_cursor, GuardDecision, RulesConfig};

use super::state::{SyncReport, SyncState};
use super::{fetcher, guard, inference, resolver};

pub const SOURCE_NAME: &str = "device_logs";

/// Pulls new punches from the device-log database into employee checkins.
///
/// The cursor is written once, after every fetched row has been handled; any
/// failure before that leaves it where it was so the next run refetches.
pub struct AttendanceSyncer<C, I, H, K, S> {
    connector: C,
    identity: I,
    history: H,
    sink: K,
    cursor: S,
    rules: RulesConfig,
}

impl<C, I, H, K, S> AttendanceSyncer<C, I, H, K, S>
where
    C: SourceConnector,
    I: IdentityLookup,
    H: CheckinHistory,
    K: CheckinSink,
    S: CursorStore,
{
    pub fn new(
        connector: C,
        identity: I,
        history: H,
        sink: K,
        cursor: S,
        rules: RulesConfig,
    ) -> Self {
        Self {
            connector,
            identity,
            history,
            sink,
            cursor,
            rules,
        }
    }

    pub async fn run(&self) -> SyncReport {
        self.run_at(Local::now().naive_local()).await
    }

    /// One full pass with `now` as the wall clock of the source system.
    pub async fn run_at(&self, now: NaiveDateTime) -> SyncReport {
        let mut report = SyncReport::new();

        if let Err(e) = self.execute(now, &mut report).await {
            tracing::error!(
                state = %report.state,
                table = report.table.as_deref().unwrap_or("-"),
                created = report.created,
                error = %e,
                "attendance sync aborted"
            );
            report.state = SyncState::Aborted;
            report.error = Some(e);
            return report;
        }

        tracing::info!(
            table = report.table.as_deref().unwrap_or("-"),
            fetched = report.fetched,
            created = report.created,
            skipped = report.skipped(),
            skipped_unmatched = report.skipped_unmatched,
            skipped_duplicate = report.skipped_duplicate,
            skipped_debounce = report.skipped_debounce,
            max_log_time = %report.max_log_time.map(format_cursor).unwrap_or_default(),
            cursor = %report.cursor_after.map(format_cursor).unwrap_or_default(),
            advanced = report.advanced(),
            "attendance sync completed"
        );
        report
    }

    async fn execute(&self, now: NaiveDateTime, report: &mut SyncReport) -> PunchsyncResult<()> {
        transition(report, SyncState::ResolvingSource);

        let stored = self.cursor.get().await?;
        let cursor = resolve_cursor(stored.as_deref(), now, self.rules.default_lookback_days);
        if stored.as_deref().map(str::trim) != Some(format_cursor(cursor).as_str()) {
            tracing::info!(
                stored = stored.as_deref().unwrap_or("<none>"),
                cursor = %format_cursor(cursor),
                "stored cursor missing or unusable, using fallback"
            );
        }
        report.cursor_before = Some(cursor);
        report.cursor_after = Some(cursor);

        let session = self.connector.connect().await?;
        let (table, rows) = self.load_rows(&session, now, cursor, report).await?;
        drop(session);

        report.table = Some(table.to_string());
        report.fetched = rows.len();

        if rows.is_empty() {
            tracing::info!(table = %table, "no new device logs");
            transition(report, SyncState::Idle);
            return Ok(());
        }

        transition(report, SyncState::Processing);
        let mut max_log_time: Option<NaiveDateTime> = None;
        for row in &rows {
            max_log_time = Some(max_log_time.map_or(row.log_date, |m| m.max(row.log_date)));
            report.max_log_time = max_log_time;
            self.process_row(row, report).await?;
        }

        transition(report, SyncState::Committing);
        if let Some(max) = max_log_time.filter(|m| *m > cursor) {
            self.cursor.set(&format_cursor(max)).await?;
            report.cursor_after = Some(max);
        }

        transition(report, SyncState::Idle);
        Ok(())
    }

    /// Try the current period, then the previous one. A table is used only if both
    /// its probe and its range query succeed.
    async fn load_rows(
        &self,
        session: &C::Session,
        now: NaiveDateTime,
        cursor: NaiveDateTime,
        report: &mut SyncReport,
    ) -> PunchsyncResult<(SourceTable, Vec<DeviceLogRecord>)> {
        let mut tried = Vec::new();

        for table in resolver::candidate_tables(session, now.date()) {
            transition(report, SyncState::ResolvingSource);
            if resolver::probe(session, &table).await.is_err() {
                tried.push(table.to_string());
                continue;
            }

            transition(report, SyncState::Fetching);
            match fetcher::fetch_logs(session, &table, cursor).await {
                Ok(rows) => return Ok((table, rows)),
                Err(_) => tried.push(table.to_string()),
            }
        }

        Err(PunchsyncError::SourceUnavailable {
            tried: tried.join(", "),
        })
    }

    async fn process_row(&self, row: &DeviceLogRecord, report: &mut SyncReport) -> PunchsyncResult<()> {
        let inferred = inference::infer(
            &self.identity,
            &self.history,
            self.rules.direction_source,
            row,
        )
        .await?;

        let Some(inferred) = inferred else {
            tracing::debug!(
                subject_id = %row.subject_id,
                log_date = %row.log_date,
                "no employee for device user, skipping"
            );
            report.skipped_unmatched += 1;
            return Ok(());
        };

        let decision = guard::decide(
            &self.history,
            &inferred.employee,
            row.log_date,
            inferred.last.as_ref(),
            self.rules.debounce_secs,
        )
        .await?;

        match decision {
            GuardDecision::Create => {
                let event = self
                    .sink
                    .create(&inferred.employee, row.log_date, inferred.direction)
                    .await?;
                tracing::debug!(
                    employee_id = %event.employee_id,
                    time = %event.time,
                    direction = %event.direction,
                    "checkin created"
                );
                report.created += 1;
            }
            GuardDecision::SkipDuplicate => report.skipped_duplicate += 1,
            GuardDecision::SkipDebounce => report.skipped_debounce += 1,
        }

        if decision != GuardDecision::Create {
            tracing::debug!(
                employee_id = %inferred.employee.id,
                log_date = %row.log_date,
                decision = decision.as_str(),
                "punch not materialized"
            );
        }

        Ok(())
    }
}

fn transition(report: &mut SyncReport, next: SyncState) {
    if report.state != next {
        tracing::debug!(from = %report.state, to = %next, "sync state");
        report.state = next;
    }
}
