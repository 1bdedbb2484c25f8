// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact submission queries.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::{FolioError, NewSubmission, StoredSubmission, SubmissionId, SubmissionRecord};
use rusqlite::params;
use rusqlite::types::Type;

use crate::database::map_tr_err;

/// Fixed-width UTC timestamps so that text ordering matches time ordering.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Insert a submission under a fresh UUID and return it.
pub async fn insert_submission(
    conn: &tokio_rusqlite::Connection,
    submission: &NewSubmission,
) -> Result<SubmissionId, FolioError> {
    let id = uuid::Uuid::new_v4().simple().to_string();
    let record = submission.to_record();
    let row_id = id.clone();
    conn.call(move |conn| -> Result<(), rusqlite::Error> {
        conn.execute(
            "INSERT INTO contact_submissions
                 (id, name, email, subject, message, submitted_at, ip_address, user_agent, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                row_id,
                record.name,
                record.email,
                record.subject,
                record.message,
                format_timestamp(record.submitted_at),
                record.ip_address,
                record.user_agent,
                record.status,
            ],
        )?;
        Ok(())
    })
    .await
    .map_err(map_tr_err)?;
    Ok(SubmissionId(id))
}

/// One page of submissions, newest first. Ties on `submitted_at` fall back to
/// reverse insertion order.
pub async fn find_page(
    conn: &tokio_rusqlite::Connection,
    skip: u64,
    limit: u64,
) -> Result<Vec<StoredSubmission>, FolioError> {
    let offset = i64::try_from(skip).unwrap_or(i64::MAX);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    conn.call(move |conn| -> Result<Vec<StoredSubmission>, rusqlite::Error> {
        let mut stmt = conn.prepare(
            "SELECT id, name, email, subject, message, submitted_at, ip_address, user_agent, status
             FROM contact_submissions
             ORDER BY submitted_at DESC, rowid DESC
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit, offset], |row| {
            let submitted_at: String = row.get(5)?;
            Ok(StoredSubmission {
                id: SubmissionId(row.get(0)?),
                record: SubmissionRecord {
                    name: row.get(1)?,
                    email: row.get(2)?,
                    subject: row.get(3)?,
                    message: row.get(4)?,
                    submitted_at: parse_timestamp(5, &submitted_at)?,
                    ip_address: row.get(6)?,
                    user_agent: row.get(7)?,
                    status: row.get(8)?,
                },
            })
        })?;
        rows.collect()
    })
    .await
    .map_err(map_tr_err)
}

/// Total number of submissions.
pub async fn count_submissions(conn: &tokio_rusqlite::Connection) -> Result<u64, FolioError> {
    let count = conn
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM contact_submissions", [], |row| {
                row.get(0)
            })
        })
        .await
        .map_err(map_tr_err)?;
    Ok(u64::try_from(count).unwrap_or_default())
}
