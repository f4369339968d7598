//! Snapshot export/import.
//!
//! A snapshot is a JSON document `{ appName, version, data }` written as UTF-8
//! with a leading byte-order mark. Import accepts the document only when both
//! `appName` and `version` match this build and `data` is an object; it then
//! replaces the whole session or nothing at all.

use std::fs;
use std::path::{Path, PathBuf};

use alibi_domain::common::{date_stamp, sanitize_filename};
use alibi_domain::Scenario;
use serde::Serialize;
use serde_json::Value;

use crate::clock::ClockPort;
use crate::error::{EngineError, ImportError};
use crate::session::{Session, SessionData};

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const BOM: char = '\u{feff}';

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    app_name: &'a str,
    version: &'a str,
    data: &'a SessionData,
}

/// Serializes the session, BOM included.
pub fn export(session: &Session) -> Result<String, EngineError> {
    let data = session.data();
    let json = serde_json::to_string_pretty(&Envelope {
        app_name: APP_NAME,
        version: APP_VERSION,
        data: &data,
    })?;
    Ok(format!("{}{}", BOM, json))
}

/// Checks and decodes a snapshot without touching any session.
pub fn parse(contents: &str) -> Result<SessionData, ImportError> {
    let contents = contents.strip_prefix(BOM).unwrap_or(contents);
    let mut document: Value = serde_json::from_str(contents)?;

    let app_name = document.get("appName").and_then(Value::as_str);
    if app_name != Some(APP_NAME) {
        return Err(ImportError::WrongApp {
            found: app_name.map(str::to_string),
        });
    }
    let version = document.get("version").and_then(Value::as_str);
    if version != Some(APP_VERSION) {
        return Err(ImportError::WrongVersion {
            found: version.map(str::to_string),
            expected: APP_VERSION,
        });
    }

    let data = match document.get_mut("data").map(Value::take) {
        None | Some(Value::Null) => return Err(ImportError::MissingData),
        Some(data @ Value::Object(_)) => data,
        Some(_) => {
            return Err(ImportError::InvalidData("data must be an object".to_string()));
        }
    };
    serde_json::from_value(data).map_err(|e| ImportError::InvalidData(e.to_string()))
}

/// Replaces the session with the snapshot in `contents`. All or nothing.
pub fn import(session: &mut Session, contents: &str) -> Result<(), EngineError> {
    let data = parse(contents).map_err(|e| {
        tracing::warn!(error = %e, "Rejected snapshot import");
        e
    })?;
    session.replace(data).map_err(|e| {
        tracing::warn!(error = %e, "Rejected snapshot import");
        if matches!(e, EngineError::DuplicateId { .. } | EngineError::InvalidInput(_)) {
            ImportError::InvalidData(e.to_string()).into()
        } else {
            e
        }
    })
}

/// `yyyyMMdd_<scenario name>.json`, with characters unsafe in file names
/// replaced by `_`.
pub fn export_file_name(scenario: &Scenario, clock: &dyn ClockPort) -> String {
    format!(
        "{}_{}.json",
        date_stamp(clock.now()),
        sanitize_filename(scenario.name.as_str())
    )
}

/// Writes an export into `dir` and returns the file path.
pub fn write_to_dir(
    session: &Session,
    dir: &Path,
    clock: &dyn ClockPort,
) -> Result<PathBuf, EngineError> {
    let path = dir.join(export_file_name(session.scenario(), clock));
    let contents = export(session)?;
    fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Exported session");
    Ok(path)
}

pub fn read_file(session: &mut Session, path: &Path) -> Result<(), EngineError> {
    let contents = fs::read_to_string(path).map_err(ImportError::from)?;
    import(session, &contents)?;
    tracing::info!(path = %path.display(), "Imported session");
    Ok(())
}
