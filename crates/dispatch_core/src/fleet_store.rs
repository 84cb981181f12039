//! Line-oriented fleet file.
//!
//! One cab per line, whitespace separated: `id driver location available`, where
//! `available` is `1` or `0`. The driver name may itself contain whitespace: the first
//! field is the id, the last two are location and availability, and everything between
//! them is the name (runs of whitespace collapse to a single space).
//!
//! Only the fleet is stored. Rides and the backlog are not persisted.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::debug;

use crate::fleet::{Cab, CabId, CabStatus, FleetRegistry};
use crate::network::NodeId;

#[derive(Debug, Error)]
pub enum FleetStoreError {
    #[error("fleet file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("fleet file '{}' line {line}: {reason}", .path.display())]
    InvalidFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("fleet file '{}' line {line}: cab {cab} listed twice", .path.display())]
    Duplicate { path: PathBuf, line: usize, cab: CabId },
}

/// Render one cab as a fleet file line (without the trailing newline).
pub fn format_cab_line(cab: &Cab) -> String {
    let driver = cab.driver.split_whitespace().collect::<Vec<_>>().join(" ");
    let available = u8::from(cab.status.is_free());
    if driver.is_empty() {
        format!("{} {} {}", cab.id, cab.location, available)
    } else {
        format!("{} {} {} {}", cab.id, driver, cab.location, available)
    }
}

/// Parse one non-empty fleet file line.
pub fn parse_cab_line(line: &str) -> Result<Cab, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(format!(
            "expected `id driver location available`, found {} field(s)",
            fields.len()
        ));
    }

    let id = fields[0]
        .parse::<u32>()
        .map_err(|error| format!("invalid cab id '{}': {error}", fields[0]))?;
    let location_field = fields[fields.len() - 2];
    let location = location_field
        .parse::<u32>()
        .map_err(|error| format!("invalid location '{location_field}': {error}"))?;
    let status = match fields[fields.len() - 1] {
        "1" => CabStatus::Available,
        "0" => CabStatus::OnRide,
        other => return Err(format!("availability must be 0 or 1, found '{other}'")),
    };
    let driver = fields[1..fields.len() - 2].join(" ");

    Ok(Cab {
        id: CabId(id),
        driver,
        location: NodeId(location),
        status,
    })
}

/// Load a fleet. A missing file is an empty fleet; blank lines are ignored.
pub fn load_fleet(path: &Path) -> Result<FleetRegistry, FleetStoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no fleet file, starting with an empty fleet");
            return Ok(FleetRegistry::new());
        }
        Err(source) => {
            return Err(FleetStoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut fleet = FleetRegistry::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let cab = parse_cab_line(line).map_err(|reason| FleetStoreError::InvalidFormat {
            path: path.to_path_buf(),
            line: line_number,
            reason,
        })?;
        let id = cab.id;
        fleet.insert(cab).map_err(|_| FleetStoreError::Duplicate {
            path: path.to_path_buf(),
            line: line_number,
            cab: id,
        })?;
    }

    debug!(path = %path.display(), cabs = fleet.len(), "fleet loaded");
    Ok(fleet)
}

/// Write the whole fleet, replacing the file atomically (temp file + rename).
pub fn save_fleet(path: &Path, fleet: &FleetRegistry) -> Result<(), FleetStoreError> {
    let io_error = |source: io::Error| FleetStoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut contents = String::new();
    for cab in fleet.iter() {
        contents.push_str(&format_cab_line(cab));
        contents.push('\n');
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(format!(".tmp.{nanos}"));
    let temp_path = PathBuf::from(temp_name);

    let write_result = File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(source) = write_result.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(source));
    }

    debug!(path = %path.display(), cabs = fleet.len(), "fleet saved");
    Ok(())
}
