//! Copy/move of matched files into the destination tree.
//!
//! Copies keep permissions and access/modification times. Moves try a plain
//! rename first and fall back to copy + delete across filesystems; when the
//! source cannot be deleted the copy is rolled back. Neither ever
//! overwrites: a destination that appears after planning is reported as
//! [`TransferError::DestinationExists`].

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::TransferError;
use crate::types::TransferMode;

/// Transfer `source` to `destination`, creating parent directories as needed.
pub fn transfer(
    source: &Path,
    destination: &Path,
    mode: TransferMode,
) -> Result<(), TransferError> {
    let fail = |e: io::Error| {
        TransferError::classify(source.to_path_buf(), destination.to_path_buf(), e)
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    match mode {
        TransferMode::Copy => copy_preserving(source, destination).map_err(fail),
        TransferMode::Move => move_file(source, destination).map_err(fail),
    }
}

/// Copy contents, permissions and timestamps. The destination must not exist.
fn copy_preserving(source: &Path, destination: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;

    let result = (|| {
        io::copy(&mut reader, &mut writer)?;
        writer.set_permissions(meta.permissions())?;
        let mut times = FileTimes::new().set_modified(meta.modified()?);
        if let Ok(accessed) = meta.accessed() {
            times = times.set_accessed(accessed);
        }
        writer.set_times(times)?;
        writer.sync_all()
    })();

    if result.is_err() {
        // Leave no partial file behind.
        drop(writer);
        let _ = fs::remove_file(destination);
    }
    result
}

fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    if destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination created after planning",
        ));
    }
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            tracing::debug!("Cross-device move of {:?}, copying instead", source);
            copy_then_remove(source, destination)
        }
        Err(e) => Err(e),
    }
}

/// Copy, then delete the source. If the source cannot be deleted the copy is
/// removed again, so a failed move leaves only the original.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    copy_preserving(source, destination)?;
    if let Err(e) = fs::remove_file(source) {
        tracing::debug!("Could not remove {:?} after copy, rolling back", source);
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}
