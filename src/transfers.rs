//! Transfer statistics for an acquisition
//!
//! Each transfer of an acquisition is a folder `<acqid>_<object>` holding an
//! `images` bag, an `objects` bag, or both. The bag-info `Payload-Oxum`
//! (`<bytes>.<files>`) and `Bagging-Date` of each bag are tabulated into one
//! CSV report per acquisition.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{ExtentError, ExtentResult};
use crate::review::ReviewLog;

pub const BAG_INFO: &str = "bag-info.txt";
pub const IMAGES_DIR: &str = "images";
pub const OBJECTS_DIR: &str = "objects";

pub const REPORT_HEADER: [&str; 7] = [
    "acquisition_id",
    "object_id",
    "date",
    "image_files",
    "image_size",
    "object_files",
    "object_size",
];

/// Date, file count and byte size of one bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagStats {
    pub date: NaiveDate,
    pub files: u64,
    pub size: u64,
}

/// Parse `Payload-Oxum: <bytes>.<files>`
fn parse_oxum(value: &str) -> Option<(u64, u64)> {
    let (size, files) = value.trim().split_once('.')?;
    Some((size.parse().ok()?, files.parse().ok()?))
}

/// Read the stats of the bag at `bag_dir`
///
/// A folder without bag-info, or bag-info without a date or an oxum, yields
/// a review notice and no stats.
pub fn read_bag_stats(bag_dir: &Path, review: &mut ReviewLog) -> ExtentResult<Option<BagStats>> {
    let bag_info = bag_dir.join(BAG_INFO);
    if !bag_info.is_file() {
        review.notice(format!("Directory should be formatted as a bag: {}", bag_dir.display()));
        return Ok(None);
    }

    let text = fs::read_to_string(&bag_info)?;
    let mut date = None;
    let mut oxum = None;
    for line in text.lines() {
        if let Some(value) = line.strip_prefix("Bagging-Date:") {
            date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
        } else if let Some(value) = line.strip_prefix("Payload-Oxum:") {
            oxum = parse_oxum(value);
        }
    }

    let Some(date) = date else {
        review.notice(format!("Bagging date not found in {}", bag_info.display()));
        return Ok(None);
    };
    let Some((size, files)) = oxum else {
        review.notice(format!("Bagging size or files not found in {}", bag_info.display()));
        return Ok(None);
    };

    Ok(Some(BagStats { date, files, size }))
}

/// One row of the transfer report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferStats {
    pub acquisition_id: String,
    pub object_id: String,
    pub date: NaiveDate,
    pub image_files: u64,
    pub image_size: u64,
    pub object_files: u64,
    pub object_size: u64,
}

impl TransferStats {
    fn record(&self) -> [String; 7] {
        [
            self.acquisition_id.clone(),
            self.object_id.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.image_files.to_string(),
            self.image_size.to_string(),
            self.object_files.to_string(),
            self.object_size.to_string(),
        ]
    }
}

/// Stats for one transfer folder, if either bag is readable
///
/// The images bag date wins over the objects bag date. A missing side
/// reports zero files and zero bytes.
pub fn collect_stats(transfer_dir: &Path, review: &mut ReviewLog) -> ExtentResult<Option<TransferStats>> {
    let images_dir = transfer_dir.join(IMAGES_DIR);
    let objects_dir = transfer_dir.join(OBJECTS_DIR);

    let images = if images_dir.is_dir() {
        read_bag_stats(&images_dir, review)?
    } else {
        None
    };
    let objects = if objects_dir.is_dir() {
        read_bag_stats(&objects_dir, review)?
    } else {
        None
    };

    let Some(date) = images.or(objects).map(|bag| bag.date) else {
        debug!(transfer = %transfer_dir.display(), "No images or objects found");
        return Ok(None);
    };

    let name = transfer_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let (acquisition_id, object_id) = match name.rsplit_once('_') {
        Some((acq, object)) => (acq.to_string(), object.to_string()),
        None => (name.clone(), String::new()),
    };

    Ok(Some(TransferStats {
        acquisition_id,
        object_id,
        date,
        image_files: images.map(|b| b.files).unwrap_or(0),
        image_size: images.map(|b| b.size).unwrap_or(0),
        object_files: objects.map(|b| b.files).unwrap_or(0),
        object_size: objects.map(|b| b.size).unwrap_or(0),
    }))
}

/// Stats for every transfer of an acquisition, in folder name order
#[instrument(skip(review), fields(transfers = %transfers_dir.display()))]
pub fn collect_acquisition(
    transfers_dir: &Path,
    acqid: &str,
    review: &mut ReviewLog,
) -> ExtentResult<Vec<TransferStats>> {
    let acq_dir = transfers_dir.join(acqid);
    if !acq_dir.is_dir() {
        return Err(ExtentError::InvalidInput(format!(
            "Transfer folder not found: {}",
            acq_dir.display()
        )));
    }

    let mut transfers: Vec<PathBuf> = fs::read_dir(&acq_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    transfers.sort();

    let mut all_stats = Vec::new();
    for transfer in &transfers {
        match collect_stats(transfer, review)? {
            Some(stats) => {
                info!(object = %stats.object_id, date = %stats.date, "Transfer stats collected");
                all_stats.push(stats);
            }
            None => review.notice(format!("No stats found for {}", transfer.display())),
        }
    }

    Ok(all_stats)
}

/// Write `<acqid>_transfer_report.txt` as CSV into `dest`
pub fn write_stats(stats: &[TransferStats], dest: &Path, acqid: &str) -> ExtentResult<PathBuf> {
    let report_path = dest.join(format!("{}_transfer_report.txt", acqid));
    let mut writer = csv::Writer::from_path(&report_path)?;

    writer.write_record(REPORT_HEADER)?;
    for row in stats {
        writer.write_record(row.record())?;
    }
    writer.flush()?;

    info!(rows = stats.len(), "Transfer report written to {:?}", report_path);
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_bag(dir: &Path, info: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("bagit.txt"), "BagIt-Version: 0.97\n").unwrap();
        fs::write(dir.join(BAG_INFO), info).unwrap();
    }

    fn acquisition() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let acq = tmp.path().join("ACQ_1234");

        write_bag(
            &acq.join("ACQ_1234_001").join(IMAGES_DIR),
            "Bagging-Date: 2023-05-01\nPayload-Oxum: 2048.2\n",
        );
        write_bag(
            &acq.join("ACQ_1234_001").join(OBJECTS_DIR),
            "Bagging-Date: 2023-05-03\nPayload-Oxum: 512.10\n",
        );
        write_bag(
            &acq.join("ACQ_1234_002").join(OBJECTS_DIR),
            "Bagging-Date: 2023-06-01\nPayload-Oxum: 100.4\n",
        );
        fs::create_dir_all(acq.join("ACQ_1234_003").join("other")).unwrap();

        tmp
    }

    #[test]
    fn test_parse_oxum() {
        assert_eq!(parse_oxum(" 2048.2"), Some((2048, 2)));
        assert_eq!(parse_oxum("2048"), None);
        assert_eq!(parse_oxum("a.b"), None);
    }

    #[test]
    fn test_read_bag_stats() {
        let tmp = acquisition();
        let mut review = ReviewLog::new();
        let stats = read_bag_stats(&tmp.path().join("ACQ_1234/ACQ_1234_001/images"), &mut review)
            .unwrap()
            .unwrap();

        assert_eq!(stats.date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        assert_eq!(stats.files, 2);
        assert_eq!(stats.size, 2048);
        assert!(review.is_empty());
    }

    #[test]
    fn test_warn_on_invalid_bag() {
        let tmp = TempDir::new().unwrap();
        let mut review = ReviewLog::new();
        assert!(read_bag_stats(tmp.path(), &mut review).unwrap().is_none());
        assert!(review.contains("Directory should be formatted as a bag"));
    }

    #[test]
    fn test_warn_on_missing_date_in_bag() {
        let tmp = TempDir::new().unwrap();
        write_bag(tmp.path(), "Bag-Size: 1234\nPayload-Oxum: 1.1\n");
        let mut review = ReviewLog::new();
        assert!(read_bag_stats(tmp.path(), &mut review).unwrap().is_none());
        assert!(review.contains("Bagging date not found in"));
    }

    #[test]
    fn test_warn_on_missing_size_in_bag() {
        let tmp = TempDir::new().unwrap();
        write_bag(tmp.path(), "Bagging-Date: 2023-05-01\n");
        let mut review = ReviewLog::new();
        assert!(read_bag_stats(tmp.path(), &mut review).unwrap().is_none());
        assert!(review.contains("Bagging size or files not found in"));
    }

    #[test]
    fn test_collect_stats_prefers_image_date() {
        let tmp = acquisition();
        let mut review = ReviewLog::new();
        let stats = collect_stats(&tmp.path().join("ACQ_1234/ACQ_1234_001"), &mut review)
            .unwrap()
            .unwrap();

        assert_eq!(stats.acquisition_id, "ACQ_1234");
        assert_eq!(stats.object_id, "001");
        assert_eq!(stats.date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        assert_eq!((stats.image_files, stats.image_size), (2, 2048));
        assert_eq!((stats.object_files, stats.object_size), (10, 512));
    }

    #[test]
    fn test_collect_acquisition() {
        let tmp = acquisition();
        let mut review = ReviewLog::new();
        let stats = collect_acquisition(tmp.path(), "ACQ_1234", &mut review).unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].object_id, "002");
        assert_eq!((stats[1].image_files, stats[1].image_size), (0, 0));
        assert!(review.contains("No stats found for"));
        assert!(review.contains("ACQ_1234_003"));
    }

    #[test]
    fn test_missing_acquisition_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = collect_acquisition(tmp.path(), "ACQ_9999", &mut ReviewLog::new()).unwrap_err();
        assert!(matches!(err, ExtentError::InvalidInput(_)));
    }

    #[test]
    fn test_write_stats() {
        let tmp = acquisition();
        let mut review = ReviewLog::new();
        let stats = collect_acquisition(tmp.path(), "ACQ_1234", &mut review).unwrap();

        let path = write_stats(&stats, tmp.path(), "ACQ_1234").unwrap();
        assert_eq!(path.file_name().unwrap(), "ACQ_1234_transfer_report.txt");

        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "acquisition_id,object_id,date,image_files,image_size,object_files,object_size");
        assert_eq!(lines[1], "ACQ_1234,001,2023-05-01,2,2048,10,512");
        assert_eq!(lines[2], "ACQ_1234,002,2023-06-01,0,0,4,100");
        assert_eq!(lines.len(), 3);
    }
}
