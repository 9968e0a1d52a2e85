//! Test utilities for the wingrate crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls. These helpers wrap
    //! `cap_std::fs::Dir` so test suites can write store snapshots and read
    //! them back with the same access policy as the adapters.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wingrate::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("wingrate-cap-fs-read-example.txt");
    /// write_file(&path, b"hello\n")?;
    ///
    /// let content = read_file_to_string(&path)?;
    /// assert_eq!(content, "hello\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod clock {
    //! Deterministic clocks.

    use std::sync::Arc;

    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use mockable::Clock;

    /// Clock frozen at a fixed instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl FixtureClock {
        /// Freeze the clock at noon UTC on `date`.
        pub fn on(date: NaiveDate) -> Self {
            let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
            Self {
                utc_now: Utc.from_utc_datetime(&noon),
            }
        }

        /// Shared handle for service constructors.
        pub fn shared(self) -> Arc<dyn Clock> {
            Arc::new(self)
        }
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }
}

pub mod reviews {
    //! Builders for published reviews and their inputs.

    use chrono::NaiveDate;

    use crate::domain::{
        BasicInfoInput, LocationId, NewReview, RawCoordinates, Review, ReviewDraft, ReviewId,
        validate_basic_info,
    };

    /// Basic Info for the Wing Shack at 123 Main St, visited 2024-01-01.
    pub fn wing_shack_basic_info() -> BasicInfoInput {
        BasicInfoInput {
            restaurant_name: "Wing Shack".to_owned(),
            address: "123 Main St".to_owned(),
            date_visited: "2024-01-01".to_owned(),
            website_url: None,
            coordinates: Some(RawCoordinates {
                latitude: 40.0,
                longitude: -75.0,
            }),
        }
    }

    /// Date against which fixture visits are validated.
    pub fn fixture_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
    }

    /// A published Wing Shack review by `author` at location `1`, empty tally.
    ///
    /// # Panics
    ///
    /// Panics if the fixture Basic Info stops validating.
    pub fn published_review(id: i64) -> Review {
        published_review_at(id, 1)
    }

    /// Like [`published_review`], filed under `location_id`.
    ///
    /// # Panics
    ///
    /// Panics if the fixture Basic Info stops validating.
    pub fn published_review_at(id: i64, location_id: i64) -> Review {
        Review::from_new(ReviewId::new(id), review_content(location_id))
    }

    /// Publishable Wing Shack review content by `author` at `location_id`.
    ///
    /// # Panics
    ///
    /// Panics if the fixture Basic Info stops validating.
    pub fn review_content(location_id: i64) -> NewReview {
        let info = validate_basic_info(&wing_shack_basic_info(), fixture_today())
            .unwrap_or_else(|err| panic!("fixture basic info must validate: {err}"));
        ReviewDraft::start(info)
            .publish(LocationId::new(location_id), "author", "Crispy and hot", "A")
            .unwrap_or_else(|err| panic!("fixture draft must publish: {err}"))
    }
}

pub mod snapshots {
    //! Store snapshot files in throwaway directories.

    use std::io;
    use std::path::PathBuf;

    use serde_json::Value;
    use tempfile::TempDir;

    use super::cap_fs::write_file;

    /// Write `document` as `store.json` in a fresh temporary directory.
    ///
    /// The directory is removed when the returned guard drops.
    pub fn snapshot_file(document: &Value) -> io::Result<(TempDir, PathBuf)> {
        let dir = TempDir::new()?;
        let path = dir.path().join("store.json");
        write_file(&path, document.to_string().as_bytes())?;
        Ok((dir, path))
    }
}
