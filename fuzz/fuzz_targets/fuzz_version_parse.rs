//! Version and commit-subject parsing on arbitrary text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use xlr8_version::{Bump, ChangeLog, Version, classify_subject, next_version};

const MAX_INPUT_SIZE: usize = 4 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let s = String::from_utf8_lossy(data);

    if let Ok(version) = s.parse::<Version>() {
        assert_eq!(version.to_string().parse::<Version>(), Ok(version));
        match version.bump(Bump::Patch) {
            Ok(next) => assert!(next > version),
            Err(_) => assert_eq!(version.patch, u64::MAX),
        }
    }

    let subjects: Vec<&str> = s.lines().collect();
    for subject in &subjects {
        let _ = classify_subject(subject);
    }

    let next = next_version(Version::new(1, 0, 0), &subjects).unwrap_or_default();
    let log = ChangeLog::from_subjects(next, &subjects);
    assert!(log.lines()[0].starts_with("Version "));
});
