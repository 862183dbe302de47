//! Synthetic payload fixtures
//!
//! The run driver feeds the workflow a pre-extracted resume and a job
//! description read from plain-text files. A missing fixture aborts the
//! run; nothing downstream is meaningful without the payload.

use std::path::Path;

use crate::common::{Error, Result};

/// Text payloads for one execution
#[derive(Debug)]
pub struct Fixtures {
    pub resume_text: String,
    pub job_description: String,
}

/// Load both fixture files from `dir`
pub fn load(dir: &Path) -> Result<Fixtures> {
    Ok(Fixtures {
        resume_text: read_fixture(&dir.join("sample_resume.txt"))?,
        job_description: read_fixture(&dir.join("sample_job_description.txt"))?,
    })
}

fn read_fixture(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FixtureMissing {
            path: path.display().to_string(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fixture_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(Error::FixtureMissing { .. })
        ));
    }

    #[test]
    fn loads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sample_resume.txt"), "resume body").unwrap();
        std::fs::write(dir.path().join("sample_job_description.txt"), "jd body").unwrap();
        let fixtures = load(dir.path()).unwrap();
        assert_eq!(fixtures.resume_text, "resume body");
        assert_eq!(fixtures.job_description, "jd body");
    }
}
