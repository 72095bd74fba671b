use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_base(&self, content: &str) {
        let path = self.root.path().join("skystack.json");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_extra(&self, name: &str, content: &str) {
        fs::write(self.root.path().join(name), content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_stage_context(&self, stage: &str, content: &str) {
        let dir = self.root.path().join("stages");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{stage}.json")), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}
