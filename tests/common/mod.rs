#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");

        Self {
            _tmp: tmp,
            home,
            work,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("grossmass");
        cmd.env("HOME", &self.home)
            .env_remove("GROSSMASS_CONFIG")
            .env_remove("GROSSMASS_LOG");
        cmd
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.work.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.home.join(".config/grossmass");
        fs::create_dir_all(&dir).expect("create config dir");
        let path = dir.join("config.toml");
        fs::write(&path, contents).expect("write config");
        path
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.work.join(name)).expect("read output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf8 path")
}
