//! Test environment builder for isolated siteship testing.
//!
//! Provides `TestEnv` - a temp project directory (holding the content root,
//! the destination store and `siteship.toml`) plus an isolated home so no
//! user config leaks in, and helpers to run the siteship binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running a siteship CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON line {l:?}: {e}"))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path of an object in the default destination (`dist/`)
    pub fn object_path(&self, key: &str) -> PathBuf {
        self.project_path("dist").join(key)
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute siteship");
        output_to_result(output)
    }

    /// Run with `stdin` piped in
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn siteship");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");
        let output = child.wait_with_output().expect("Failed to wait on siteship");
        output_to_result(output)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("SITESHIP_CONTENT_ROOT")
            .env_remove("SITESHIP_DESTINATION")
            .env_remove("SITESHIP_KEY_PREFIX")
            .env_remove("SITESHIP_LONG_CACHE_EXTENSIONS")
            .env_remove("SITESHIP_VERBOSITY");
        cmd
    }

    pub fn write_site_file(&self, relative_path: &str, content: &str) {
        self.write_project_file(&format!("public/{}", relative_path), content);
    }

    pub fn remove_site_file(&self, relative_path: &str) {
        let path = self.project_path(&format!("public/{}", relative_path));
        std::fs::remove_file(&path).expect("Failed to remove site file");
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read the destination's object index
    pub fn read_index(&self) -> toml::Value {
        let content = std::fs::read_to_string(self.object_path(".siteship/objects.toml"))
            .expect("Failed to read object index");
        toml::from_str(&content).expect("Object index is not TOML")
    }

    /// Cache-Control recorded for an object key
    pub fn cache_control(&self, key: &str) -> Option<String> {
        self.read_index()
            .get("objects")?
            .get(key)?
            .get("cache_control")?
            .as_str()
            .map(str::to_string)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    site_files: Vec<(String, String)>,
    project_config: Option<String>,
    user_config: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            site_files: Vec::new(),
            project_config: None,
            user_config: None,
        }
    }

    /// Add a file under the content root (`public/`)
    pub fn with_site_file(mut self, path: &str, content: &str) -> Self {
        self.site_files.push((path.to_string(), content.to_string()));
        self
    }

    pub fn with_site(mut self, files: &[(&str, &str)]) -> Self {
        self.site_files
            .extend(files.iter().map(|(p, c)| (p.to_string(), c.to_string())));
        self
    }

    /// Set `siteship.toml` content
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    /// Set user config (`$XDG_CONFIG_HOME/siteship/config.toml`)
    pub fn with_user_config(mut self, toml: &str) -> Self {
        self.user_config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_siteship")),
        };

        std::fs::create_dir_all(env.project_path("public")).expect("Failed to create public/");
        for (path, content) in &self.site_files {
            env.write_site_file(path, content);
        }
        if let Some(config) = &self.project_config {
            env.write_project_file("siteship.toml", config);
        }
        if let Some(config) = &self.user_config {
            let path = env.home_dir.path().join(".config/siteship/config.toml");
            write_file(&path, config);
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
