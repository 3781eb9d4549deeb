use assert_cmd::Command;
use famfin_config::{Config, ConfigManager};
use tempfile::TempDir;

/// A fixed "today": 6 Ordibehesht 1403.
pub const TODAY: &str = "2024-04-25";

/// Runs the `famfin` binary against an isolated home directory.
pub struct CliHarness {
    home: TempDir,
}

impl CliHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A harness whose config selects English labels and ASCII digits.
    pub fn english() -> Self {
        let harness = Self::new();
        let manager =
            ConfigManager::with_base_dir(harness.home.path().to_path_buf()).expect("config manager");
        let config = Config {
            locale: "en".into(),
            ..Config::default()
        };
        manager.save(&config).expect("save config");
        harness
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("famfin").expect("binary exists");
        cmd.env("FAMFIN_HOME", self.home.path())
            .env("FAMFIN_TODAY", TODAY)
            .env("RUST_LOG", "off")
            .args(args);
        cmd
    }

    /// Runs a command that must succeed and returns its stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.command(args).output().expect("run CLI");
        if !output.status.success() {
            panic!(
                "famfin {:?} failed: status={}\nstdout:\n{}\nstderr:\n{}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn home(&self) -> &std::path::Path {
        self.home.path()
    }
}
