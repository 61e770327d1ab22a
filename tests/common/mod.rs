use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const LIBRARY_JSON: &str = r#"{
    "songs": [
        {"title": "Paranoid Android", "album": "OK Computer", "album_artist": "Radiohead", "disc_number": 1, "track": 2, "duration_secs": 387},
        {"title": "Airbag", "album": "OK Computer", "album_artist": "Radiohead", "disc_number": 1, "track": 1, "duration_secs": 284},
        {"title": "Creep", "album": "Pablo Honey", "album_artist": "Radiohead", "disc_number": 1, "track": 2, "duration_secs": 238},
        {"title": "Wish You Were Here", "album": "Wish You Were Here", "album_artist": "Pink Floyd", "track": "4", "duration_secs": 334},
        {"title": "Paint It Black", "album": "Aftermath", "album_artist": "The Rolling Stones", "track": 1, "duration_secs": 224},
        {"title": "Angie", "album": "Goats Head Soup", "album_artist": "Rolling Stones, The", "track": 6, "duration_secs": 272},
        {"title": "Hoppípolla", "album": "Takk...", "album_artist": "Sigur Rós", "track": 3, "duration_secs": 268}
    ]
}"#;

/// Isolated directory holding a library file and a config file
pub struct TestContext {
    pub temp_dir: TempDir,
    pub library_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let library_path = temp_dir.path().join("library.json");
        let config_path = temp_dir.path().join("config.json");

        fs::write(&library_path, LIBRARY_JSON).expect("Failed to write library");
        let config = serde_json::json!({
            "library_path": library_path.to_string_lossy(),
            "log_level": "WARN",
        });
        fs::write(&config_path, config.to_string()).expect("Failed to write config");

        TestContext {
            temp_dir,
            library_path,
            config_path,
        }
    }

    /// Run the songkey binary against this context's config
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_songkey"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run songkey")
    }

    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "songkey {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is utf-8")
    }
}
