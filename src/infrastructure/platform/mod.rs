//! Platform-specific locations of the application under test.
//!
//! Resolves where the packaged build puts the executable and where the app
//! keeps its per-user state, and turns that into a [`LaunchConfig`] after
//! wiping the stale state from a previous run.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::errors::PlatformError;
use crate::domain::models::{AppConfig, AppTestingPaths, LaunchConfig};

/// Resolve testing paths for `os` (as in [`std::env::consts::OS`]).
///
/// `env` looks up environment variables; empty values count as unset.
pub fn app_testing_paths<F>(os: &str, app: &AppConfig, env: F) -> Result<AppTestingPaths, PlatformError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &'static str| env(key).filter(|v| !v.is_empty());

    match os {
        "windows" => Ok(AppTestingPaths {
            testing_path: PathBuf::from(format!("./dist/win-unpacked/{}.exe", app.name)),
            library_path: PathBuf::from(var("APPDATA").ok_or(PlatformError::MissingEnv("APPDATA"))?)
                .join(&app.name),
        }),
        "linux" => {
            let config_home = match var("XDG_CONFIG_HOME") {
                Some(dir) => PathBuf::from(dir),
                None => {
                    PathBuf::from(var("HOME").ok_or(PlatformError::MissingEnv("HOME"))?)
                        .join(".config")
                }
            };
            Ok(AppTestingPaths {
                testing_path: Path::new("./dist/linux-unpacked").join(&app.linux_binary),
                library_path: config_home.join(&app.name),
            })
        }
        "macos" => Ok(AppTestingPaths {
            testing_path: PathBuf::from(format!(
                "./dist/mac/{name}.app/Contents/MacOS/{name}",
                name = app.name
            )),
            library_path: PathBuf::from(var("HOME").ok_or(PlatformError::MissingEnv("HOME"))?)
                .join("Library/Application Support")
                .join(&app.name),
        }),
        other => Err(PlatformError::Unsupported(other.to_string())),
    }
}

/// Testing paths for the platform this binary runs on.
pub fn current_app_testing_paths(app: &AppConfig) -> Result<AppTestingPaths, PlatformError> {
    app_testing_paths(std::env::consts::OS, app, |key| std::env::var(key).ok())
}

/// Build the launch description for already-resolved paths.
pub fn build_launch_config(app: &AppConfig, paths: &AppTestingPaths) -> LaunchConfig {
    LaunchConfig {
        executable_path: app
            .executable_override
            .clone()
            .unwrap_or_else(|| paths.testing_path.clone()),
        args: app.args.clone(),
        startup_timeout_ms: app.startup_timeout_ms,
        ready_timeout_ms: app.ready_timeout_ms,
        env: app.env.clone(),
    }
}

/// Remove the app's per-user state directory; a missing directory is fine.
pub fn remove_library(path: &Path) -> Result<(), PlatformError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            info!(path = %path.display(), "Removed previous application config");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No previous application config");
            Ok(())
        }
        Err(e) => Err(PlatformError::RemoveLibrary {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

/// Resolve paths, wipe old app state and return the launch description.
pub fn prepare_launch(app: &AppConfig) -> Result<LaunchConfig, PlatformError> {
    let paths = current_app_testing_paths(app)?;
    remove_library(&paths.library_path)?;
    Ok(build_launch_config(app, &paths))
}

/// Like [`prepare_launch`] but leaves existing app state in place.
pub fn prepare_launch_keep_library(app: &AppConfig) -> Result<LaunchConfig, PlatformError> {
    let paths = current_app_testing_paths(app)?;
    Ok(build_launch_config(app, &paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_linux_prefers_xdg_config_home() {
        let paths = app_testing_paths(
            "linux",
            &AppConfig::default(),
            env_of(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/ci")]),
        )
        .unwrap();
        assert_eq!(paths.testing_path, PathBuf::from("./dist/linux-unpacked/kontena-lens"));
        assert_eq!(paths.library_path, PathBuf::from("/xdg/Lens"));
    }

    #[test]
    fn test_linux_falls_back_to_home_config() {
        let paths = app_testing_paths(
            "linux",
            &AppConfig::default(),
            env_of(&[("XDG_CONFIG_HOME", ""), ("HOME", "/home/ci")]),
        )
        .unwrap();
        assert_eq!(paths.library_path, PathBuf::from("/home/ci/.config/Lens"));
    }

    #[test]
    fn test_macos_and_windows_paths() {
        let app = AppConfig::default();

        let mac = app_testing_paths("macos", &app, env_of(&[("HOME", "/Users/ci")])).unwrap();
        assert_eq!(mac.testing_path, PathBuf::from("./dist/mac/Lens.app/Contents/MacOS/Lens"));
        assert_eq!(
            mac.library_path,
            PathBuf::from("/Users/ci/Library/Application Support/Lens")
        );

        let win = app_testing_paths("windows", &app, env_of(&[("APPDATA", "C:/Users/ci/AppData")]))
            .unwrap();
        assert_eq!(win.testing_path, PathBuf::from("./dist/win-unpacked/Lens.exe"));
        assert_eq!(win.library_path, PathBuf::from("C:/Users/ci/AppData").join("Lens"));
    }

    #[test]
    fn test_unsupported_and_missing_env() {
        let app = AppConfig::default();
        assert!(matches!(
            app_testing_paths("freebsd", &app, env_of(&[])),
            Err(PlatformError::Unsupported(os)) if os == "freebsd"
        ));
        assert!(matches!(
            app_testing_paths("linux", &app, env_of(&[])),
            Err(PlatformError::MissingEnv("HOME"))
        ));
        assert!(matches!(
            app_testing_paths("windows", &app, env_of(&[])),
            Err(PlatformError::MissingEnv("APPDATA"))
        ));
    }

    #[test]
    fn test_build_launch_config_defaults_and_override() {
        let paths = AppTestingPaths {
            testing_path: PathBuf::from("./dist/linux-unpacked/kontena-lens"),
            library_path: PathBuf::from("/tmp/Lens"),
        };

        let config = build_launch_config(&AppConfig::default(), &paths);
        assert_eq!(config.executable_path, paths.testing_path);
        assert!(config.args.is_empty());
        assert_eq!(config.startup_timeout_ms, 30_000);
        assert_eq!(config.ready_timeout_ms, 60_000);
        assert_eq!(config.env.get("CICD").map(String::as_str), Some("true"));

        let app = AppConfig {
            executable_override: Some(PathBuf::from("/opt/lens/lens")),
            ..AppConfig::default()
        };
        assert_eq!(
            build_launch_config(&app, &paths).executable_path,
            PathBuf::from("/opt/lens/lens")
        );
    }

    #[test]
    fn test_remove_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("Lens");
        std::fs::create_dir_all(library.join("extensions")).unwrap();
        std::fs::write(library.join("lens-user-store.json"), "{}").unwrap();

        remove_library(&library).unwrap();
        assert!(!library.exists());

        // second removal finds nothing and still succeeds
        remove_library(&library).unwrap();
    }
}
