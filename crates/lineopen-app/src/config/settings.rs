//! Settings parser for config.toml and editor detection

use super::types::{EditorSettings, Settings};
use crate::editor::EditorError;
use lineopen_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "line-opener";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "LINEOPEN_CONFIG";

// ─────────────────────────────────────────────────────────────────────────────
// Editor Presets
// ─────────────────────────────────────────────────────────────────────────────

/// Known editor with its command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPreset {
    /// Preset name used in `editor.preset`
    pub name: &'static str,
    /// Executable stems that identify this editor in $VISUAL / $EDITOR
    pub executables: &'static [&'static str],
    pub template: &'static str,
    pub display_name: &'static str,
}

/// List of known editors with their file/line templates.
pub const KNOWN_EDITORS: &[EditorPreset] = &[
    EditorPreset {
        name: "source-insight",
        executables: &["sourceinsight4", "insight3"],
        template: r#""C:\Program Files (x86)\Source Insight 4.0\sourceinsight4.exe" +{line} "{source}""#,
        display_name: "Source Insight",
    },
    EditorPreset {
        name: "notepad++",
        executables: &["notepad++"],
        template: r#""C:\Program Files (x86)\Notepad++\notepad++.exe" "{source}" -n{line}"#,
        display_name: "Notepad++",
    },
    EditorPreset {
        name: "nvim",
        executables: &["nvim"],
        template: r#"nvim +{line} "{source}""#,
        display_name: "Neovim",
    },
    EditorPreset {
        name: "vim",
        executables: &["vim", "gvim", "vi"],
        template: r#"vim +{line} "{source}""#,
        display_name: "Vim",
    },
    EditorPreset {
        name: "emacs",
        executables: &["emacs", "emacsclient"],
        template: r#"emacs +{line} "{source}""#,
        display_name: "Emacs",
    },
    EditorPreset {
        name: "code",
        executables: &["code"],
        template: r#"code --reuse-window --goto "{source}:{line}""#,
        display_name: "Visual Studio Code",
    },
    EditorPreset {
        name: "subl",
        executables: &["subl", "sublime_text"],
        template: r#"subl "{source}:{line}""#,
        display_name: "Sublime Text",
    },
    EditorPreset {
        name: "zed",
        executables: &["zed"],
        template: r#"zed "{source}:{line}""#,
        display_name: "Zed",
    },
];

/// Find a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static EditorPreset> {
    KNOWN_EDITORS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Find a preset by the executable an editor variable points to.
///
/// `/usr/bin/nvim`, `nvim -p` and `C:\Tools\notepad++.exe` are all accepted.
pub fn find_preset_for_executable(editor: &str) -> Option<&'static EditorPreset> {
    let program = editor.split_whitespace().next()?;
    let file_name = program.rsplit(|c: char| c == '/' || c == '\\').next()?;
    let stem = file_name
        .strip_suffix(".exe")
        .or_else(|| file_name.strip_suffix(".EXE"))
        .unwrap_or(file_name);

    KNOWN_EDITORS
        .iter()
        .find(|p| p.executables.iter().any(|e| e.eq_ignore_ascii_case(stem)))
}

/// Detect the user's preferred editor from $VISUAL, then $EDITOR.
///
/// `lookup` reads an environment variable.
pub fn detect_editor<F>(lookup: F) -> Option<&'static EditorPreset>
where
    F: Fn(&str) -> Option<String>,
{
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(|var| lookup(var))
        .find_map(|editor| find_preset_for_executable(&editor))
}

// ─────────────────────────────────────────────────────────────────────────────
// EditorSettings Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl EditorSettings {
    /// Resolve the effective command template from the process environment.
    pub fn resolve(&self) -> std::result::Result<String, EditorError> {
        self.resolve_with(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
    }

    /// Resolve the effective command template.
    ///
    /// Priority order:
    /// 1. Explicitly configured command template
    /// 2. Configured preset
    /// 3. $VISUAL / $EDITOR matched to a known editor
    pub fn resolve_with<F>(&self, lookup: F) -> std::result::Result<String, EditorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command) = self.command.as_deref().filter(|c| !c.trim().is_empty()) {
            return Ok(command.to_string());
        }

        if let Some(name) = self.preset.as_deref() {
            return find_preset(name)
                .map(|p| p.template.to_string())
                .ok_or_else(|| EditorError::UnknownPreset(name.to_string()));
        }

        detect_editor(lookup)
            .map(|p| {
                debug!("Detected editor from environment: {}", p.display_name);
                p.template.to_string()
            })
            .ok_or(EditorError::NoEditor)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Location of the config file: `$LINEOPEN_CONFIG`, else
/// `<config dir>/line-opener/config.toml`.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Read and parse a settings file.
pub fn read_settings(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        return Err(Error::config_not_found(config_path));
    }

    let content = std::fs::read_to_string(config_path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", config_path.display(), e)))
}

/// Load settings from `config_path`.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    match read_settings(config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(Error::ConfigNotFound { path }) => {
            debug!("No config file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));

        assert_eq!(settings.paths.base_dir, PathBuf::from("."));
        assert!(settings.paths.workspace.is_none());
        assert!(settings.editor.command.is_none());
        assert!(settings.editor.preset.is_none());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");

        let config = r#"
[paths]
workspace = "/ws"
base_dir = "fw/bin/dummy"

[editor]
command = 'vim +{line} "{source}"'
"#;
        std::fs::write(&path, config).unwrap();

        let settings = load_settings(&path);

        assert_eq!(settings.paths.workspace, Some(PathBuf::from("/ws")));
        assert_eq!(
            settings.paths.effective_base_dir(),
            PathBuf::from("/ws").join("fw/bin/dummy")
        );
        assert_eq!(
            settings.editor.command.as_deref(),
            Some(r#"vim +{line} "{source}""#)
        );
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        // Should return defaults
        let settings = load_settings(&path);
        assert!(settings.editor.command.is_none());
    }

    #[test]
    fn test_read_settings_reports_errors() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(matches!(
            read_settings(&missing),
            Err(Error::ConfigNotFound { .. })
        ));

        let invalid = temp.path().join("invalid.toml");
        std::fs::write(&invalid, "[paths\n").unwrap();
        assert!(matches!(read_settings(&invalid), Err(Error::Config { .. })));
    }

    #[test]
    fn test_effective_base_dir_without_workspace() {
        let settings: Settings = toml::from_str("[paths]\nbase_dir = \"/abs/out\"").unwrap();
        assert_eq!(settings.paths.effective_base_dir(), PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_editor_settings_deserialize_partial() {
        let settings: Settings = toml::from_str("[editor]\npreset = \"notepad++\"").unwrap();
        assert_eq!(settings.editor.preset.as_deref(), Some("notepad++"));
        assert!(settings.editor.command.is_none());
    }

    #[test]
    fn test_resolve_command_wins_over_preset() {
        let settings = EditorSettings {
            preset: Some("vim".to_string()),
            command: Some("myedit {source}".to_string()),
        };
        assert_eq!(settings.resolve_with(no_env).unwrap(), "myedit {source}");
    }

    #[test]
    fn test_resolve_blank_command_falls_through() {
        let settings = EditorSettings {
            preset: Some("zed".to_string()),
            command: Some("  ".to_string()),
        };
        assert_eq!(
            settings.resolve_with(no_env).unwrap(),
            r#"zed "{source}:{line}""#
        );
    }

    #[test]
    fn test_resolve_preset() {
        let settings = EditorSettings {
            preset: Some("Source-Insight".to_string()),
            command: None,
        };
        let template = settings.resolve_with(no_env).unwrap();
        assert!(template.contains("sourceinsight4.exe"));
        assert!(template.ends_with(r#"+{line} "{source}""#));
    }

    #[test]
    fn test_resolve_unknown_preset() {
        let settings = EditorSettings {
            preset: Some("ed".to_string()),
            command: None,
        };
        assert!(matches!(
            settings.resolve_with(no_env),
            Err(EditorError::UnknownPreset(name)) if name == "ed"
        ));
    }

    #[test]
    fn test_resolve_from_environment() {
        let settings = EditorSettings::default();

        let template = settings
            .resolve_with(|var| (var == "EDITOR").then(|| "/usr/bin/nvim".to_string()))
            .unwrap();
        assert_eq!(template, r#"nvim +{line} "{source}""#);
    }

    #[test]
    fn test_resolve_visual_before_editor() {
        let settings = EditorSettings::default();

        let template = settings
            .resolve_with(|var| match var {
                "VISUAL" => Some("code --wait".to_string()),
                "EDITOR" => Some("vim".to_string()),
                _ => None,
            })
            .unwrap();
        assert!(template.starts_with("code "));
    }

    #[test]
    fn test_resolve_unrecognized_environment_editor() {
        let settings = EditorSettings::default();
        let result = settings.resolve_with(|_| Some("nano".to_string()));
        assert!(matches!(result, Err(EditorError::NoEditor)));
    }

    #[test]
    fn test_find_preset_for_executable() {
        assert_eq!(find_preset_for_executable("vim").unwrap().name, "vim");
        assert_eq!(find_preset_for_executable("/usr/bin/nvim").unwrap().name, "nvim");
        assert_eq!(
            find_preset_for_executable(r"C:\Tools\notepad++.exe").unwrap().name,
            "notepad++"
        );
        assert_eq!(find_preset_for_executable("emacsclient -t").unwrap().name, "emacs");
        assert!(find_preset_for_executable("").is_none());
    }

    #[test]
    fn test_known_editors_templates_parse() {
        for preset in KNOWN_EDITORS {
            assert!(
                crate::editor::CommandTemplate::parse(preset.template).is_ok(),
                "preset {} has an invalid template",
                preset.name
            );
        }
    }

    #[test]
    fn test_known_editor_names_unique() {
        for (i, a) in KNOWN_EDITORS.iter().enumerate() {
            for b in &KNOWN_EDITORS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
