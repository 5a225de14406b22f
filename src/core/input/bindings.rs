//=========================================================================
// Bindings
//=========================================================================
//
// Action → input-name table, loaded from JSON.
//
// ```json
// { "up": ["keyboard:up", "keyboard:w"], "pause": ["keyboard:escape"] }
// ```
//
// Input names are `<device>:<input>`. Keyboard and mouse names resolve
// to a `KeyCode`/`MouseButton`; gamepad names are understood but have
// no backing device yet.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, MouseButton};

//=== Built-in Table ======================================================

const BUILTIN_BINDINGS: &str = include_str!("../../../assets/bindings.json");

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read bindings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bindings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown input name {0:?}")]
    UnknownInput(String),
}

//=== InputName ===========================================================

/// A parsed input name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputName {
    Key(KeyCode),
    Mouse(MouseButton),

    /// Accepted for forward compatibility; always reads as released.
    Gamepad(String),
}

impl InputName {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let unknown = || ConfigError::UnknownInput(name.to_owned());

        let (device, input) = name.split_once(':').ok_or_else(unknown)?;
        match device {
            "keyboard" => KeyCode::from_name(input).map(Self::Key).ok_or_else(unknown),
            "mouse" => MouseButton::from_name(input).map(Self::Mouse).ok_or_else(unknown),
            "gamepad" if !input.is_empty() => Ok(Self::Gamepad(input.to_owned())),
            _ => Err(unknown()),
        }
    }
}

//=== BindingMap ==========================================================

/// Maps action names to the input names that drive them.
///
/// Inputs listed later win ties: an action reads the last non-zero value
/// among its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingMap(BTreeMap<String, Vec<String>>);

impl BindingMap {
    /// Reads a JSON binding table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The table shipped with the demo.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_BINDINGS).unwrap_or_else(|err| {
            error!("Built-in bindings are malformed: {}", err);
            Self::default()
        })
    }

    pub fn bind(&mut self, action: &str, inputs: &[&str]) -> &mut Self {
        self.0
            .insert(action.to_owned(), inputs.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    pub fn inputs(&self, action: &str) -> Option<&[String]> {
        self.0.get(action).map(Vec::as_slice)
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(action, inputs)| (action.as_str(), inputs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    //=== Input Names =====================================================

    #[test]
    fn input_names_parse_by_device() {
        assert_eq!(InputName::parse("keyboard:a").unwrap(), InputName::Key(KeyCode::KeyA));
        assert_eq!(
            InputName::parse("mouse:right").unwrap(),
            InputName::Mouse(MouseButton::Right)
        );
        assert_eq!(
            InputName::parse("gamepad:start").unwrap(),
            InputName::Gamepad("start".into())
        );
    }

    #[test]
    fn malformed_input_names_are_errors() {
        for name in ["keyboard", "keyboard:f99", "mouse:extra1", "gamepad:", "joystick:x"] {
            let err = InputName::parse(name).unwrap_err();
            assert!(
                matches!(err, ConfigError::UnknownInput(ref n) if n == name),
                "{:?} should be rejected, got {:?}",
                name,
                err
            );
        }
    }

    //=== Loading =========================================================

    #[test]
    fn builtin_table_is_valid() {
        let bindings = BindingMap::builtin();
        assert!(!bindings.is_empty(), "embedded bindings failed to parse");

        for action in ["up", "down", "left", "right", "pause"] {
            assert!(bindings.inputs(action).is_some(), "missing action {:?}", action);
        }
        for (_, inputs) in bindings.iter() {
            for input in inputs {
                assert!(InputName::parse(input).is_ok(), "bad input {:?}", input);
            }
        }
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jump": ["keyboard:space", "mouse:left"]}}"#).unwrap();

        let bindings = BindingMap::load(file.path()).unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.inputs("jump").unwrap(),
            ["keyboard:space".to_string(), "mouse:left".to_string()]
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BindingMap::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got {:?}", err);
    }

    #[test]
    fn load_reports_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jump": "keyboard:space"}}"#).unwrap();

        let err = BindingMap::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn bind_builds_table_in_code() {
        let mut bindings = BindingMap::default();
        bindings.bind("fire", &["keyboard:f"]).bind("jump", &["keyboard:space"]);

        assert_eq!(bindings.actions().collect::<Vec<_>>(), vec!["fire", "jump"]);
    }
}
