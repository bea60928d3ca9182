use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use quick_xml::{events::Event, Reader};
use serde::Deserialize;

use crate::{
    runtime_paths, LaunchError, LauncherConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE,
    DEFAULT_MODE_ENV_VAR,
};

const FIELD_MODE: &str = "mode";
const FIELD_MODE_VAR: &str = "modevar";
const FIELD_NODE_PATH: &str = "nodepath";
const FIELD_APP_DIR: &str = "appdir";
const FIELD_APP_START: &str = "appstart";
const FIELD_MINIMIZE: &str = "minimize";
const FIELD_ALLOW_OVERRIDES: &str = "allowoverrides";
const FIELD_DEFAULT_APPS: &str = "defaultapps";

type ConfigFields = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFlag {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonEntryList {
    Items(Vec<String>),
    Joined(String),
}

#[derive(Debug, Deserialize)]
struct JsonConfig {
    mode: Option<String>,
    modevar: Option<String>,
    nodepath: Option<String>,
    appdir: Option<String>,
    appstart: Option<String>,
    minimize: Option<JsonFlag>,
    allowoverrides: Option<JsonFlag>,
    defaultapps: Option<JsonEntryList>,
}

pub(crate) fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub(crate) fn load_config(path: &Path) -> Result<LauncherConfig, LaunchError> {
    let text = fs::read_to_string(path).map_err(|error| {
        LaunchError::configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            error
        ))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let fields = if is_json {
        parse_json_fields(&text)
    } else {
        parse_xml_fields(&text)
    }
    .map_err(|error| {
        LaunchError::configuration(format!(
            "Failed to parse configuration file {}: {}",
            path.display(),
            error
        ))
    })?;

    let config = config_from_fields(&fields)?;
    tracing::debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

/// Collects the text of every direct child of the root element.
fn parse_xml_fields(text: &str) -> Result<ConfigFields, String> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut fields = ConfigFields::new();
    let mut depth = 0_usize;
    let mut seen_root = false;
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                if depth == 0 && seen_root {
                    return Err("multiple root elements".to_string());
                }
                depth += 1;
                seen_root = true;
                if depth == 2 {
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).to_string();
                    current = Some((name, String::new()));
                }
            }
            Ok(Event::Empty(element)) => {
                if depth == 0 {
                    if seen_root {
                        return Err("multiple root elements".to_string());
                    }
                    seen_root = true;
                } else if depth == 1 {
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).to_string();
                    fields.entry(name).or_default();
                }
            }
            Ok(Event::Text(content)) => {
                if let Some((_, value)) = current.as_mut() {
                    let unescaped = content
                        .unescape()
                        .map_err(|error| format!("invalid text content: {error}"))?;
                    value.push_str(&unescaped);
                }
            }
            Ok(Event::CData(content)) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&content.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some((name, value)) = current.take() {
                        fields.entry(name).or_insert(value);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                return Err(format!(
                    "{} (at byte {})",
                    error,
                    reader.buffer_position()
                ))
            }
        }
    }

    if !seen_root {
        return Err("missing root element".to_string());
    }
    if depth != 0 {
        return Err("unexpected end of document".to_string());
    }
    Ok(fields)
}

fn parse_json_fields(text: &str) -> Result<ConfigFields, String> {
    let raw: JsonConfig = serde_json::from_str(text).map_err(|error| error.to_string())?;

    let mut fields = ConfigFields::new();
    let mut put = |name: &str, value: Option<String>| {
        if let Some(value) = value {
            fields.insert(name.to_string(), value);
        }
    };
    let flag_text = |flag: JsonFlag| match flag {
        JsonFlag::Bool(value) => value.to_string(),
        JsonFlag::Text(value) => value,
    };

    put(FIELD_MODE, raw.mode);
    put(FIELD_MODE_VAR, raw.modevar);
    put(FIELD_NODE_PATH, raw.nodepath);
    put(FIELD_APP_DIR, raw.appdir);
    put(FIELD_APP_START, raw.appstart);
    put(FIELD_MINIMIZE, raw.minimize.map(flag_text));
    put(FIELD_ALLOW_OVERRIDES, raw.allowoverrides.map(flag_text));
    put(
        FIELD_DEFAULT_APPS,
        raw.defaultapps.map(|list| match list {
            JsonEntryList::Items(items) => items.join(","),
            JsonEntryList::Joined(joined) => joined,
        }),
    );
    Ok(fields)
}

fn config_from_fields(fields: &ConfigFields) -> Result<LauncherConfig, LaunchError> {
    let mode_env_var = fields
        .get(FIELD_MODE_VAR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_MODE_ENV_VAR.to_string());

    Ok(LauncherConfig {
        mode: required_field(fields, FIELD_MODE)?.trim().to_string(),
        mode_env_var,
        interpreter_path: runtime_paths::expand_home(required_field(fields, FIELD_NODE_PATH)?),
        app_dir: runtime_paths::expand_home(required_field(fields, FIELD_APP_DIR)?),
        app_entry_file: required_field(fields, FIELD_APP_START)?.trim().to_string(),
        minimize_window: parse_flag(FIELD_MINIMIZE, required_field(fields, FIELD_MINIMIZE)?)?,
        allow_overrides: parse_flag(
            FIELD_ALLOW_OVERRIDES,
            required_field(fields, FIELD_ALLOW_OVERRIDES)?,
        )?,
        candidate_entry_files: split_entry_list(required_field(fields, FIELD_DEFAULT_APPS)?),
    })
}

fn required_field<'a>(fields: &'a ConfigFields, name: &str) -> Result<&'a str, LaunchError> {
    fields.get(name).map(String::as_str).ok_or_else(|| {
        LaunchError::configuration(format!(
            "Configuration is missing required element '{name}'."
        ))
    })
}

pub(crate) fn parse_flag(name: &str, raw: &str) -> Result<bool, LaunchError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    Err(LaunchError::configuration(format!(
        "Configuration element '{name}' must be 'true' or 'false', got '{raw}'."
    )))
}

pub(crate) fn split_entry_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
