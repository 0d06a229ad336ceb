use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{Error, Result, REPOSITORY_FORMAT_VERSION};

const CONFIG_FILE: &str = "config";

/// The section/key-value configuration stored in a repository's `config` file.
///
/// The file format is the familiar git one:
///
/// ```text
/// [core]
///     repositoryformatversion = 0
///     filemode = false
///     bare = false
/// ```
///
/// Keys are case-insensitive and stored in lowercase. Section names are kept
/// exactly as written (so `[remote "origin"]` is the section `remote "origin"`).
/// Sections and keys keep the order in which they were first seen, which keeps
/// the serialized form stable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

/// One named section of a [`Config`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Section {
        Section {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a key within this section.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the `(key, value)` pairs in this section.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn set(&mut self, key: &str, value: &str) {
        let key = key.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// The configuration written into every newly-created repository.
    pub fn repository_defaults() -> Config {
        let mut config = Config::new();
        config.insert(
            "core",
            "repositoryformatversion",
            &REPOSITORY_FORMAT_VERSION.to_string(),
        );
        config.insert("core", "filemode", "false");
        config.insert("core", "bare", "false");
        config
    }

    /// Read the `config` file stored in `git_dir`.
    ///
    /// A missing file is an error ([`Error::ConfigMissing`]) when `strict` is set
    /// and `Ok(None)` otherwise. A strict load also requires
    /// `core.repositoryformatversion` to be `0`.
    pub fn load(git_dir: &Path, strict: bool) -> Result<Option<Config>> {
        let path = git_dir.join(CONFIG_FILE);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), strict, "no config file");
                return if strict {
                    Err(Error::ConfigMissing(path))
                } else {
                    Ok(None)
                };
            }
            Err(err) => return Err(err.into()),
        };

        let config: Config = text.parse()?;
        if strict {
            config.check_format_version()?;
        }

        Ok(Some(config))
    }

    /// Write this configuration to the `config` file in `git_dir`, replacing any
    /// existing file.
    ///
    /// The text is written to a temporary file in `git_dir` first and then renamed
    /// into place, so a reader sees either the old or the new file. The new file
    /// keeps the permissions of the one it replaces (0644 for a new file on Unix).
    pub fn save(&self, git_dir: &Path) -> Result<()> {
        let path = git_dir.join(CONFIG_FILE);

        let mut temp = NamedTempFile::new_in(git_dir)?;
        if let Some(permissions) = config_permissions(&path)? {
            temp.as_file().set_permissions(permissions)?;
        }

        write!(temp, "{}", self)?;
        temp.flush()?;
        temp.persist(&path).map_err(|err| err.error)?;

        info!(path = %path.display(), "wrote config");
        Ok(())
    }

    /// Look up `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Set `key` in `section` to `value`, creating the section if needed.
    ///
    /// Everything stored this way survives a [`save`](Config::save) and
    /// [`load`](Config::load) unchanged, so input that the file format can't
    /// represent is rejected with [`Error::InvalidConfigEntry`]:
    ///
    /// * section names must be non-empty, without surrounding whitespace, line
    ///   breaks, or `]`,
    /// * keys must start with an ASCII letter and contain only ASCII letters,
    ///   digits, and `-`,
    /// * values must be a single line without leading or trailing whitespace.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let problem = if !valid_section_name(section) {
            Some("invalid section name")
        } else if !valid_key(key) {
            Some("invalid key")
        } else if !valid_value(value) {
            Some("value must be one line without surrounding whitespace")
        } else {
            None
        };

        if let Some(reason) = problem {
            return Err(Error::InvalidConfigEntry {
                section: section.to_string(),
                key: key.to_string(),
                reason: reason.to_string(),
            });
        }

        self.insert(section, key, value);
        Ok(())
    }

    // Stores without validation. Only for text that came out of the parser or
    // for known-good constants.
    fn insert(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section).set(key, value);
    }

    /// Look up a boolean value, using git's spellings (`true`/`yes`/`on`/`1` and
    /// `false`/`no`/`off`/`0`/empty).
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => parse_bool(value)
                .map(Some)
                .ok_or_else(|| Error::InvalidBool {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                }),
        }
    }

    /// Return the declared `core.repositoryformatversion`.
    ///
    /// Any integer is accepted here, signs included; whether it is supported is
    /// a separate question.
    pub fn format_version(&self) -> Result<i64> {
        let raw = self
            .get("core", "repositoryformatversion")
            .ok_or_else(|| Error::MissingConfigValue {
                section: "core".to_string(),
                key: "repositoryformatversion".to_string(),
            })?;

        raw.trim()
            .parse()
            .map_err(|_| Error::UnsupportedVersion(raw.to_string()))
    }

    pub(crate) fn check_format_version(&self) -> Result<()> {
        let version = self.format_version()?;
        if version == i64::from(REPOSITORY_FORMAT_VERSION) {
            Ok(())
        } else {
            Err(Error::UnsupportedVersion(version.to_string()))
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(text: &str) -> Result<Config> {
        let mut config = Config::new();
        let mut current: Option<String> = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = section_header(line)
                    .ok_or_else(|| parse_error(line_no, "malformed section header"))?;
                config.section_mut(name);
                current = Some(name.to_string());
                continue;
            }

            let section = current
                .as_deref()
                .ok_or_else(|| parse_error(line_no, "key outside of any section"))?;

            let (key, value) = match line.find('=') {
                Some(eq) => (line[..eq].trim(), line[eq + 1..].trim()),
                None => return Err(parse_error(line_no, "expected 'key = value'")),
            };

            if key.is_empty() {
                return Err(parse_error(line_no, "empty key"));
            }

            config.insert(section, key, value);
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "\t{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?
        .strip_suffix(']')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn valid_section_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains(|c| c == ']' || c == '\n' || c == '\r')
}

fn valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

fn valid_value(value: &str) -> bool {
    value.trim() == value && !value.contains(|c| c == '\n' || c == '\r')
}

fn config_permissions(path: &Path) -> Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

fn parse_error(line: usize, message: &str) -> Error {
    Error::ConfigParse {
        line,
        message: message.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}
