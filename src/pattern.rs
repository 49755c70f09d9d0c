use crate::fs::{absolutize, Directories};
use crate::scanner::replace_groups;
use crate::util;
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Token that renders to the platform directory separator.
pub const PATH_SEP_TOKEN: &str = "path_sep";

/// Produces a token's value for one item. `None` and `Some("")` both mean
/// "no value".
pub type Resolver<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Post-processing applied to every rendered or described pattern.
pub type Filter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Where stored folder/file templates come from (usually the user config).
pub trait TemplateSource: Send + Sync {
    fn folder_template(&self) -> Result<String>;
    fn file_template(&self) -> Result<String>;
}

/// Items that know the location they were loaded from.
pub trait SourceLocation {
    fn source_uri(&self) -> Option<&str>;
}

/// One registered token: its key, its human readable name and its resolver.
pub struct Conversion<T> {
    token: String,
    name: String,
    resolver: Resolver<T>,
    token_string: String,
}

impl<T> Conversion<T> {
    pub fn new(token: &str, name: &str, resolver: Resolver<T>) -> Self {
        Self {
            token: token.to_string(),
            name: name.to_string(),
            resolver,
            token_string: format!("%{}%", token),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marker as it appears in a pattern, e.g. `%title%`.
    pub fn token_string(&self) -> &str {
        &self.token_string
    }

    pub fn resolve(&self, item: &T) -> Option<String> {
        (self.resolver)(item)
    }
}

impl<T> Clone for Conversion<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            name: self.name.clone(),
            resolver: Arc::clone(&self.resolver),
            token_string: self.token_string.clone(),
        }
    }
}

impl<T> fmt::Debug for Conversion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("token", &self.token)
            .field("name", &self.name)
            .finish()
    }
}

/// Join a folder template and a file template with the separator token.
pub fn create_folder_file_pattern(folder: &str, file: &str) -> String {
    format!("{}%{}%{}", folder, PATH_SEP_TOKEN, file)
}

/// Make a single name safe for the filesystem.
pub fn escape(input: &str) -> String {
    util::escape_filename(input)
}

fn lookup_templates(source: &dyn TemplateSource) -> Result<String> {
    let folder = source.folder_template().context("reading folder template")?;
    let file = source.file_template().context("reading file template")?;
    Ok(create_folder_file_pattern(&folder, &file))
}

/// `""`/None -> no extension, otherwise exactly one leading dot.
pub fn normalize_extension(ext: Option<&str>) -> String {
    match ext {
        None | Some("") => String::new(),
        Some(e) if e.starts_with('.') => e.to_string(),
        Some(e) => format!(".{}", e),
    }
}

/// Turns patterns such as `%album_artist%%path_sep%{%year% - }%album%` into
/// relative paths for a metadata item of type `T`.
///
/// Tokens are registered once with [`add_conversion`](Self::add_conversion)
/// and enumerated in ascending token order. Rendering keeps no state between
/// calls, so a fully configured pattern can be shared across threads.
pub struct FileNamePattern<T> {
    conversion_table: BTreeMap<String, Conversion<T>>,
    filter: Option<Filter>,
    default_folder: String,
    default_file: String,
    template_source: Option<Box<dyn TemplateSource>>,
    suggested_folders: Vec<String>,
    suggested_files: Vec<String>,
}

impl<T> Default for FileNamePattern<T> {
    fn default() -> Self {
        Self {
            conversion_table: BTreeMap::new(),
            filter: None,
            default_folder: String::new(),
            default_file: String::new(),
            template_source: None,
            suggested_folders: Vec::new(),
            suggested_files: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for FileNamePattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileNamePattern")
            .field("tokens", &self.conversion_table.keys().collect::<Vec<_>>())
            .field("default_folder", &self.default_folder)
            .field("default_file", &self.default_file)
            .field("has_filter", &self.filter.is_some())
            .field("has_template_source", &self.template_source.is_some())
            .finish()
    }
}

impl<T> FileNamePattern<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token. Registering the same token twice is an error and
    /// leaves the existing entry in place.
    pub fn add_conversion<F>(&mut self, token: &str, name: &str, resolver: F) -> Result<()>
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        if token.is_empty() {
            bail!("conversion token must not be empty");
        }
        if self.conversion_table.contains_key(token) {
            bail!("conversion token '{}' is already registered", token);
        }
        self.conversion_table
            .insert(token.to_string(), Conversion::new(token, name, Arc::new(resolver)));
        Ok(())
    }

    /// Registered conversions, sorted by token.
    pub fn conversions(&self) -> impl Iterator<Item = &Conversion<T>> {
        self.conversion_table.values()
    }

    pub fn conversion(&self, token: &str) -> Option<&Conversion<T>> {
        self.conversion_table.get(token)
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    pub fn set_default_folder(&mut self, folder: impl Into<String>) {
        self.default_folder = folder.into();
    }

    pub fn default_file(&self) -> &str {
        &self.default_file
    }

    pub fn set_default_file(&mut self, file: impl Into<String>) {
        self.default_file = file.into();
    }

    pub fn default_pattern(&self) -> String {
        create_folder_file_pattern(&self.default_folder, &self.default_file)
    }

    pub fn suggested_folders(&self) -> &[String] {
        &self.suggested_folders
    }

    pub fn set_suggested_folders(&mut self, folders: Vec<String>) {
        self.suggested_folders = folders;
    }

    pub fn suggested_files(&self) -> &[String] {
        &self.suggested_files
    }

    pub fn set_suggested_files(&mut self, files: Vec<String>) {
        self.suggested_files = files;
    }

    /// Bind the filter hook. Replaces any previous filter.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn set_template_source(&mut self, source: Box<dyn TemplateSource>) {
        self.template_source = Some(source);
    }

    fn apply_filter(&self, input: String) -> String {
        match &self.filter {
            Some(filter) => filter(&input),
            None => input,
        }
    }

    /// Expand every known token marker in `pattern` using `value_fn`.
    ///
    /// Optional groups `{...}` are resolved first: markers inside a group are
    /// replaced in token order, and the whole group collapses to nothing as
    /// soon as one of its markers has no value. The remaining markers are
    /// then replaced everywhere, with missing values becoming empty text.
    /// Unknown markers are left as they are. Returns None for an empty
    /// pattern.
    pub fn convert<F>(&self, pattern: &str, mut value_fn: F) -> Option<String>
    where
        F: FnMut(&Conversion<T>) -> Option<String>,
    {
        if pattern.is_empty() {
            return None;
        }

        let mut out = replace_groups(pattern, |body| self.resolve_group(body, &mut value_fn));

        for conversion in self.conversions() {
            let token_string = conversion.token_string();
            if !out.contains(token_string) {
                continue;
            }
            let replacement = value_fn(conversion).unwrap_or_default();
            out = out.replace(token_string, &replacement);
        }

        Some(out)
    }

    fn resolve_group<F>(&self, body: &str, value_fn: &mut F) -> String
    where
        F: FnMut(&Conversion<T>) -> Option<String>,
    {
        let mut body = body.to_string();
        for conversion in self.conversions() {
            let token_string = conversion.token_string();
            if !body.contains(token_string) {
                continue;
            }
            match value_fn(conversion).filter(|v| !v.is_empty()) {
                Some(value) => body = body.replace(token_string, &value),
                None => return String::new(),
            }
        }
        body
    }

    /// Render `pattern` with display names in place of values, e.g.
    /// `%album_artist%%path_sep%%album%` -> `Album Artist/Album Title`.
    pub fn create_pattern_description(&self, pattern: &str) -> Option<String> {
        self.convert(pattern, |conversion| Some(conversion.name().to_string()))
            .map(|described| self.apply_filter(described))
    }

    /// Render `pattern` for `item`. A missing or blank pattern falls back to
    /// [`default_pattern`](Self::default_pattern).
    pub fn create_from_track_info(&self, pattern: Option<&str>, item: &T) -> String {
        let pattern = match pattern {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => self.default_pattern(),
        };
        let rendered = self
            .convert(&pattern, |conversion| conversion.resolve(item))
            .unwrap_or_default();
        self.apply_filter(rendered)
    }

    /// Folder and file templates from the template source, if one is bound
    /// and both lookups succeed.
    pub fn configured_pattern(&self) -> Option<String> {
        let source = self.template_source.as_deref()?;
        match lookup_templates(source) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!("template lookup failed, using default pattern: {:#}", e);
                None
            }
        }
    }

    /// Render `item` with the configured templates, or the default pattern
    /// when none are available.
    pub fn create_from_configured(&self, item: &T) -> String {
        let pattern = self.configured_pattern();
        self.create_from_track_info(pattern.as_deref(), item)
    }

    /// Render one pattern against several sample items, for previews.
    pub fn preview(&self, pattern: Option<&str>, samples: &[T]) -> Vec<String> {
        samples
            .iter()
            .map(|item| self.create_from_track_info(pattern, item))
            .collect()
    }

    /// Absolute path for `item` below `base_dir`, creating its directory.
    ///
    /// The configured pattern is rendered, `ext` appended and every path
    /// component escaped; separators introduced by the pattern survive.
    pub fn build_full(
        &self,
        base_dir: &Path,
        item: &T,
        ext: Option<&str>,
        dirs: &dyn Directories,
    ) -> Result<PathBuf> {
        let ext = normalize_extension(ext);
        let song_path = util::escape_path(&(self.create_from_configured(item) + &ext));
        let relative = Path::new(&song_path);

        let file_name = relative
            .file_name()
            .with_context(|| format!("pattern rendered no file name for base {}", base_dir.display()))?;
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        let dir = absolutize(&base_dir.join(parent))?;

        if !dirs.exists(&dir) {
            debug!("creating directory {}", dir.display());
            dirs.create(&dir)?;
        }

        Ok(dir.join(file_name))
    }
}

impl<T: SourceLocation> FileNamePattern<T> {
    /// Like [`build_full`](Self::build_full), taking the extension from the
    /// item's source location.
    pub fn build_full_from_uri(
        &self,
        base_dir: &Path,
        item: &T,
        dirs: &dyn Directories,
    ) -> Result<PathBuf> {
        let ext = item.source_uri().and_then(util::extension_from_uri);
        self.build_full(base_dir, item, ext.as_deref(), dirs)
    }
}
