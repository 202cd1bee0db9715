use crate::error::{Error, Result};
use crate::ext::PathExt;
use globset::Glob;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A template file found under the views root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Path relative to the views root without extension, `/` separated.
    pub name: String,
}

impl TemplateFile {
    /// Last segment of the template name.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Directory part of the name including the trailing `/`, empty at the root.
    pub fn parent(&self) -> &str {
        &self.name[..self.name.len() - self.file_name().len()]
    }
}

/// Lists the `*.{extension}` files under `views`, sorted by file name.
///
/// With `recursive` unset only files directly inside `views` are returned.
pub fn list_templates<P: AsRef<Path>>(
    views: P,
    extension: &str,
    recursive: bool,
) -> Result<Vec<TemplateFile>> {
    let views = views.as_ref();
    if !views.is_dir() {
        return Err(Error::ViewsDoesNotExistError { views_dir: views.display().to_string() });
    }

    let matcher = Glob::new(&format!("*.{extension}"))?.compile_matcher();
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut templates = Vec::new();

    for entry in WalkDir::new(views).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Other(err.into()))?;
        if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
            continue;
        }

        let path = entry.into_path();
        let relative = path
            .strip_prefix(views)
            .map_err(|err| Error::Other(err.into()))?
            .with_extension("");
        let name = relative.to_template_name()?;
        debug!("Found template '{}' at {}", name, path.display());
        templates.push(TemplateFile { path, name });
    }

    Ok(templates)
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}
