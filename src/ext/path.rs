use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use dispatch_handlebars::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("views");
    /// assert_eq!(path.to_str_checked().unwrap(), "views");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Converts a relative template path to the name it is registered under,
    /// using `/` as the separator on every platform.
    ///
    /// # Examples
    /// ```
    /// use dispatch_handlebars::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("admin").join("index");
    /// assert_eq!(path.to_template_name().unwrap(), "admin/index");
    /// ```
    fn to_template_name(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_template_name(&self) -> Result<String> {
        Ok(self.to_str_checked()?.replace('\\', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_to_template_name_normalizes_separators() {
        assert_eq!(Path::new("admin\\users\\list").to_template_name().unwrap(), "admin/users/list");
        assert_eq!(Path::new("admin/users").to_template_name().unwrap(), "admin/users");
    }
}
