//! Class name → output file mapping shared by every page of one run.

use std::collections::BTreeMap;
use std::path::Path;

/// Fallback for classes that are not part of this run.
const EXTERNAL_CLASS_URL: &str = "https://docs.godotengine.org/en/stable/classes/class_";

/// Read-only after phase 1; passed by reference into rendering.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under its output file name (`Foo` → `Foo.md`).
    pub fn register(&mut self, class_name: &str) -> &str {
        self.classes
            .entry(class_name.to_string())
            .or_insert_with(|| format!("{}.md", class_name))
            .as_str()
    }

    /// Register the class named by a source file's stem (`doc/Foo.xml` → `Foo`).
    pub fn register_source(&mut self, source: &Path) -> Option<&str> {
        let stem = source.file_stem()?.to_str()?;
        Some(self.register(stem))
    }

    pub fn get(&self, class_name: &str) -> Option<&str> {
        self.classes.get(class_name).map(String::as_str)
    }

    /// Output file for a source path registered with [`Self::register_source`].
    pub fn get_source(&self, source: &Path) -> Option<&str> {
        self.get(source.file_stem()?.to_str()?)
    }

    /// Link target for a class reference: the local page or the online reference.
    pub fn resolve(&self, class_name: &str) -> String {
        match self.get(class_name) {
            Some(file) => file.to_string(),
            None => format!(
                "{}{}.html",
                EXTERNAL_CLASS_URL,
                class_name.to_lowercase()
            ),
        }
    }

    /// Registered `(class name, file name)` pairs, sorted by class name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}
