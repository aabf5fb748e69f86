//! Template set composition.
//! Parses every discovered template into one MiniJinja environment so that
//! templates can include each other and call the registered helpers.

use indexmap::IndexMap;
use log::{debug, warn};
use minijinja::{context, Environment, ErrorKind};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::helpers::Helpers;
use crate::paths::{logical_name, short_name};

/// What a bare file name resolves to when used as a template name.
enum ShortName {
    Unique(String),
    Ambiguous(Vec<String>),
}

struct TemplateFile {
    path: PathBuf,
    source: String,
}

/// Compiled templates keyed by logical name, plus the helpers they can call.
///
/// A logical name is the path of the file relative to the root it was
/// discovered under (`sub/c.tmpl`). Templates may also refer to each other
/// by bare file name (`{% include "c.tmpl" %}`) as long as that file name is
/// unique across all roots. Logical names take precedence over bare names.
///
/// The set is immutable once built.
pub struct TemplateSet {
    env: Environment<'static>,
    files: IndexMap<String, PathBuf>,
}

impl TemplateSet {
    /// Parses all `(root, files)` pairs into a new set.
    ///
    /// # Errors
    /// Fails on the first unreadable file, syntax error or duplicate
    /// logical name. No set is returned in that case.
    pub fn build(roots: &[(&Path, &[PathBuf])], helpers: Helpers) -> Result<Self> {
        let mut builder = TemplateSetBuilder::new(helpers);
        for &(root, files) in roots {
            builder.add_root(root, files)?;
        }
        Ok(builder.build())
    }

    /// Returns true if `name` is a logical name in this set.
    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Logical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Source file a logical name was parsed from.
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.files.get(name).map(PathBuf::as_path)
    }

    /// Executes template `name` against an empty context and streams the
    /// output into `writer`.
    pub fn render_to_write<W: io::Write>(
        &self,
        name: &str,
        writer: W,
    ) -> std::result::Result<(), minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render_to_write(context! {}, writer)?;
        Ok(())
    }

    /// Executes template `name` against an empty context.
    pub fn render_to_string(&self, name: &str) -> std::result::Result<String, minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render(context! {})
    }
}

/// Incremental construction of a [`TemplateSet`].
pub struct TemplateSetBuilder {
    env: Environment<'static>,
    files: IndexMap<String, TemplateFile>,
    short_names: IndexMap<String, Vec<String>>,
}

impl TemplateSetBuilder {
    /// Creates a builder whose templates can call every helper in `helpers`.
    pub fn new(helpers: Helpers) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for (name, function) in helpers {
            debug!("Registering helper {}", name);
            env.add_global(name, function);
        }
        Self {
            env,
            files: IndexMap::new(),
            short_names: IndexMap::new(),
        }
    }

    /// Reads and parses `files`, naming each one relative to `root`.
    ///
    /// # Errors
    /// * `Error::ReadError` if a file cannot be read
    /// * `Error::TemplateParseError` if a file is not a valid template
    /// * `Error::DuplicateTemplateError` if a logical name is already taken
    /// * `Error::PathOutsideRootError` if a file is not under `root`
    pub fn add_root<P: AsRef<Path>>(&mut self, root: &Path, files: &[P]) -> Result<&mut Self> {
        for file in files {
            let path = file.as_ref();
            let name = logical_name(root, path)?;
            if self.files.contains_key(&name) {
                return Err(Error::DuplicateTemplateError {
                    name,
                    path: path.to_path_buf(),
                });
            }

            let source = fs::read_to_string(path).map_err(|source| Error::ReadError {
                path: path.to_path_buf(),
                source,
            })?;
            self.env
                .add_template_owned(name.clone(), source.clone())
                .map_err(|source| Error::TemplateParseError {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!("Parsed template '{}' from {}", name, path.display());

            self.short_names
                .entry(short_name(&name).to_string())
                .or_default()
                .push(name.clone());
            self.files.insert(
                name,
                TemplateFile {
                    path: path.to_path_buf(),
                    source,
                },
            );
        }
        Ok(self)
    }

    /// Finishes the set and installs the bare file name lookup.
    pub fn build(self) -> TemplateSet {
        let Self {
            mut env,
            files,
            short_names,
        } = self;

        let mut aliases = HashMap::new();
        for (short, names) in short_names {
            let alias = match names.as_slice() {
                [name] => ShortName::Unique(files[name.as_str()].source.clone()),
                _ => {
                    if !files.contains_key(short.as_str()) {
                        warn!(
                            "Template name '{}' is shared by {}; include it by its full name",
                            short,
                            names.join(", ")
                        );
                    }
                    ShortName::Ambiguous(names)
                }
            };
            aliases.insert(short, alias);
        }

        env.set_loader(move |name| match aliases.get(name) {
            None => Ok(None),
            Some(ShortName::Unique(source)) => Ok(Some(source.clone())),
            Some(ShortName::Ambiguous(candidates)) => Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!(
                    "template name '{}' is ambiguous (candidates: {})",
                    name,
                    candidates.join(", ")
                ),
            )),
        });

        TemplateSet {
            env,
            files: files
                .into_iter()
                .map(|(name, file)| (name, file.path))
                .collect(),
        }
    }
}
