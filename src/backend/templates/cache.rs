/**
 * Template Render Cache
 *
 * Built once at startup from a template directory:
 *
 * ```text
 * ui/html/
 * ├── base.hbs           - layout, registered as the `base` partial
 * ├── partials/<name>.hbs - shared fragments, registered by file stem
 * └── pages/<name>.hbs    - one entry per page, keyed by file stem
 * ```
 *
 * Every page gets its own compiled registry holding the layout, all shared
 * partials and the page. A page wraps itself in the layout with
 * `{{#> base}}{{#*inline "main"}}...{{/inline}}{{/base}}`.
 *
 * Any compile failure aborts the build. After that the cache is read-only,
 * so renders need no locking. Rendering always goes into a `String`; callers
 * only build a response once the whole page has rendered.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::backend::templates::helpers;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile template {name}: {source}")]
    Compile {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("template {0} does not exist")]
    Missing(String),

    #[error("failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("no base layout found in {0}")]
    MissingLayout(PathBuf),

    #[error("failed to serialize template data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Raw template sources, before compilation
#[derive(Debug, Clone, Default)]
pub struct TemplateSources {
    pub base: String,
    pub partials: Vec<(String, String)>,
    pub pages: Vec<(String, String)>,
}

impl TemplateSources {
    /// Read `base.hbs`, `partials/<name>.hbs` and `pages/<name>.hbs` under `dir`
    pub fn read_dir(dir: &Path) -> Result<Self, TemplateError> {
        let base_path = dir.join("base.hbs");
        if !base_path.is_file() {
            return Err(TemplateError::MissingLayout(dir.to_path_buf()));
        }

        Ok(Self {
            base: read_file(&base_path)?,
            partials: read_stems(&dir.join("partials"))?,
            pages: read_stems(&dir.join("pages"))?,
        })
    }
}

fn read_file(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `(file stem, contents)` for every `.hbs` file in `dir`; a missing
/// directory yields nothing
fn read_stems(dir: &Path) -> Result<Vec<(String, String)>, TemplateError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| TemplateError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("hbs") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        files.push((stem.to_string(), read_file(&path)?));
    }

    files.sort();
    Ok(files)
}

/// Compiled page templates keyed by page name
pub struct TemplateCache {
    pages: HashMap<String, Handlebars<'static>>,
}

impl TemplateCache {
    /// Compile every page found under `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let cache = Self::from_sources(TemplateSources::read_dir(dir)?)?;
        tracing::info!(dir = %dir.display(), pages = cache.len(), "template cache built");
        Ok(cache)
    }

    pub fn from_sources(sources: TemplateSources) -> Result<Self, TemplateError> {
        let mut pages = HashMap::with_capacity(sources.pages.len());

        for (name, page) in &sources.pages {
            let mut registry = Handlebars::new();
            helpers::register(&mut registry);

            registry
                .register_partial("base", &sources.base)
                .map_err(|e| compile_error("base", e))?;
            for (partial, source) in &sources.partials {
                registry
                    .register_partial(partial, source)
                    .map_err(|e| compile_error(partial, e))?;
            }
            registry
                .register_template_string(name, page)
                .map_err(|e| compile_error(name, e))?;

            tracing::debug!(page = %name, "compiled page template");
            pages.insert(name.clone(), registry);
        }

        Ok(Self { pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    /// Render a page into a buffer
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        let registry = self
            .pages
            .get(name)
            .ok_or_else(|| TemplateError::Missing(name.to_string()))?;

        registry.render(name, data).map_err(|e| TemplateError::Render {
            name: name.to_string(),
            source: Box::new(e),
        })
    }
}

fn compile_error(name: &str, source: handlebars::TemplateError) -> TemplateError {
    TemplateError::Compile {
        name: name.to_string(),
        source: Box::new(source),
    }
}
