//! Import collection and cross-file path resolution.

use indexmap::IndexMap;

/// How a target language refers to symbols defined elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// File-relative module references (`import { X } from "../models/x";`).
    RelativePath,
    /// Namespace references (`using Shop.Models;`).
    Namespace,
}

/// Where an imported symbol comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// A generated file in this run.
    File { path: String, namespace: String },
    /// An external package or ecosystem namespace.
    Package(String),
}

/// One symbol required from somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolImport {
    pub symbol: String,
    pub source: ImportSource,
}

/// A rendered import group: one module reference and every symbol taken
/// from it, sorted for deterministic output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportGroup {
    pub module: String,
    pub symbols: Vec<String>,
}

/// Collects the imports one file needs while its body renders.
///
/// Grouping and sorting happen in [`ImportCollector::groups`], after the
/// whole body has been walked, so collection order never leaks into output.
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: Vec<SymbolImport>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a required symbol. Exact duplicates are dropped.
    pub fn add(&mut self, import: SymbolImport) {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    /// Record every import of a resolved reference.
    pub fn extend(&mut self, imports: impl IntoIterator<Item = SymbolImport>) {
        for import in imports {
            self.add(import);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Produce the final import groups for `requesting_file`.
    ///
    /// Symbols defined by the requesting file itself are dropped, as are
    /// namespace references back into `requesting_namespace`. Groups and
    /// symbols are sorted case-insensitively so repeated runs emit
    /// byte-identical import blocks.
    pub fn groups(
        &self,
        requesting_file: &str,
        requesting_namespace: &str,
        style: ImportStyle,
    ) -> Vec<ImportGroup> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for import in &self.imports {
            let module = match (&import.source, style) {
                (ImportSource::File { path, .. }, ImportStyle::RelativePath) => {
                    if path == requesting_file {
                        continue;
                    }
                    relative_import_path(strip_extension(requesting_file), strip_extension(path))
                }
                (ImportSource::File { namespace, .. }, ImportStyle::Namespace) => {
                    if namespace.is_empty() || namespace == requesting_namespace {
                        continue;
                    }
                    namespace.clone()
                }
                (ImportSource::Package(package), _) => package.clone(),
            };
            let symbols = grouped.entry(module).or_default();
            if !symbols.contains(&import.symbol) {
                symbols.push(import.symbol.clone());
            }
        }

        let mut groups: Vec<ImportGroup> = grouped
            .into_iter()
            .map(|(module, mut symbols)| {
                sort_ci(&mut symbols);
                ImportGroup { module, symbols }
            })
            .collect();
        groups.sort_by(|a, b| ci_key(&a.module).cmp(&ci_key(&b.module)));
        groups
    }
}

fn sort_ci(values: &mut [String]) {
    values.sort_by(|a, b| ci_key(a).cmp(&ci_key(b)));
}

fn ci_key(s: &str) -> (String, String) {
    (s.to_lowercase(), s.to_string())
}

fn strip_extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => stem,
        _ => path,
    }
}

/// Compute a relative module reference between two extension-free,
/// `/`-separated file paths.
///
/// The last segment of each path is the filename; common directory prefixes
/// collapse, same-directory references get a `./` prefix.
pub fn relative_import_path(from: &str, to: &str) -> String {
    let from: Vec<&str> = from.split('/').collect();
    let to: Vec<&str> = to.split('/').collect();

    let from_dirs = from.len().saturating_sub(1);
    let to_dirs = to.len().saturating_sub(1);
    let common = from[..from_dirs]
        .iter()
        .zip(to[..to_dirs].iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dirs - common;
    let mut parts = Vec::new();
    if ups == 0 {
        parts.push(".");
    } else {
        for _ in 0..ups {
            parts.push("..");
        }
    }
    parts.extend(&to[common..]);
    parts.join("/")
}
