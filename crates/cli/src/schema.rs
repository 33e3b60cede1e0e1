use anyhow::{Context, Result, bail};
use plusopt_metadata::{OptionSchema, SCHEMA_FORMAT_VERSION};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEMA_NAME: &str = "plusopt.json";
pub const SCHEMA_ENV: &str = "PLUSOPT_SCHEMA";

#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// `None` when no schema file was found and the empty schema is used.
    pub path: Option<PathBuf>,
    pub schema: OptionSchema,
}

/// Load the option schema.
///
/// Lookup order: `explicit`, then `$PLUSOPT_SCHEMA`, then `plusopt.json` in
/// the current directory. A path given explicitly or through the
/// environment must exist; a missing default file yields an empty schema.
pub fn load_schema(explicit: Option<&Path>) -> Result<LoadedSchema> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let from_env = std::env::var_os(SCHEMA_ENV).map(PathBuf::from);
    let (path, required) = match explicit.map(Path::to_path_buf).or(from_env) {
        Some(p) => (resolve_against(&cwd, &p), true),
        None => (cwd.join(DEFAULT_SCHEMA_NAME), false),
    };

    if !path.exists() {
        if required {
            bail!("schema not found: {}", path.display());
        }
        tracing::debug!(path = %path.display(), "no schema file; using empty schema");
        return Ok(LoadedSchema {
            path: None,
            schema: OptionSchema::default(),
        });
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    let schema = OptionSchema::from_json_str(&contents)
        .with_context(|| format!("failed to parse schema JSON: {}", path.display()))?;

    if schema.format_version != SCHEMA_FORMAT_VERSION {
        bail!(
            "unsupported schema format-version {} in {} (expected {})",
            schema.format_version,
            path.display(),
            SCHEMA_FORMAT_VERSION
        );
    }

    tracing::debug!(
        path = %path.display(),
        options = schema.options.len(),
        "schema loaded"
    );
    Ok(LoadedSchema {
        path: Some(path),
        schema,
    })
}

fn resolve_against(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
