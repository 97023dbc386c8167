//! Common utilities shared across CLI commands.

use std::fs;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::info;

use shape_scatter::{builtin, builtins, load_shape_file, templates_from_svg, ShapeTemplate};

use super::config::ShapeSources;

/// Build the shape pool from the configured sources.
///
/// Sources are combined in the order builtin, file, svg. With no source at
/// all the full built-in set is used.
pub fn load_shape_pool(sources: &ShapeSources) -> Result<Vec<Arc<ShapeTemplate>>> {
    if sources.is_empty() {
        return Ok(builtins().into_iter().map(Arc::new).collect());
    }

    let mut pool = Vec::new();

    for name in &sources.builtin {
        let template = builtin(name).ok_or_else(|| {
            anyhow!("unknown built-in shape '{}' (known: {})", name, shape_scatter::BUILTIN_NAMES.join(", "))
        })?;
        pool.push(template);
    }

    if let Some(path) = &sources.file {
        let templates = load_shape_file(path)?;
        info!("loaded {} shapes from {}", templates.len(), path.display());
        pool.extend(templates);
    }

    if let Some(path) = &sources.svg {
        let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let templates = templates_from_svg(&content).with_context(|| format!("in {}", path.display()))?;
        info!("loaded {} shapes from {}", templates.len(), path.display());
        pool.extend(templates);
    }

    Ok(pool.into_iter().map(Arc::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sources_means_builtins() {
        let pool = load_shape_pool(&ShapeSources::default()).unwrap();
        assert_eq!(pool.len(), shape_scatter::BUILTIN_NAMES.len());
    }

    #[test]
    fn named_builtins_only() {
        let sources = ShapeSources {
            builtin: vec!["hexagon".to_string(), "square".to_string()],
            ..ShapeSources::default()
        };
        let pool = load_shape_pool(&sources).unwrap();
        let names: Vec<&str> = pool.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["hexagon", "square"]);
    }

    #[test]
    fn unknown_builtin_is_error() {
        let sources = ShapeSources {
            builtin: vec!["turtle".to_string()],
            ..ShapeSources::default()
        };
        let err = load_shape_pool(&sources).unwrap_err();
        assert!(err.to_string().contains("turtle"));
    }
}
