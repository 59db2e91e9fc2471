use crate::error::{GraphmlError, Result};
use std::path::Path;

/// Validation utilities for command-line input
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

/// Longest accepted graph name
pub const MAX_GRAPH_NAME_LEN: usize = 256;

impl InputValidator {
    /// Validate the GraphML graph name
    pub fn validate_graph_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(GraphmlError::Validation("Graph name cannot be empty".to_string()));
        }

        if name.chars().count() > MAX_GRAPH_NAME_LEN {
            return Err(GraphmlError::Validation(format!(
                "Graph name too long (max {MAX_GRAPH_NAME_LEN} characters)"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(GraphmlError::Validation(
                "Graph name contains control characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate an archive input file
    pub fn validate_input_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(GraphmlError::Validation("Input path cannot be empty".to_string()));
        }

        if !path.exists() {
            return Err(GraphmlError::Validation(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(GraphmlError::Validation(format!(
                "Input path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Validate the GraphML output path
    pub fn validate_output_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(GraphmlError::Validation("Output path cannot be empty".to_string()));
        }

        if path.is_dir() {
            return Err(GraphmlError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(GraphmlError::Validation(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )))
            },
            _ => Ok(()),
        }
    }
}
