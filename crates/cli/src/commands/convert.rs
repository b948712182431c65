//! The `convert` subcommand: single-file and directory batch modes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

pub(crate) fn cmd_convert(
    path: &Path,
    output: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    if path.is_dir() {
        convert_directory(path, output, quiet)
    } else if path.is_file() {
        let out = match output {
            Some(out) => out.to_path_buf(),
            None => sibling_json_path(path),
        };
        convert_one(path, &out)?;
        if !quiet {
            println!("{} -> {}", path.display(), out.display());
        }
        Ok(())
    } else {
        Err(CliError::NotFound(path.to_path_buf()))
    }
}

/// Convert every .txt file directly in `dir` (non-recursive). With
/// `--output` the JSON files land in that directory, otherwise next to
/// their inputs.
fn convert_directory(dir: &Path, output: Option<&Path>, quiet: bool) -> Result<(), CliError> {
    let entries = fs::read_dir(dir).map_err(|source| CliError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut inputs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        return Err(CliError::EmptyBatch(dir.to_path_buf()));
    }

    if let Some(out_dir) = output {
        fs::create_dir_all(out_dir).map_err(|source| CliError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;
    }

    for input in &inputs {
        let out = match output {
            Some(out_dir) => out_dir.join(sibling_json_path(input).file_name().unwrap_or_default()),
            None => sibling_json_path(input),
        };
        convert_one(input, &out)?;
        if !quiet {
            println!("{} -> {}", input.display(), out.display());
        }
    }
    if !quiet {
        println!("converted {} file(s)", inputs.len());
    }
    Ok(())
}

/// Read, parse, serialize, write. The parse step cannot fail; a message
/// the core does not understand simply produces a sparse document.
fn convert_one(input: &Path, output: &Path) -> Result<(), CliError> {
    let raw = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let doc = mt103_core::parse(&raw);
    let json = mt103_core::to_json(&doc);
    let pretty = serde_json::to_string_pretty(&json).map_err(|e| CliError::Write {
        path: output.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    fs::write(output, pretty).map_err(|source| CliError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// `.txt` becomes `.json`; any other name gets `.json` appended.
fn sibling_json_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "txt") {
        input.with_extension("json")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".json");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_extension_is_replaced() {
        assert_eq!(
            sibling_json_path(Path::new("dir/sample_001.txt")),
            PathBuf::from("dir/sample_001.json")
        );
    }

    #[test]
    fn other_names_get_json_appended() {
        assert_eq!(
            sibling_json_path(Path::new("dir/message")),
            PathBuf::from("dir/message.json")
        );
        assert_eq!(
            sibling_json_path(Path::new("dir/message.mt")),
            PathBuf::from("dir/message.mt.json")
        );
    }
}
