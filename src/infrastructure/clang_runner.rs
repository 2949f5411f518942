/// Clang runner.
///
/// Drives the host C compiler as the AST provider:
/// - system include discovery (`clang -v`)
/// - JSON AST dump of the translation units named by the forwarded arguments
/// - removal of the stray object file some compiler invocations leave behind

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use anyhow::{Context, Result, bail};

const SEARCH_LIST_START: &str = "#include <...> search starts here:";
const SEARCH_LIST_END: &str = "End of search list.";
const FRAMEWORK_SUFFIX: &str = " (framework directory)";

/// Object file a `-c` of `/dev/null` leaves in the working directory.
pub const STRAY_OBJECT: &str = "null.o";

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

/// Ask the compiler for its default `#include <...>` search directories.
pub fn discover_system_includes(clang: &str) -> Result<Vec<PathBuf>> {
    let spec = build_discovery_spec(clang);
    let output = run(&spec)?;

    if !output.status.success() {
        bail!(
            "{} include discovery failed with exit code {:?}: {}",
            clang,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let includes = parse_search_list(&String::from_utf8_lossy(&output.stderr));
    tracing::info!(count = includes.len(), "discovered system include directories");
    Ok(includes)
}

/// Run the compiler's JSON AST dump and return its raw stdout.
/// A failing exit status is only fatal when nothing was dumped.
pub fn dump_ast_json(clang: &str, args: &[String]) -> Result<Vec<u8>> {
    let spec = build_dump_spec(clang, args);
    tracing::info!(program = %spec.program, args = spec.args.len(), "running AST dump");
    let output = run(&spec)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.stdout.is_empty() {
            bail!(
                "{} could not parse the translation unit (exit code {:?}):\n{}",
                clang,
                output.status.code(),
                stderr.trim()
            );
        }
        tracing::warn!(code = ?output.status.code(), "{} reported errors:\n{}", clang, stderr.trim());
    }

    Ok(output.stdout)
}

/// Delete `null.o` in `dir` if a compiler invocation left one behind.
pub fn remove_stray_object(dir: &Path) -> Result<bool> {
    let path = dir.join(STRAY_OBJECT);
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
    tracing::debug!(path = %path.display(), "removed stray object file");
    Ok(true)
}

// ═══════════════════════════════════════════════════════════════════════════
// Internal Implementation
// ═══════════════════════════════════════════════════════════════════════════

fn run(spec: &ClangCommandSpec) -> Result<Output> {
    Command::new(&spec.program)
        .args(&spec.args)
        .output()
        .with_context(|| format!("Failed to execute {}. Is it installed and in PATH?", spec.program))
}

/// Directories listed between the search-list markers of `clang -v` output.
fn parse_search_list(stderr: &str) -> Vec<PathBuf> {
    let mut includes = Vec::new();
    let mut capture = false;

    for line in stderr.lines() {
        if line == SEARCH_LIST_END {
            capture = false;
        }
        if capture {
            let entry = line.trim();
            if !entry.is_empty() && !entry.ends_with(FRAMEWORK_SUFFIX) {
                includes.push(PathBuf::from(entry));
            }
        }
        if line == SEARCH_LIST_START {
            capture = true;
        }
    }
    includes
}

// ═══════════════════════════════════════════════════════════════════════════
// Testable Command Builders
// ═══════════════════════════════════════════════════════════════════════════

/// Describes a compiler invocation without running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangCommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

pub fn build_discovery_spec(clang: &str) -> ClangCommandSpec {
    ClangCommandSpec {
        program: clang.to_string(),
        args: ["-v", "-fsyntax-only", "-xc", "/dev/null"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn build_dump_spec(clang: &str, args: &[String]) -> ClangCommandSpec {
    let mut full = vec![
        "-fsyntax-only".to_string(),
        "-fno-color-diagnostics".to_string(),
        "-Xclang".to_string(),
        "-ast-dump=json".to_string(),
    ];
    full.extend(args.iter().cloned());
    ClangCommandSpec {
        program: clang.to_string(),
        args: full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CLANG_V_STDERR: &str = "clang version 17.0.6
Target: x86_64-pc-linux-gnu
#include \"...\" search starts here:
#include <...> search starts here:
 /usr/lib/llvm-17/lib/clang/17/include
 /usr/local/include
 /usr/include
 /System/Library/Frameworks (framework directory)
End of search list.
";

    #[test]
    fn test_parse_search_list() {
        let includes = parse_search_list(CLANG_V_STDERR);
        assert_eq!(
            includes,
            vec![
                PathBuf::from("/usr/lib/llvm-17/lib/clang/17/include"),
                PathBuf::from("/usr/local/include"),
                PathBuf::from("/usr/include"),
            ]
        );
    }

    #[test]
    fn test_parse_search_list_without_markers() {
        assert!(parse_search_list("clang: error: no input files\n").is_empty());
    }

    #[test]
    fn test_build_dump_spec_forwards_args_last() {
        let args = vec!["-I".to_string(), "include".to_string(), "main.c".to_string()];
        let spec = build_dump_spec("clang-17", &args);
        assert_eq!(spec.program, "clang-17");
        assert!(spec.args.contains(&"-ast-dump=json".to_string()));
        assert!(spec.args.contains(&"-fsyntax-only".to_string()));
        assert_eq!(&spec.args[spec.args.len() - 3..], args.as_slice());
    }

    #[test]
    fn test_build_discovery_spec() {
        let spec = build_discovery_spec("clang");
        assert_eq!(spec.args[0], "-v");
        assert_eq!(spec.args.last().unwrap(), "/dev/null");
    }

    #[test]
    fn test_remove_stray_object() {
        let dir = tempdir().unwrap();
        assert!(!remove_stray_object(dir.path()).unwrap());

        fs::write(dir.path().join(STRAY_OBJECT), b"\x7fELF").unwrap();
        assert!(remove_stray_object(dir.path()).unwrap());
        assert!(!dir.path().join(STRAY_OBJECT).exists());
    }

    #[test]
    #[ignore] // Requires clang to be installed
    fn test_discover_system_includes() {
        let includes = discover_system_includes("clang").unwrap();
        assert!(!includes.is_empty());
    }
}
