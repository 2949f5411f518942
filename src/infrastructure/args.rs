use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Compiler-style arguments split into include roots and the argument list for the AST provider.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForwardedArgs {
    pub include_dirs: BTreeSet<PathBuf>,
    pub clang_args: Vec<String>,
}

impl ForwardedArgs {
    /// `.c` inputs contribute their directory, `-I<dir>` and `-I <dir>` contribute `<dir>`.
    /// Every argument is forwarded verbatim and in order.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = ForwardedArgs::default();
        let mut next_is_include = false;

        for arg in args {
            let arg: String = arg.into();

            if next_is_include {
                parsed.include_dirs.insert(PathBuf::from(&arg));
                next_is_include = false;
            } else if arg == "-I" {
                next_is_include = true;
            } else if let Some(dir) = arg.strip_prefix("-I") {
                parsed.include_dirs.insert(PathBuf::from(dir));
            }

            if arg.ends_with(".c") {
                parsed.include_dirs.insert(source_dir(Path::new(&arg)));
            }

            parsed.clang_args.push(arg);
        }
        parsed
    }

    /// Prefix the forwarded arguments with `-I <dir>` for each system include directory.
    pub fn with_system_includes(mut self, system_includes: &[PathBuf]) -> Self {
        let mut args = Vec::with_capacity(system_includes.len() * 2 + self.clang_args.len());
        for dir in system_includes {
            args.push("-I".to_string());
            args.push(dir.display().to_string());
        }
        args.append(&mut self.clang_args);
        self.clang_args = args;
        self
    }

    pub fn include_dirs(&self) -> Vec<PathBuf> {
        self.include_dirs.iter().cloned().collect()
    }
}

/// Directory of a source file; a bare file name lives in the working directory.
fn source_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(parsed: &ForwardedArgs) -> Vec<&str> {
        parsed.include_dirs.iter().map(|d| d.to_str().unwrap()).collect()
    }

    #[test]
    fn test_source_file_directory_is_root() {
        let parsed = ForwardedArgs::from_args(["src/app/main.c", "-O2"]);
        assert_eq!(dirs(&parsed), vec!["src/app"]);
        assert_eq!(parsed.clang_args, vec!["src/app/main.c", "-O2"]);
    }

    #[test]
    fn test_bare_file_name_uses_working_directory() {
        let parsed = ForwardedArgs::from_args(["main.c"]);
        assert_eq!(dirs(&parsed), vec!["."]);
    }

    #[test]
    fn test_include_flag_forms() {
        let parsed = ForwardedArgs::from_args(["-Iinclude", "-I", "third_party/lib", "-DDEBUG", "x.c"]);
        assert_eq!(dirs(&parsed), vec![".", "include", "third_party/lib"]);
        assert_eq!(parsed.clang_args.len(), 5);
    }

    #[test]
    fn test_dangling_include_flag() {
        let parsed = ForwardedArgs::from_args(["-I"]);
        assert!(parsed.include_dirs.is_empty());
        assert_eq!(parsed.clang_args, vec!["-I"]);
    }

    #[test]
    fn test_system_includes_are_prefixed() {
        let parsed = ForwardedArgs::from_args(["main.c"])
            .with_system_includes(&[PathBuf::from("/usr/include")]);
        assert_eq!(parsed.clang_args, vec!["-I", "/usr/include", "main.c"]);
        // System directories are forwarded, never owned.
        assert_eq!(dirs(&parsed), vec!["."]);
    }
}
