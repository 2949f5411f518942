use super::Checker;
use crate::domain::ast::{SourceLocation, TypeInfo};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::include_set::absolute_path;
use std::io;

impl<'a, 'ast> Checker<'a, 'ast> {
    /// Report `left` and `right` if their declared spellings differ and `location` lies in a
    /// project-owned file. Canonical spellings are carried along but never decide anything.
    pub(super) fn compare(
        &mut self,
        left: &TypeInfo,
        right: &TypeInfo,
        location: Option<&SourceLocation>,
        message: &str,
        tail: Option<String>,
    ) -> io::Result<()> {
        if left.spelling == right.spelling {
            return Ok(());
        }

        let Some(location) = location else {
            return Ok(());
        };

        if !self.includes.contains(&absolute_path(&location.file)) {
            tracing::trace!(%location, "mismatch outside include roots");
            return Ok(());
        }

        let diagnostic = Diagnostic {
            message: message.to_string(),
            location: location.clone(),
            left: left.clone(),
            right: right.clone(),
            tail,
        };
        self.sink.emit(&diagnostic)?;
        self.reported += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::include_set::IncludeSet;
    use std::path::PathBuf;

    fn typed(spelling: &str, canonical: &str) -> TypeInfo {
        TypeInfo::new(spelling, canonical)
    }

    fn owned(file: &str) -> IncludeSet {
        vec![PathBuf::from(file)].into_iter().collect()
    }

    #[test]
    fn test_same_spelling_is_silent() {
        let includes = owned("owned.c");
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut checker = Checker::new(&includes, &mut sink);
        let loc = SourceLocation::new("owned.c", 1, 1);

        checker
            .compare(&typed("int", "int"), &typed("int", "int"), Some(&loc), "msg", None)
            .unwrap();
        assert_eq!(checker.reported(), 0);
    }

    #[test]
    fn test_alias_with_same_canonical_is_reported() {
        let includes = owned("owned.c");
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut checker = Checker::new(&includes, &mut sink);
        let loc = SourceLocation::new("owned.c", 3, 7);

        checker
            .compare(&typed("int", "int"), &typed("MyInt", "int"), Some(&loc), "msg", None)
            .unwrap();
        assert_eq!(checker.reported(), 1);
        drop(checker);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].right.spelling, "MyInt");
        assert!(sink[0].canonically_equal());
    }

    #[test]
    fn test_foreign_file_is_filtered() {
        let includes = owned("owned.c");
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut checker = Checker::new(&includes, &mut sink);
        let loc = SourceLocation::new("/usr/include/stdio.h", 3, 7);

        checker
            .compare(&typed("int", "int"), &typed("long", "long"), Some(&loc), "msg", None)
            .unwrap();
        checker
            .compare(&typed("int", "int"), &typed("long", "long"), None, "msg", None)
            .unwrap();
        assert_eq!(checker.reported(), 0);
    }
}
