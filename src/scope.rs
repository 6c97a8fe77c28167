//! Scope - the search horizon for variable resolution
//!
//! Bundler output keeps a descriptor's supporting variables inside the same
//! top-level declaration block, so lexical scope is approximated by splitting
//! the module on a declaration keyword boundary. Each scope carries explicit
//! byte offsets into the module text so the resolver's horizon stays a
//! testable value rather than a string-splitting artifact.

/// A contiguous slice of module source text.
///
/// `start`/`end` are byte offsets into the module the scope was split from;
/// `text` is the corresponding slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl<'a> Scope<'a> {
    /// Length of the scope slice in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Partitions a module into scopes on a fixed declaration keyword boundary.
///
/// The default delimiter is `"const "`, matching the declaration form the
/// known bundler family emits for descriptor blocks. The segment before the
/// first delimiter is itself a scope. This is a heuristic approximation of
/// lexical scoping, not a scope graph.
#[derive(Debug, Clone)]
pub struct ScopeSplitter {
    delimiter: String,
}

impl Default for ScopeSplitter {
    fn default() -> Self {
        Self::new("const ")
    }
}

impl ScopeSplitter {
    /// Create a splitter with a custom declaration delimiter.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Split module source into non-overlapping scopes covering it in order.
    ///
    /// The delimiter itself is not part of any scope slice.
    pub fn split<'a>(&self, source: &'a str) -> Vec<Scope<'a>> {
        let mut scopes = Vec::new();
        let mut cursor = 0usize;
        for (at, _) in source.match_indices(&self.delimiter) {
            if at >= cursor {
                scopes.push(Scope {
                    start: cursor,
                    end: at,
                    text: &source[cursor..at],
                });
                cursor = at + self.delimiter.len();
            }
        }
        scopes.push(Scope {
            start: cursor,
            end: source.len(),
            text: &source[cursor..],
        });
        scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_offsets_match_slices() {
        let source = "prefix;const a=1,b=2;const c=3;";
        let scopes = ScopeSplitter::default().split(source);
        assert_eq!(scopes.len(), 3);
        for scope in &scopes {
            assert_eq!(&source[scope.start..scope.end], scope.text);
        }
        assert_eq!(scopes[0].text, "prefix;");
        assert_eq!(scopes[1].text, "a=1,b=2;");
        assert_eq!(scopes[2].text, "c=3;");
    }

    #[test]
    fn test_no_delimiter_yields_whole_module() {
        let source = "var x = 1;";
        let scopes = ScopeSplitter::default().split(source);
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].text, source);
        assert_eq!(scopes[0].start, 0);
        assert_eq!(scopes[0].end, source.len());
    }

    #[test]
    fn test_custom_delimiter() {
        let source = "a;let b=1;let c=2;";
        let scopes = ScopeSplitter::new("let ").split(source);
        assert_eq!(scopes.len(), 3);
        assert_eq!(scopes[2].text, "c=2;");
    }

    #[test]
    fn test_empty_source() {
        let scopes = ScopeSplitter::default().split("");
        assert_eq!(scopes.len(), 1);
        assert!(scopes[0].is_empty());
    }
}
