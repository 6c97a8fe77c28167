//! Extraction pipeline
//!
//! Drives the scanners over one module's source text: the literal scanner
//! runs once over the whole module, the signature matcher and variable
//! resolver run per scope. Every failure is scope-local - a candidate that
//! cannot be fully recovered contributes nothing and the scan moves on. The
//! pipeline holds no state between runs, so re-running over identical text
//! yields an identical descriptor sequence.

use std::fmt;

use crate::descriptor::Descriptor;
use crate::extract::{LiteralScanner, SignatureBindings, SignatureMatcher, VariableResolver};
use crate::repair::repair;
use crate::scope::{Scope, ScopeSplitter};

/// What to do when a single scope contains more than one qualifying
/// indirected declaration. The reference behavior never defined this; both
/// readings are supported and the first-match reading is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Use only the first matching declaration per scope.
    #[default]
    FirstPerScope,
    /// Recover a descriptor from every matching declaration in the scope.
    AllPerScope,
}

/// Counters for one module scan. Non-matches are not errors and are not
/// counted; only shape-matches that fail downstream are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub scopes: usize,
    pub inline_literals: usize,
    pub indirect_matches: usize,
    pub malformed_literals: usize,
    pub unresolved_variables: usize,
    pub repair_failures: usize,
}

impl ScanStats {
    /// Fold another module's counters into this one, for multi-module runs.
    pub fn merge(&mut self, other: &ScanStats) {
        self.scopes += other.scopes;
        self.inline_literals += other.inline_literals;
        self.indirect_matches += other.indirect_matches;
        self.malformed_literals += other.malformed_literals;
        self.unresolved_variables += other.unresolved_variables;
        self.repair_failures += other.repair_failures;
    }

    pub fn recovered(&self) -> usize {
        self.inline_literals + self.indirect_matches
    }
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Scopes scanned: {}", self.scopes)?;
        writeln!(f, "   Inline descriptors: {}", self.inline_literals)?;
        writeln!(f, "   Indirected descriptors: {}", self.indirect_matches)?;
        writeln!(f, "   Malformed literals: {}", self.malformed_literals)?;
        writeln!(f, "   Unresolved variables: {}", self.unresolved_variables)?;
        write!(f, "   Repair failures: {}", self.repair_failures)
    }
}

/// Result of scanning one module: the recovered descriptors in accumulation
/// order (inline first, then indirected per scope) plus the counters.
#[derive(Debug, Default)]
pub struct ModuleScan {
    pub descriptors: Vec<Descriptor>,
    pub stats: ScanStats,
}

/// The orchestrator. Construction is cheap; one extractor can scan any
/// number of modules.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    splitter: ScopeSplitter,
    policy: MatchPolicy,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.splitter = ScopeSplitter::new(delimiter);
        self
    }

    /// Scan one module's full source text.
    pub fn scan_module(&self, source: &str) -> ModuleScan {
        let mut stats = ScanStats::default();

        let literal_scan = LiteralScanner::scan(source);
        stats.inline_literals = literal_scan.descriptors.len();
        stats.malformed_literals = literal_scan.malformed;
        let mut descriptors = literal_scan.descriptors;

        let scopes = self.splitter.split(source);
        stats.scopes = scopes.len();
        for scope in &scopes {
            let matches = match self.policy {
                MatchPolicy::FirstPerScope => {
                    SignatureMatcher::find(scope.text).into_iter().collect()
                }
                MatchPolicy::AllPerScope => SignatureMatcher::find_all(scope.text),
            };
            for bindings in &matches {
                if let Some(descriptor) = self.recover(scope, bindings, &mut stats) {
                    tracing::debug!(name = %descriptor.name, "recovered indirected descriptor");
                    stats.indirect_matches += 1;
                    descriptors.push(descriptor);
                }
            }
        }

        ModuleScan { descriptors, stats }
    }

    /// Resolve and assemble one indirected candidate. Any unresolved
    /// identifier or failed field parse abandons the candidate.
    fn recover(
        &self,
        scope: &Scope<'_>,
        bindings: &SignatureBindings,
        stats: &mut ScanStats,
    ) -> Option<Descriptor> {
        let resolver = VariableResolver::new(scope.text);
        let mut raw = Vec::with_capacity(9);
        for (field, ident) in bindings.pairs() {
            match resolver.resolve(ident) {
                Some(text) => raw.push(text),
                None => {
                    let err = crate::Error::UnresolvedVariable(ident.to_string());
                    tracing::warn!(field, error = %err, "skipping candidate");
                    stats.unresolved_variables += 1;
                    return None;
                }
            }
        }

        // Literal fields are strict JSON string literals in the bundle
        let mut strings = Vec::with_capacity(4);
        for (field, text) in ["version", "name", "bytecode", "codeHash"]
            .into_iter()
            .zip(raw.iter().copied())
        {
            match serde_json::from_str::<String>(text) {
                Ok(value) => strings.push(value),
                Err(err) => {
                    tracing::warn!(field, error = %err, "literal field is not a string literal");
                    stats.repair_failures += 1;
                    return None;
                }
            }
        }

        // Structured fields go through relaxed-text repair
        let mut values = Vec::with_capacity(5);
        for (field, text) in ["fieldsSig", "eventsSig", "functions", "constants", "enums"]
            .into_iter()
            .zip(raw[4..].iter().copied())
        {
            match repair(text) {
                Ok(value) => values.push(value),
                Err(err) => {
                    tracing::warn!(field, error = %err, "repair failed, skipping candidate");
                    stats.repair_failures += 1;
                    return None;
                }
            }
        }

        let mut strings = strings.into_iter();
        let mut values = values.into_iter();
        Some(Descriptor {
            version: strings.next()?,
            name: strings.next()?,
            bytecode: strings.next()?,
            code_hash: strings.next()?,
            fields_sig: values.next()?,
            events_sig: values.next()?,
            functions: values.next()?,
            constants: values.next()?,
            enums: values.next()?,
        })
    }
}

/// Convenience wrapper: scan with default settings and return descriptors
/// only.
pub fn extract_descriptors(source: &str) -> Vec<Descriptor> {
    Extractor::new().scan_module(source).descriptors
}
