//! Predicate-gated selection of one source from an ordered rule list.
//!
//! Responsibilities:
//! - Evaluate rules strictly in declaration order; the first rule whose
//!   predicate matches and whose factory yields a source wins.
//! - Record why matched rules were rejected and fold that into `NoValidSource`
//!   when reporting is diagnostic.
//!
//! Does NOT handle:
//! - Reading from the selected source (callers do that with their own context).
//! - Parallel or cached rule evaluation.
//!
//! Invariants:
//! - Factories run lazily, at most once per `select`, and only for matched rules.
//! - Silent and diagnostic reporting walk the rules identically; only the
//!   returned error differs.
//! - A factory failure never aborts the walk.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::source::{BoxSource, Source};

type Predicate<K> = Box<dyn Fn(&K) -> bool + Send + Sync>;
type Factory<K> = Box<dyn Fn(&K) -> Result<Option<BoxSource>> + Send + Sync>;

/// How much detail a failed selection reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reporting {
    /// Only `NoValidSource`.
    #[default]
    Silent,
    /// `NoValidSource` carrying every rejected rule's failure, in order.
    Diagnostic,
}

/// A predicate paired with the factory it guards.
pub struct Rule<K> {
    predicate: Predicate<K>,
    factory: Factory<K>,
}

impl<K> Rule<K> {
    /// A rule whose factory may fail or produce no source.
    pub fn new<P, F>(predicate: P, factory: F) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
        F: Fn(&K) -> Result<Option<BoxSource>> + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            factory: Box::new(factory),
        }
    }

    /// A rule whose factory always produces a source.
    pub fn when<P, F, S>(predicate: P, then: F) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
        F: Fn(&K) -> S + Send + Sync + 'static,
        S: Source + 'static,
    {
        Self::new(predicate, move |key| Ok(Some(Box::new(then(key)) as BoxSource)))
    }

    /// A rule whose factory can fail while building the source.
    pub fn try_when<P, F, S>(predicate: P, then: F) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
        F: Fn(&K) -> Result<S> + Send + Sync + 'static,
        S: Source + 'static,
    {
        Self::new(predicate, move |key| {
            then(key).map(|source| Some(Box::new(source) as BoxSource))
        })
    }

    fn evaluate(&self, key: &K) -> Result<BoxSource> {
        if !(self.predicate)(key) {
            return Err(Error::RuleNotMatched);
        }
        (self.factory)(key)?.ok_or(Error::NilCapability)
    }
}

impl<K> fmt::Debug for Rule<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

/// Ordered chain of source rules evaluated against a selection key.
///
/// # Example
///
/// ```rust,ignore
/// use confstore::{FileSource, Rule, SourceSelector, is_local_path};
/// use confstore_http::{HttpSource, is_remote_url};
///
/// let selector = SourceSelector::new()
///     .rule(Rule::try_when(|loc: &String| is_remote_url(loc), |loc| HttpSource::builder(loc).build()))
///     .rule(Rule::when(|loc: &String| is_local_path(loc), |loc| FileSource::new(loc)))
///     .diagnostic();
/// let source = selector.select(&location)?;
/// ```
pub struct SourceSelector<K> {
    rules: Vec<Rule<K>>,
    reporting: Reporting,
}

impl<K> Default for SourceSelector<K> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            reporting: Reporting::default(),
        }
    }
}

impl<K> fmt::Debug for SourceSelector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSelector")
            .field("rules", &self.rules.len())
            .field("reporting", &self.reporting)
            .finish()
    }
}

impl<K> SourceSelector<K> {
    /// An empty, silent selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; it is evaluated after every rule already added.
    pub fn rule(mut self, rule: Rule<K>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a rule in place.
    pub fn push(&mut self, rule: Rule<K>) {
        self.rules.push(rule);
    }

    /// Report each rejected rule's failure alongside `NoValidSource`.
    pub fn diagnostic(self) -> Self {
        self.reporting(Reporting::Diagnostic)
    }

    pub fn reporting(mut self, reporting: Reporting) -> Self {
        self.reporting = reporting;
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Return the first source produced by a matching rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidSource`] if no rule produced a source. In
    /// diagnostic mode its causes list every factory failure and
    /// [`Error::NilCapability`] in rule order; unmatched rules are never listed.
    pub fn select(&self, key: &K) -> Result<BoxSource> {
        let mut causes = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            match rule.evaluate(key) {
                Ok(source) => {
                    debug!(rule = index, "Selected configuration source");
                    return Ok(source);
                }
                Err(Error::RuleNotMatched) => {
                    trace!(rule = index, "Source rule not matched");
                }
                Err(e) => {
                    trace!(rule = index, error = %e, "Source rule rejected");
                    if self.reporting == Reporting::Diagnostic {
                        causes.push(e);
                    }
                }
            }
        }
        debug!(rules = self.rules.len(), "No configuration source selected");
        Err(Error::NoValidSource { causes })
    }
}
