//! Ordered fallback strategies for a single field.
//!
//! Each field of a vacancy is resolved by trying strategies from the most
//! specific selector down to whole-page keyword heuristics. The first strategy
//! that yields a present value wins; later strategies are never evaluated.

use jobparse_core::WorkFormat;

use super::salary::Salary;

/// Whether an extracted value carries any information.
pub trait Present {
    fn is_present(&self) -> bool;
}

impl Present for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> Present for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Present for WorkFormat {
    fn is_present(&self) -> bool {
        match self {
            WorkFormat::Other(raw) => !raw.trim().is_empty(),
            _ => true,
        }
    }
}

impl Present for Salary {
    fn is_present(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.currency.is_some()
    }
}

type Strategy<'a, I, T> = Box<dyn Fn(&I) -> Option<T> + 'a>;

/// An ordered list of named extraction strategies for one field.
pub struct FallbackChain<'a, I: ?Sized, T> {
    field: &'static str,
    strategies: Vec<(&'static str, Strategy<'a, I, T>)>,
}

impl<'a, I: ?Sized, T: Present> FallbackChain<'a, I, T> {
    pub fn new(field: &'static str) -> Self {
        Self { field, strategies: Vec::new() }
    }

    /// Append a strategy tried after every strategy already in the chain.
    pub fn then(mut self, name: &'static str, strategy: impl Fn(&I) -> Option<T> + 'a) -> Self {
        self.strategies.push((name, Box::new(strategy)));
        self
    }

    /// Run strategies in order and return the first present value.
    pub fn resolve(&self, input: &I) -> Option<T> {
        for (name, strategy) in &self.strategies {
            if let Some(value) = strategy(input)
                && value.is_present()
            {
                tracing::debug!(field = self.field, strategy = name, "field resolved");
                return Some(value);
            }
        }

        tracing::debug!(field = self.field, tried = ?self.names(), "no strategy matched");
        None
    }

    /// Strategy names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(name, _)| *name).collect()
    }
}
