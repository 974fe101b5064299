use std::collections::BTreeMap;

/// Symbol counts for one input, ordered by symbol.
///
/// Iteration order is fixed by the symbols themselves, so two inputs with
/// the same multiset of symbols produce identical maps regardless of the
/// order the symbols arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<Symbol> {
    counts: BTreeMap<Symbol, usize>,
}

impl<Symbol: Ord> FrequencyMap<Symbol> {
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut counts = BTreeMap::new();
        for s in symbols {
            *counts.entry(s).or_default() += 1;
        }

        Self { counts }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<usize> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.counts.iter().map(|(s, &c)| (s, c))
    }
}

impl<Symbol: Ord> FromIterator<Symbol> for FrequencyMap<Symbol> {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}
