use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoding over a vocabulary learned at fit time. Unknown values
/// encode as all zeros for their column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    /// Sorted distinct values per column.
    pub fn fit<const N: usize>(samples: &[[&str; N]]) -> Self {
        let mut seen: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); N];
        for sample in samples {
            for (set, value) in seen.iter_mut().zip(sample) {
                set.insert(*value);
            }
        }

        let categories = seen
            .into_iter()
            .map(|set| set.into_iter().map(str::to_string).collect())
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    pub fn encode_into(&self, values: &[&str], out: &mut Vec<f64>) {
        for (vocab, value) in self.categories.iter().zip(values) {
            out.extend(vocab.iter().map(|c| if c == value { 1.0 } else { 0.0 }));
        }
    }
}
