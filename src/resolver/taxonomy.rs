use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::TaxonomyKind;
use crate::fetcher::SharedApi;
use crate::normalizer;

type Attempts = HashMap<(TaxonomyKind, u64), Option<String>>;

/// Best-effort category/tag names for listing headings.
///
/// Each `(kind, id)` is looked up at most once, whatever the outcome. Failures
/// only show up in the debug log; the caller keeps its placeholder heading.
pub struct TaxonomyLabels {
    api: SharedApi,
    attempted: Mutex<Attempts>,
}

impl TaxonomyLabels {
    pub fn new(api: SharedApi) -> Self {
        Self {
            api,
            attempted: Mutex::new(HashMap::new()),
        }
    }

    pub async fn label(&self, kind: TaxonomyKind, id: u64) -> Option<String> {
        {
            let mut attempted = self.attempted.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(known) = attempted.get(&(kind, id)) {
                return known.clone();
            }
            // Claim the id so a concurrent caller does not issue a second lookup.
            attempted.insert((kind, id), None);
        }

        let name = match self.api.term(kind, id).await {
            Ok(body) => match normalizer::term(&body) {
                Some(term) => Some(term.name),
                None => {
                    tracing::debug!("No name in {} {} response", kind.slug(), id);
                    None
                }
            },
            Err(e) => {
                tracing::debug!("Lookup of {} {} failed: {}", kind.slug(), id, e);
                None
            }
        };

        if name.is_some() {
            self.attempted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert((kind, id), name.clone());
        }
        name
    }
}
