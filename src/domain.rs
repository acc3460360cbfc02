//! Domain Store (spec §4.4): the current candidate words for each slot,
//! with cheap copy-on-reduce for each backtracking frame.
//!
//! Each slot's domain is kept behind an `Rc`, so cloning a `DomainStore`
//! (to hand a reduced copy down to a recursive call, per spec §5's
//! memory model) only touches the slots that actually got narrower.
//! The rest of the `Vec<Rc<_>>` is a cheap pointer copy, and the parent
//! frame's view is left untouched because it still holds its own `Rc`s.

use std::rc::Rc;

use crate::types::{SlotId, WordId};

/// Ordered candidate `WordId`s for every slot.
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: Vec<Rc<Vec<WordId>>>,
}

impl DomainStore {
    /// Build a domain store with `initial[slot_id]` as slot `slot_id`'s
    /// starting domain.
    #[must_use]
    pub fn new(initial: Vec<Vec<WordId>>) -> DomainStore {
        DomainStore {
            domains: initial.into_iter().map(Rc::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self, slot_id: SlotId) -> usize {
        self.domains[slot_id].len()
    }

    #[must_use]
    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.domains[slot_id].is_empty()
    }

    #[must_use]
    pub fn words(&self, slot_id: SlotId) -> &[WordId] {
        &self.domains[slot_id]
    }

    /// Produce a new `DomainStore` agreeing with `self` everywhere
    /// except the slots named in `replacements`, which take the given
    /// values instead. `self` is left unchanged (spec §4.4's "framed
    /// reduction" contract).
    #[must_use]
    pub fn reduced(&self, replacements: impl IntoIterator<Item = (SlotId, Vec<WordId>)>) -> DomainStore {
        let mut domains = self.domains.clone();
        for (slot_id, new_domain) in replacements {
            #[cfg(feature = "check_invariants")]
            debug_assert!(
                new_domain.len() <= domains[slot_id].len(),
                "reduced domain for slot {slot_id} must not grow"
            );
            domains[slot_id] = Rc::new(new_domain);
        }
        DomainStore { domains }
    }

    pub fn slot_count(&self) -> usize {
        self.domains.len()
    }
}
