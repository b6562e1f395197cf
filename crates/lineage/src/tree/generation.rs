//! Generation assignment
//!
//! Every person gets an integer generation: parents sit above their children
//! and spouses share a row. Generations are found by relaxation from root
//! people (those without a recorded parent). A person's tentative generation
//! only ever decreases, and each decrease is one relaxation step.
//!
//! Seeding happens in passes:
//!
//! 1. Anchor roots at generation 0. A root is an anchor unless someone in
//!    its spouse component has a recorded parent; such "married-in" roots
//!    are deferred so they inherit their spouse's generation instead of
//!    pulling the whole family up to 0.
//! 2. Deferred roots that are still unassigned, at generation 0.
//! 3. Anyone still unassigned (parent cycles cut off from every root), one
//!    at a time in input order, at generation 0.
//!
//! Each pass, and each seed of the third pass, only writes people that are
//! unassigned or were assigned by that same pass. A later seed never lowers
//! a generation an earlier one settled, so a cycle hanging off a placed
//! family cannot pull its descendants upwards.
//!
//! If the snapshot has no root at all, nothing is propagated and every
//! person gets its input position as generation. This is a crude fallback
//! for fully cyclic data and is flagged as such in the outcome.
//!
//! Propagation runs on a double-ended worklist: spouse relaxations (same
//! generation) go to the front, child relaxations (one deeper) go to the
//! back, so candidates leave the queue in nondecreasing generation order and
//! the stack depth never depends on the size of the tree. A step cap bounds
//! the total work; hitting it keeps whatever was assigned so far.
//!
//! Within a pass the first generation a person receives is already its
//! smallest, so the step count never exceeds the number of people and the
//! cap only guards against regressions.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, span, trace, warn, Level};

use super::RelationshipIndex;
use crate::core::LayoutConfig;

/// Generation number; lower renders higher
pub type Generation = usize;

/// How the generations in a [`GenerationMap`] were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// Relaxation ran to completion
    Propagated,
    /// No root existed; generations are input positions
    InputOrderFallback,
    /// The step cap stopped relaxation; the result is best effort
    StepCapReached,
}

impl AssignmentOutcome {
    /// Returns true if the parent/spouse invariants may not hold
    pub fn is_degraded(&self) -> bool {
        !matches!(self, AssignmentOutcome::Propagated)
    }
}

/// One person's generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationEntry {
    pub id: String,
    pub generation: Generation,
}

/// Generation per person, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationMap {
    entries: Vec<GenerationEntry>,
    outcome: AssignmentOutcome,
    relaxation_steps: usize,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

impl GenerationMap {
    fn new(
        index: &RelationshipIndex<'_>,
        generations: Vec<Generation>,
        outcome: AssignmentOutcome,
        relaxation_steps: usize,
    ) -> Self {
        let entries: Vec<GenerationEntry> = index
            .people()
            .iter()
            .zip(generations)
            .map(|(person, generation)| GenerationEntry {
                id: person.id.clone(),
                generation,
            })
            .collect();
        let lookup = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.id.clone(), i))
            .collect();

        Self {
            entries,
            outcome,
            relaxation_steps,
            lookup,
        }
    }

    /// Generation of a person id
    pub fn get(&self, id: &str) -> Option<Generation> {
        self.lookup.get(id).map(|&i| self.entries[i].generation)
    }

    /// Generation at an index position of the [`RelationshipIndex`]
    pub fn at(&self, index: usize) -> Generation {
        self.entries[index].generation
    }

    /// Entries in input order
    pub fn entries(&self) -> &[GenerationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Generation)> {
        self.entries.iter().map(|e| (e.id.as_str(), e.generation))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn outcome(&self) -> AssignmentOutcome {
        self.outcome
    }

    /// Number of strict decreases performed
    pub fn relaxation_steps(&self) -> usize {
        self.relaxation_steps
    }

    /// Distinct generation values, ascending
    pub fn distinct(&self) -> Vec<Generation> {
        let mut values: Vec<Generation> = self.entries.iter().map(|e| e.generation).collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

/// Worklist state for one assignment run
struct Relaxation<'i, 'a> {
    index: &'i RelationshipIndex<'a>,
    assigned: Vec<Option<Generation>>,
    queue: VecDeque<(usize, Generation)>,
    /// Pass that wrote each assigned person
    pass_of: Vec<usize>,
    pass: usize,
    /// Lowerings refused because the person belongs to an earlier pass
    kept: usize,
    steps: usize,
    cap: usize,
    capped: bool,
}

impl<'i, 'a> Relaxation<'i, 'a> {
    fn new(index: &'i RelationshipIndex<'a>, cap: usize) -> Self {
        Self {
            index,
            assigned: vec![None; index.len()],
            queue: VecDeque::new(),
            pass_of: vec![0; index.len()],
            pass: 0,
            kept: 0,
            steps: 0,
            cap,
            capped: false,
        }
    }

    /// Freeze everything assigned so far
    fn next_pass(&mut self) {
        self.pass += 1;
    }

    fn seed(&mut self, person: usize) {
        self.queue.push_back((person, 0));
    }

    fn is_assigned(&self, person: usize) -> bool {
        self.assigned[person].is_some()
    }

    /// Drain the worklist, improving generations until nothing changes
    fn run(&mut self) {
        while let Some((person, generation)) = self.queue.pop_front() {
            match self.assigned[person] {
                Some(current) if current <= generation => continue,
                Some(_) if self.pass_of[person] != self.pass => {
                    trace!(
                        person_id = %self.index.person(person).id,
                        candidate = generation,
                        "Keeping generation from an earlier pass"
                    );
                    self.kept += 1;
                    continue;
                }
                _ => {}
            }
            if self.steps >= self.cap {
                warn!(
                    steps = self.steps,
                    cap = self.cap,
                    pending = self.queue.len() + 1,
                    "Relaxation step cap reached, keeping partial assignment"
                );
                self.capped = true;
                self.queue.clear();
                return;
            }

            trace!(
                person_id = %self.index.person(person).id,
                from = ?self.assigned[person],
                to = generation,
                "Relaxing generation"
            );
            self.assigned[person] = Some(generation);
            self.pass_of[person] = self.pass;
            self.steps += 1;

            for &spouse in self.index.spouses_of(person) {
                self.queue.push_front((spouse, generation));
            }
            for &child in self.index.children_of(person) {
                self.queue.push_back((child, generation + 1));
            }
        }
    }

    fn finish(self) -> (Vec<Generation>, usize, bool) {
        if self.kept > 0 {
            debug!(kept = self.kept, "Earlier generations kept against later seeds");
        }
        let generations = self.assigned.into_iter().map(|g| g.unwrap_or(0)).collect();
        (generations, self.steps, self.capped)
    }
}

/// Assigns generations from a [`RelationshipIndex`]
#[derive(Debug, Clone, Default)]
pub struct GenerationAssigner {
    config: LayoutConfig,
}

impl GenerationAssigner {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Compute a generation for every person in the index
    pub fn assign(&self, index: &RelationshipIndex<'_>) -> GenerationMap {
        let assign_span = span!(Level::DEBUG, "assign_generations", person_count = index.len());
        let _enter = assign_span.enter();

        if index.is_empty() {
            return GenerationMap::new(index, Vec::new(), AssignmentOutcome::Propagated, 0);
        }

        let roots: Vec<usize> = index.roots().collect();
        if roots.is_empty() {
            warn!(
                person_count = index.len(),
                "No root person found, using input order as generations"
            );
            let generations = (0..index.len()).collect();
            return GenerationMap::new(index, generations, AssignmentOutcome::InputOrderFallback, 0);
        }

        let married_in = Self::married_into_parented_family(index);
        let (deferred, anchors): (Vec<usize>, Vec<usize>) =
            roots.iter().copied().partition(|&root| married_in[root]);
        debug!(
            root_count = roots.len(),
            anchor_count = anchors.len(),
            deferred_count = deferred.len(),
            "Detected roots"
        );

        let cap = self.config.step_cap(index.len());
        let mut relaxation = Relaxation::new(index, cap);

        for &anchor in &anchors {
            relaxation.seed(anchor);
        }
        relaxation.run();

        if !relaxation.capped {
            relaxation.next_pass();
            for &root in &deferred {
                if !relaxation.is_assigned(root) {
                    relaxation.seed(root);
                }
            }
            relaxation.run();
        }

        let mut orphaned = 0;
        for person in 0..index.len() {
            if relaxation.capped {
                break;
            }
            if !relaxation.is_assigned(person) {
                orphaned += 1;
                relaxation.next_pass();
                relaxation.seed(person);
                relaxation.run();
            }
        }
        if orphaned > 0 {
            debug!(orphaned, "Seeded people unreachable from any root");
        }

        let (generations, steps, capped) = relaxation.finish();
        let outcome = if capped {
            AssignmentOutcome::StepCapReached
        } else {
            AssignmentOutcome::Propagated
        };
        debug!(steps, cap, ?outcome, "Generation assignment completed");

        GenerationMap::new(index, generations, outcome, steps)
    }

    /// Marks everyone whose spouse component contains a person with a parent
    fn married_into_parented_family(index: &RelationshipIndex<'_>) -> Vec<bool> {
        let mut flags = vec![false; index.len()];
        let mut visited = vec![false; index.len()];

        for person in 0..index.len() {
            if visited[person] {
                continue;
            }
            let component = index.spouse_component(person);
            let parented = component.iter().any(|&p| index.has_parent(p));
            for &member in &component {
                visited[member] = true;
                flags[member] = parented;
            }
        }
        flags
    }
}
