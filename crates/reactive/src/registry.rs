//! The callback registry: which outputs depend on which inputs, and how each
//! output is derived.
//!
//! The registry is generic over a context `C` (shared read-only state such as
//! the dataset store) and an artifact type `A` (what a derivation produces).
//! It holds no per-session state, so one registry serves every session.

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use explorer_common::{ExplorerError, ExplorerResult, InputId, InputState, OutputId};

use crate::inputs::InputSnapshot;
use crate::memo::MemoCache;

/// A derivation closure.
pub type Derivation<C, A> = Box<dyn Fn(&C, &InputSnapshot) -> ExplorerResult<A> + Send + Sync>;

struct Callback<C, A> {
    deps: BTreeSet<InputId>,
    derive: Derivation<C, A>,
}

/// Result of one recomputation during propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputed<A> {
    pub output: OutputId,
    pub result: ExplorerResult<A>,
}

pub struct Registry<C, A> {
    callbacks: BTreeMap<OutputId, Callback<C, A>>,
    memo: Option<MemoCache<A>>,
}

impl<C, A: Clone> Default for Registry<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A: Clone> Registry<C, A> {
    pub fn new() -> Self {
        Self {
            callbacks: BTreeMap::new(),
            memo: None,
        }
    }

    /// Cache successful results keyed by output and input snapshot.
    ///
    /// Only sound while the registry is always evaluated against the same
    /// context.
    pub fn with_memo(mut self, capacity: NonZeroUsize) -> Self {
        self.memo = Some(MemoCache::new(capacity));
        self
    }

    /// Register the derivation of `output`.
    ///
    /// Each output may have exactly one derivation.
    pub fn register<F>(
        &mut self,
        output: OutputId,
        deps: impl IntoIterator<Item = InputId>,
        derive: F,
    ) -> ExplorerResult<()>
    where
        F: Fn(&C, &InputSnapshot) -> ExplorerResult<A> + Send + Sync + 'static,
    {
        if self.callbacks.contains_key(&output) {
            return Err(ExplorerError::DuplicateOutput(output.to_string()));
        }
        let deps: BTreeSet<InputId> = deps.into_iter().collect();
        tracing::debug!(output = %output, deps = ?deps, "Registered output");
        self.callbacks.insert(
            output,
            Callback {
                deps,
                derive: Box::new(derive),
            },
        );
        Ok(())
    }

    /// Registered outputs in id order.
    pub fn outputs(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.callbacks.keys().copied()
    }

    pub fn contains(&self, output: OutputId) -> bool {
        self.callbacks.contains_key(&output)
    }

    pub fn dependencies(&self, output: OutputId) -> Option<&BTreeSet<InputId>> {
        self.callbacks.get(&output).map(|c| &c.deps)
    }

    /// Outputs whose dependency set contains `input`, in id order.
    pub fn dependents(&self, input: InputId) -> Vec<OutputId> {
        self.callbacks
            .iter()
            .filter(|(_, c)| c.deps.contains(&input))
            .map(|(&output, _)| output)
            .collect()
    }

    /// Run the derivation of `output` against the current inputs.
    pub fn evaluate(&self, output: OutputId, ctx: &C, inputs: &InputState) -> ExplorerResult<A> {
        let callback = self
            .callbacks
            .get(&output)
            .ok_or_else(|| ExplorerError::UnknownOutput(output.to_string()))?;
        let snapshot = InputSnapshot::capture(inputs, &callback.deps);

        if let Some(memo) = &self.memo {
            if let Some(hit) = memo.get(output, &snapshot) {
                return Ok(hit);
            }
        }

        let artifact = (callback.derive)(ctx, &snapshot)?;
        if let Some(memo) = &self.memo {
            memo.put(output, snapshot, artifact.clone());
        }
        Ok(artifact)
    }

    /// Evaluate each of `outputs`, one result per output.
    pub fn evaluate_all(
        &self,
        outputs: &[OutputId],
        ctx: &C,
        inputs: &InputState,
    ) -> Vec<Recomputed<A>> {
        outputs
            .iter()
            .map(|&output| Recomputed {
                output,
                result: self.evaluate(output, ctx, inputs),
            })
            .collect()
    }

    /// Recompute every mounted dependent of a changed input.
    ///
    /// A failing output does not stop the others.
    pub fn propagate(
        &self,
        input: InputId,
        ctx: &C,
        inputs: &InputState,
        mounted: &[OutputId],
    ) -> Vec<Recomputed<A>> {
        let affected: Vec<OutputId> = self
            .dependents(input)
            .into_iter()
            .filter(|o| mounted.contains(o))
            .collect();
        tracing::debug!(input = %input, affected = affected.len(), "Propagating input change");
        self.evaluate_all(&affected, ctx, inputs)
    }

    pub fn memo(&self) -> Option<&MemoCache<A>> {
        self.memo.as_ref()
    }
}
