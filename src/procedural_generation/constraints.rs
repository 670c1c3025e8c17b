//! Named generation constraints
//!
//! A constraint pairs a [`ConstraintKind`] with the generator that samples it.
//! `yaw`, `tx`, `ty` and `tz` must always be present; `roll` and `pitch`
//! fall back to zero, `children` to a single child, and a missing
//! `max_depth` leaves expansion bounded only by the search's depth ceiling.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rand::RngCore;

use crate::common::{CorridorError, CorridorResult, ParameterGenerator};

/// Parameter sampled by a pose generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Roll,
    Pitch,
    Yaw,
    Tx,
    Ty,
    Tz,
    /// Nodes at or beyond the sampled depth produce no children
    MaxDepth,
    /// Number of children generated per expansion (rounded)
    Children,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 8] = [
        ConstraintKind::Roll,
        ConstraintKind::Pitch,
        ConstraintKind::Yaw,
        ConstraintKind::Tx,
        ConstraintKind::Ty,
        ConstraintKind::Tz,
        ConstraintKind::MaxDepth,
        ConstraintKind::Children,
    ];

    pub const REQUIRED: [ConstraintKind; 4] = [
        ConstraintKind::Yaw,
        ConstraintKind::Tx,
        ConstraintKind::Ty,
        ConstraintKind::Tz,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Roll => "roll",
            ConstraintKind::Pitch => "pitch",
            ConstraintKind::Yaw => "yaw",
            ConstraintKind::Tx => "tx",
            ConstraintKind::Ty => "ty",
            ConstraintKind::Tz => "tz",
            ConstraintKind::MaxDepth => "max_depth",
            ConstraintKind::Children => "children",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintKind {
    type Err = CorridorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CorridorError::configuration(format!("unknown constraint '{}'", s)))
    }
}

/// Generators keyed by the parameter they sample
#[derive(Default)]
pub struct Constraints {
    generators: HashMap<ConstraintKind, Box<dyn ParameterGenerator>>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with<G: ParameterGenerator + 'static>(mut self, kind: ConstraintKind, generator: G) -> Self {
        self.insert(kind, generator);
        self
    }

    /// Set the generator for `kind`, replacing any previous one
    pub fn insert<G: ParameterGenerator + 'static>(&mut self, kind: ConstraintKind, generator: G) {
        self.generators.insert(kind, Box::new(generator));
    }

    /// Set a generator by constraint name (`"yaw"`, `"max_depth"`, ...)
    pub fn insert_named<G: ParameterGenerator + 'static>(
        &mut self,
        name: &str,
        generator: G,
    ) -> CorridorResult<()> {
        let kind = name.parse()?;
        self.insert(kind, generator);
        Ok(())
    }

    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.generators.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Fails unless every required constraint has a generator
    pub fn validate(&self) -> CorridorResult<()> {
        let missing = ConstraintKind::REQUIRED
            .iter()
            .filter(|kind| !self.contains(**kind))
            .join(", ");
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CorridorError::configuration(format!(
                "missing required constraints: {}",
                missing
            )))
        }
    }

    /// One sample from the generator for `kind`, if configured
    pub fn sample(&mut self, kind: ConstraintKind, rng: &mut dyn RngCore) -> Option<f64> {
        self.generators.get_mut(&kind).map(|g| g.sample(rng))
    }

    /// One sample from a constraint that must be configured
    pub fn sample_required(&mut self, kind: ConstraintKind, rng: &mut dyn RngCore) -> CorridorResult<f64> {
        self.sample(kind, rng)
            .ok_or_else(|| CorridorError::configuration(format!("missing required constraint '{}'", kind)))
    }

    /// Reset every generator's sampling state
    pub fn reset(&mut self) {
        for generator in self.generators.values_mut() {
            generator.reset();
        }
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraints [{}]", self.generators.keys().sorted().join(", "))
    }
}
