//! Phased system scheduler.
//!
//! Systems are registered with a phase and optional `before` / `after`
//! constraints on other systems. [`Schedule::build`] orders every phase
//! topologically; among systems with no constraint between them, registration
//! order is kept.

use std::collections::{HashMap, VecDeque};

use crate::error::ScheduleError;
use crate::runtime::UiRuntime;
use crate::world::World;

pub type SystemFn = fn(&mut World, &mut UiRuntime);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Runs once, before the first frame.
    Startup,
    PreUpdate,
    Update,
    PostUpdate,
    Last,
}

impl Phase {
    /// Phases run by every frame, in order.
    pub const FRAME: [Phase; 4] = [Phase::PreUpdate, Phase::Update, Phase::PostUpdate, Phase::Last];
}

pub struct SystemDescriptor {
    name: String,
    phase: Phase,
    run: SystemFn,
    before: Vec<String>,
    after: Vec<String>,
}

impl SystemDescriptor {
    pub fn new(name: impl Into<String>, phase: Phase, run: SystemFn) -> Self {
        Self {
            name: name.into(),
            phase,
            run,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Run this system before `other`.
    pub fn before(mut self, other: impl Into<String>) -> Self {
        self.before.push(other.into());
        self
    }

    /// Run this system after `other`.
    pub fn after(mut self, other: impl Into<String>) -> Self {
        self.after.push(other.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[derive(Default)]
pub struct Schedule {
    systems: Vec<SystemDescriptor>,
    /// Indices into `systems` per phase, valid after `build`.
    order: HashMap<Phase, Vec<usize>>,
    built: bool,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_system(&mut self, system: SystemDescriptor) -> Result<(), ScheduleError> {
        if self.systems.iter().any(|s| s.name == system.name) {
            return Err(ScheduleError::DuplicateSystem(system.name));
        }
        self.systems.push(system);
        self.built = false;
        Ok(())
    }

    /// Unregister a system by name. Returns whether it existed.
    pub fn remove_system(&mut self, name: &str) -> bool {
        let before = self.systems.len();
        self.systems.retain(|s| s.name != name);
        if self.systems.len() == before {
            return false;
        }
        self.order.clear();
        self.built = false;
        true
    }

    /// Order every phase. Must be called after the last registration.
    pub fn build(&mut self) -> Result<(), ScheduleError> {
        let index: HashMap<&str, usize> = self
            .systems
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();

        // Edges point from the system that runs first.
        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); self.systems.len()];
        for (i, system) in self.systems.iter().enumerate() {
            for (targets, runs_first) in [(&system.before, true), (&system.after, false)] {
                for target in targets {
                    let Some(&j) = index.get(target.as_str()) else {
                        return Err(ScheduleError::UnknownSystem {
                            system: system.name.clone(),
                            target: target.clone(),
                        });
                    };
                    // Constraints across phases are already satisfied by phase order.
                    if self.systems[j].phase != system.phase {
                        continue;
                    }
                    if runs_first {
                        edges[i].push(j);
                    } else {
                        edges[j].push(i);
                    }
                }
            }
        }

        let mut order = HashMap::new();
        for phase in [Phase::Startup, Phase::PreUpdate, Phase::Update, Phase::PostUpdate, Phase::Last] {
            let members: Vec<usize> = (0..self.systems.len())
                .filter(|&i| self.systems[i].phase == phase)
                .collect();
            order.insert(phase, self.sort_phase(&members, &edges)?);
        }

        self.order = order;
        self.built = true;
        for phase in Phase::FRAME {
            log::debug!("{phase:?}: {:?}", self.system_names(phase));
        }
        Ok(())
    }

    /// Kahn's algorithm over one phase, picking the earliest registered ready
    /// system first.
    fn sort_phase(&self, members: &[usize], edges: &[Vec<usize>]) -> Result<Vec<usize>, ScheduleError> {
        let mut in_degree: HashMap<usize, usize> = members.iter().map(|&i| (i, 0)).collect();
        for &i in members {
            for &j in &edges[i] {
                if let Some(d) = in_degree.get_mut(&j) {
                    *d += 1;
                }
            }
        }

        let mut ready: VecDeque<usize> = members
            .iter()
            .copied()
            .filter(|i| in_degree[i] == 0)
            .collect();
        let mut sorted = Vec::with_capacity(members.len());

        while let Some(i) = ready.pop_front() {
            sorted.push(i);
            for &j in &edges[i] {
                if let Some(d) = in_degree.get_mut(&j) {
                    *d -= 1;
                    if *d == 0 {
                        let pos = ready.iter().position(|&r| r > j).unwrap_or(ready.len());
                        ready.insert(pos, j);
                    }
                }
            }
        }

        if sorted.len() < members.len() {
            let stuck = members
                .iter()
                .filter(|i| !sorted.contains(i))
                .map(|&i| self.systems[i].name.clone())
                .collect();
            return Err(ScheduleError::Cycle(stuck));
        }
        Ok(sorted)
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// System names of a phase in run order. Empty before `build`.
    pub fn system_names(&self, phase: Phase) -> Vec<&str> {
        self.order
            .get(&phase)
            .map(|ids| ids.iter().map(|&i| self.systems[i].name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn run_phase(&self, phase: Phase, world: &mut World, runtime: &mut UiRuntime) {
        let Some(ids) = self.order.get(&phase) else {
            return;
        };
        for &i in ids {
            (self.systems[i].run)(world, runtime);
        }
    }
}
