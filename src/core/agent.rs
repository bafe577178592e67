use serde::{Deserialize, Serialize};

use crate::core::cell::{Cell, CellKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Boy,
    Girl,
    Robot,
}

/// Agent kinds in input order. The roster is grouped by kind in this order.
pub const AGENT_KINDS: [AgentKind; 3] = [AgentKind::Boy, AgentKind::Girl, AgentKind::Robot];

impl AgentKind {
    /// The disposal target only this kind can clear.
    #[inline]
    pub fn target(self) -> CellKind {
        match self {
            AgentKind::Boy => CellKind::Pool,
            AgentKind::Girl => CellKind::Apple,
            AgentKind::Robot => CellKind::Bottle,
        }
    }

    /// The box this kind empties its hands into. Boys never carry anything.
    #[inline]
    pub fn deposit_box(self) -> Option<CellKind> {
        match self {
            AgentKind::Boy => None,
            AgentKind::Girl => Some(CellKind::DustBox),
            AgentKind::Robot => Some(CellKind::RecycleBox),
        }
    }

    #[inline]
    pub fn can_clear(self, kind: CellKind) -> bool {
        match kind {
            CellKind::Dirty => true,
            CellKind::Pool | CellKind::Apple | CellKind::Bottle => kind == self.target(),
            _ => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Boy => "Boy",
            AgentKind::Girl => "Girl",
            AgentKind::Robot => "Robot",
        }
    }
}

/// A cleaner walking the board.
///
/// `previous` starts out equal to `start`, which is never adjacent to itself, so the
/// no-U-turn rule does not constrain the first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub kind: AgentKind,
    pub steps: u32,
    pub budget: u32,
    pub position: Cell,
    pub previous: Cell,
    pub start: Cell,
    /// Apples or bottles picked up and not yet dropped into a box.
    pub carried: u32,
}

impl Agent {
    pub fn new(kind: AgentKind, start: Cell, budget: u32) -> Self {
        Self {
            kind,
            steps: 0,
            budget,
            position: start,
            previous: start,
            start,
            carried: 0,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.steps >= self.budget
    }

    /// Budget used for reachability estimates, widened by `tolerance`.
    #[inline]
    pub fn reach_budget(&self, tolerance: u32) -> u32 {
        self.budget.saturating_add(tolerance)
    }
}
