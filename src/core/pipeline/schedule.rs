//! Per-instruction stage cycle table.
//!
//! A [`Schedule`] holds one row per scheduled instruction and one column per
//! stage. Each cell is the absolute clock cycle (1-based) at which the
//! instruction occupies that stage. Schedules are values: stall insertion
//! produces a new schedule and leaves the original untouched.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::{Stage, NUM_STAGES};

/// Cycles for Fetch, Decode, Execute, Memory and Writeback.
pub type StageCycles = [u64; NUM_STAGES];

/// Column width used when drawing the pipeline diagram.
const CELL_WIDTH: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    rows: Vec<StageCycles>,
}

impl Schedule {
    /// Fully overlapped schedule: one instruction issued per cycle.
    ///
    /// Instruction `i` (0-based) fetches in cycle `i + 1` and spends one cycle
    /// in each following stage.
    pub fn naive(count: usize) -> Self {
        let rows = (0..count)
            .map(|i| -> StageCycles { std::array::from_fn(|s| (i + s + 1) as u64) })
            .collect();
        Self { rows }
    }

    /// Number of scheduled instructions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StageCycles] {
        &self.rows
    }

    /// Row for instruction `number` (1-based).
    pub fn row(&self, number: usize) -> Option<&StageCycles> {
        self.rows.get(number.checked_sub(1)?)
    }

    /// Cycle at which instruction `number` occupies `stage`, or 0 if the
    /// instruction is not scheduled.
    pub fn cycle(&self, number: usize, stage: Stage) -> u64 {
        self.row(number).map_or(0, |row| row[stage.index()])
    }

    /// Fixed-height view with `width` rows; missing rows are all zero and
    /// rows past `width` are cut off.
    pub fn padded(&self, width: usize) -> Vec<StageCycles> {
        (0..width)
            .map(|i| self.rows.get(i).copied().unwrap_or([0; NUM_STAGES]))
            .collect()
    }

    /// Cycle in which the last instruction writes back, 0 if empty.
    pub fn total_cycles(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| row[Stage::Writeback.index()])
            .max()
            .unwrap_or(0)
    }

    /// Bubble cycles sitting between Fetch and Decode of instruction `number`.
    pub fn bubbles_before_decode(&self, number: usize) -> u64 {
        self.row(number).map_or(0, |row| {
            row[Stage::Decode.index()]
                .saturating_sub(row[Stage::Fetch.index()])
                .saturating_sub(1)
        })
    }

    /// Returns a copy with `cycles` bubbles inserted after the Fetch stage of
    /// instruction `number`.
    ///
    /// The instruction's Decode through Writeback move back by `cycles`, and
    /// every later instruction moves back by `cycles` in all five stages.
    pub fn with_stall(&self, number: usize, cycles: u64) -> Self {
        let mut next = self.clone();
        next.insert_stall(number, cycles);
        next
    }

    fn insert_stall(&mut self, number: usize, cycles: u64) {
        let Some(idx) = number.checked_sub(1) else {
            return;
        };
        if idx >= self.rows.len() || cycles == 0 {
            return;
        }
        for cycle in &mut self.rows[idx][Stage::Decode.index()..] {
            *cycle += cycles;
        }
        for row in &mut self.rows[idx + 1..] {
            for cycle in row.iter_mut() {
                *cycle += cycles;
            }
        }
    }

    /// Stage occupying `cycle` in `row`, if any.
    fn stage_at(row: &StageCycles, cycle: u64) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| row[s.index()] == cycle)
    }
}

impl fmt::Display for Schedule {
    /// Draws a pipeline diagram: one line per instruction, one column per
    /// cycle. Bubbles between Fetch and Decode are shown as `--`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_cycles();

        write!(f, "{:<6}", "")?;
        for cycle in 1..=total {
            write!(f, "{:<w$}", cycle, w = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for (idx, row) in self.rows.iter().enumerate() {
            write!(f, "{:<6}", format!("I{}", idx + 1))?;
            let fetch = row[Stage::Fetch.index()];
            let decode = row[Stage::Decode.index()];
            for cycle in 1..=total {
                let cell = match Self::stage_at(row, cycle) {
                    Some(stage) => stage.mnemonic(),
                    None if cycle > fetch && cycle < decode => "--",
                    None => "",
                };
                write!(f, "{:<w$}", cell, w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
