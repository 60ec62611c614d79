use std::collections::HashMap;

use super::breakpoints::Breakpoints;
use super::context::ContextRef;
use crate::error::{DebugError, Result};

/// The mutable program state: integer variables, per-variable last-change
/// position, the function table, the root code slot and the breakpoint set.
#[derive(Debug, Default)]
pub struct Memory {
    variables: HashMap<String, i64>,
    last_change: HashMap<String, usize>,
    functions: HashMap<String, ContextRef>,
    root: Option<ContextRef>,
    breakpoints: Breakpoints,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&mut self, name: &str, value: i64, position: usize) {
        self.variables.insert(name.to_string(), value);
        self.last_change.insert(name.to_string(), position);
    }

    /// Validation precedes mutation: an unset variable fails before anything
    /// changes.
    pub fn subtract_variable(&mut self, name: &str, value: i64, position: usize) -> Result<()> {
        let current = self
            .variables
            .get_mut(name)
            .ok_or_else(|| DebugError::VariableNotInMemory(name.to_string()))?;
        *current -= value;
        self.last_change.insert(name.to_string(), position);
        Ok(())
    }

    pub fn value_of(&self, name: &str) -> Result<i64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| DebugError::VariableNotInMemory(name.to_string()))
    }

    pub fn remove_variable(&mut self, name: &str) -> Result<()> {
        self.variables
            .remove(name)
            .ok_or_else(|| DebugError::VariableNotInMemory(name.to_string()))?;
        self.last_change.remove(name);
        Ok(())
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
        self.last_change.clear();
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Name, value and last-change position of every variable, sorted by
    /// name for stable display.
    pub fn variables_sorted(&self) -> Vec<(String, i64, usize)> {
        let mut vars: Vec<_> = self
            .variables
            .iter()
            .map(|(name, value)| {
                let position = self.last_change.get(name).copied().unwrap_or(0);
                (name.clone(), *value, position)
            })
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    pub fn function(&self, name: &str) -> Result<ContextRef> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| DebugError::FunctionNotDefined(name.to_string()))
    }

    pub fn functions(&self) -> &HashMap<String, ContextRef> {
        &self.functions
    }

    /// Live function table handed to the discovery pre-pass, which registers
    /// entries as it scans (no rollback on a failed scan).
    pub fn functions_mut(&mut self) -> &mut HashMap<String, ContextRef> {
        &mut self.functions
    }

    pub fn install_root(&mut self, root: ContextRef) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<ContextRef> {
        self.root.clone()
    }

    /// Drop the loaded program ahead of a new acquisition. Variables and
    /// breakpoints survive a reload.
    pub fn reset_program(&mut self) {
        self.functions.clear();
        self.root = None;
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }
}
