//! Token evaluator
//!
//! A token is either a literal, pushed as-is, or a name resolved through the
//! dictionary stack. A name bound to a block re-enters the evaluator once per
//! token of the block; loops and branches go through the same path.

use super::builtins::system_dict;
use super::classify::classify;
use super::error::{InterpError, InterpResult};
use super::scope::{DictStack, Entry};
use super::stack::OperandStack;
use super::value::Value;
use crate::config::{Config, Scoping};
use crate::error::PsError;
use crate::lexer::tokenize;
use crate::util::find_similar_name;
use tracing::{debug, trace, warn};

/// Stack growth parameters for deeply nested blocks
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// Maximum edit distance for "did you mean" suggestions
const SUGGESTION_DISTANCE: usize = 2;

/// The interpreter
pub struct Interpreter {
    pub(crate) operands: OperandStack,
    pub(crate) dicts: DictStack,
    config: Config,
    /// Current block nesting depth
    depth: usize,
    /// Loop iterations left for the current top-level token
    iteration_budget: usize,
    /// Lines written by `=` since the last [`Interpreter::take_output`]
    output: Vec<String>,
}

impl Interpreter {
    /// Create an interpreter with default limits
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        if config.scoping == Scoping::Lexical {
            warn!("lexical scoping is not implemented; names resolve dynamically");
        }
        Interpreter {
            operands: OperandStack::new(),
            dicts: DictStack::new(system_dict().into_ref()),
            iteration_budget: config.max_iterations,
            config,
            depth: 0,
            output: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Evaluate one token.
    ///
    /// Every loop run by the token, nested ones included, draws on one
    /// budget of `max_iterations`. When a resource limit aborts the token,
    /// both stacks are put back to where they were before it started.
    /// Definitions made in dictionaries that were already on the stack are
    /// kept.
    pub fn evaluate_token(&mut self, token: &str) -> InterpResult<()> {
        if let Some(value) = classify(token) {
            self.operands.push(value);
            return Ok(());
        }

        self.iteration_budget = self.config.max_iterations;
        self.operands.checkpoint();
        self.dicts.checkpoint();
        let result = self.resolve(token);
        if let Err(err) = &result
            && err.is_resource_limit()
        {
            warn!(token, %err, "command aborted, restoring stacks");
            self.operands.rollback();
            self.dicts.rollback();
        } else {
            self.operands.commit();
            self.dicts.commit();
        }
        result
    }

    /// Tokenize `source` and evaluate each token in order, stopping at the
    /// first failure. Tokens before the failing one keep their effects.
    pub fn evaluate_source(&mut self, source: &str) -> crate::Result<()> {
        let tokens = tokenize(source)?;
        for token in &tokens {
            self.evaluate_token(&token.node)
                .map_err(|err| PsError::eval(err, token))?;
        }
        debug!(tokens = tokens.len(), stack = self.operands.len(), "evaluated source");
        Ok(())
    }

    fn eval(&mut self, token: &str) -> InterpResult<()> {
        // Grow stack if we're running low
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(token))
    }

    fn eval_inner(&mut self, token: &str) -> InterpResult<()> {
        match classify(token) {
            Some(value) => {
                self.operands.push(value);
                Ok(())
            }
            None => self.resolve(token),
        }
    }

    /// Look `name` up from the innermost dictionary outward and act on the entry
    fn resolve(&mut self, name: &str) -> InterpResult<()> {
        match self.dicts.find(name) {
            Some(Entry::Builtin(builtin)) => {
                trace!(operator = builtin.name(), "invoke");
                builtin.invoke(self)
            }
            Some(Entry::Value(Value::Block(tokens))) => self.execute_block(&tokens),
            Some(Entry::Value(value)) => {
                self.operands.push(value);
                Ok(())
            }
            None => {
                let names = self.dicts.visible_names();
                let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
                let suggestion = find_similar_name(name, &candidates, SUGGESTION_DISTANCE);
                Err(InterpError::undefined(name, suggestion))
            }
        }
    }

    /// Evaluate each token of a block, one nesting level deeper
    pub(crate) fn execute_block(&mut self, tokens: &[String]) -> InterpResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(InterpError::depth_exceeded(self.config.max_depth));
        }
        self.depth += 1;
        let result = tokens.iter().try_for_each(|token| self.eval(token));
        self.depth -= 1;
        result
    }

    /// Take `iterations` from the budget before a loop starts, or reject the
    /// loop if the budget cannot cover all of them
    pub(crate) fn charge_iterations(&mut self, iterations: u128) -> InterpResult<()> {
        if iterations > self.iteration_budget as u128 {
            return Err(InterpError::iterations_exceeded(self.config.max_iterations));
        }
        self.iteration_budget -= iterations as usize;
        Ok(())
    }

    pub(crate) fn emit(&mut self, line: String) {
        self.output.push(line);
    }

    /// Drain everything written by `=`
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Copy of the operand stack, bottom first
    pub fn snapshot_operand_stack(&self) -> Vec<Value> {
        self.operands.as_slice().to_vec()
    }

    /// Operand stack as text, bottom first
    pub fn render_stack(&self) -> String {
        self.operands
            .as_slice()
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn dict_depth(&self) -> usize {
        self.dicts.depth()
    }

    pub fn visible_names(&self) -> Vec<String> {
        self.dicts.visible_names()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
