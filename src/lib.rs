//! # QuackScript
//!
//! A tree-walking evaluator for QuackScript, a small expression-oriented scripting language with
//! explicit parameter brackets, typed declarations, optional types, first-class functions, and
//! module imports.
//!
//! This crate is the language's semantic core: value model, lexically-scoped memory, the
//! statement/expression evaluator, and the module import pipeline. It also ships a real lexer and
//! parser so the crate is runnable end to end, but the evaluator only ever depends on their
//! `tokenize`/`parse` signatures, never their internals.

/// The abstract syntax tree the parser produces and the evaluator consumes. Read-only once
/// parsed; nothing in this crate mutates a node after producing it.
pub mod ast;

/// The static primitive attribute registry: built-in "methods" invocable via accessor syntax on
/// primitive values, such as `'hi'.length()`.
pub mod attributes;

/// Command-line subcommands for the `quack` binary.
pub mod cli;

/// Optional `quack.toml` project configuration.
pub mod config;

/// The error taxonomy: syntax errors from the lexer/parser and the runtime error kinds the
/// evaluator can raise, plus the `EvalError` union the two are wrapped in.
pub mod error;

/// Walks a `Module`'s statements and expressions, implementing QuackScript's operational
/// semantics: declarations, assignment, control flow, function invocation, binary-operator
/// dispatch, accessor dispatch, and module imports.
pub mod evaluator;

/// The embedding surface an `Evaluator` talks to: `stdout`, `stderr`, and `loadFile`.
pub mod host;

/// Tokenizes QuackScript source text into a flat stream of tokens.
pub mod lexer;

/// The scoped symbol table: cells, scopes, and the memory operations the evaluator uses to
/// declare, look up, and update them.
pub mod memory;

/// Recursive-descent parser producing the AST from a token stream.
pub mod parser;

/// A line/column location in source text, attached to tokens, AST nodes, and errors.
pub mod position;

/// The standard-library routine registry: host-provided functions surfaced as first-class
/// `InternalFuncDeclaration` values in memory.
pub mod stdlib;

/// The independent call-stack of evaluation contexts used to check `return` legality.
pub mod state;

/// The runtime value model: tagged `Value`s and the pure functions that map between value kinds
/// and their declared type names.
pub mod value;
