#![allow(clippy::result_large_err)]
//! apilint-core: API signature dump reader.
//!
//! Turns the text of a signature dump (`current.txt`, `system-current.txt`,
//! ...) into structured packages, classes, methods and fields, and aligns
//! two such dumps class by class.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`tokenize()`] -- split one declaration line into tokens
//! - [`ClassStream`] -- lazily parse a dump into classes, collecting [`Diagnostic`]s
//! - [`Api`] -- whole-dump lookup index
//! - [`RetryIter`] -- forward cursor with single-element push-back
//! - [`find_matching()`], [`collect_until_matching()`] -- sorted-stream alignment
//! - [`reconcile()`] -- pair current classes with their baseline, yielding [`ClassView`]s
//! - Entity types: [`Package`], [`Class`], [`Method`], [`Field`], all [`Declaration`]s

pub mod api;
pub mod error;
pub mod lexer;
pub mod matching;
pub mod model;
pub mod parser;
pub mod reconcile;
pub mod retry;
pub mod stream;

// ── Convenience re-exports: key types ────────────────────────────────

pub use api::Api;
pub use error::{Diagnostic, DiagnosticKind, LexError, MatchProtocolError, ParseError};
pub use lexer::{Token, TokenKind};
pub use model::{
    Blame, Class, ClassName, Declaration, Field, Method, MethodKind, Modifiers, Package,
    Parameter, SignatureFormat,
};
pub use reconcile::{ClassView, ReconcileStats};
pub use retry::RetryIter;
pub use stream::ClassStream;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use lexer::tokenize;
pub use matching::{collect_until_matching, find_matching, ClassKey};
pub use parser::{parse_class, parse_field, parse_method, parse_package};
pub use reconcile::reconcile;
