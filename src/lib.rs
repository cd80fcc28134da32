//! Core library for the yinbao-tools command line application.
//!
//! The library resolves file bindings and sequences the external spreadsheet
//! and image tools. Settings live in [`yinbao::tools::config`], the filesystem
//! and process seams under [`yinbao::tools::io`], the relation-table fallback
//! chain in [`yinbao::tools::resolve`], task-to-invocation mapping in
//! [`yinbao::tools::plan`], and sequential execution in
//! [`yinbao::tools::dispatch`].

pub mod yinbao;

pub use yinbao::tools::{
    Result, ToolError, config, dispatch, error, io, menu, model, plan, resolve,
};
