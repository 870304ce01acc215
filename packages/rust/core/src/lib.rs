//! Tree assembly and bundling pipelines for docbinder.
//!
//! This crate walks a documentation content tree, assembles it into one
//! numbered document, and drives the external converters for HTML and PDF
//! output.

pub mod assembler;
pub mod pipeline;
pub mod render;
pub mod sink;
pub mod toc;
pub mod walker;
