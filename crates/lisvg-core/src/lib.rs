//! lisvg Core Types and Definitions
//!
//! This crate provides the foundational types shared by the lisvg parser,
//! layout engine and renderer. It includes:
//!
//! - **AST**: The parsed diagram model ([`ast::Diagram`], [`ast::Node`], [`ast::Edge`])
//! - **Direction**: Layout direction strategies ([`direction::Direction`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])

pub mod ast;
pub mod color;
pub mod direction;
pub mod geometry;
