//! BillPay template manager.
//!
//! Keeps a directory of Backstage scaffold templates in line with the BillPay
//! naming and branch conventions, and exposes the operations as MCP tools.
#![deny(unsafe_code)]

pub mod core;
pub mod mcp;
