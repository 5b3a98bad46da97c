//! # IO Module
//!
//! Everything that crosses the network boundary.
//!
//! ## Key Responsibilities
//!
//! - **Remote Client**: list/create/delete expenses, login and register over
//!   the ExpenseTracker JSON contract
//! - **Connectivity Probe**: a time-bounded reachability check
//! - **Mapping**: converting between wire DTOs from the `shared` crate and
//!   domain records
//!
//! ## Supported Operations
//!
//! - **GET /ExpenseTracker/LoadExpenses**: full remote collection
//! - **POST /ExpenseTracker/SaveExpenses**: create one expense
//! - **DELETE /ExpenseTracker/DeleteExpenses?id=**: delete one expense
//! - **POST /ExpenseTracker/Login**, **POST /ExpenseTracker/Register**

pub mod connectivity;
pub mod mappers;
pub mod remote;

#[cfg(test)]
pub mod test_utils;

pub use connectivity::{ConnectivityProbe, HttpConnectivityProbe};
pub use remote::{CreatedExpense, ExpenseApi, HttpExpenseApi, RemoteError};
