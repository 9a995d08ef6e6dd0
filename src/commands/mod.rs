//! Fluent command builders.
//!
//! One function per device command, grouped by command family. Each
//! builder assembles the request mapping — the command-name key plus
//! every explicitly supplied optional argument, unmodified — and
//! forwards it to [`Connection::transact`](crate::Connection::transact),
//! returning the response untouched. Builders add no retries and no
//! coercion; an omitted `Option` never appears in the encoded request,
//! not even as `null`.

pub mod card;
pub mod file;
