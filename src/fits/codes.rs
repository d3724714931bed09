//! Values from `fitsio.h` that this crate compares against or reports.

use std::os::raw::c_int;

/// `hdutype` returned by `ffmahd` for a binary table.
pub(crate) const BINARY_TBL: c_int = 2;

pub(crate) const FLEN_VALUE: usize = 71;
pub(crate) const FLEN_STATUS: usize = 31;
pub(crate) const FLEN_ERRMSG: usize = 81;

pub const FILE_NOT_OPENED: i32 = 104;
pub const END_OF_FILE: i32 = 107;
pub const BAD_HDU_NUM: i32 = 301;
pub const BAD_COL_NUM: i32 = 302;
pub const BAD_ELEM_NUM: i32 = 308;
