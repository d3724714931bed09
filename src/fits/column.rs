use std::fmt;

use arrow::datatypes::{ArrowPrimitiveType, Float32Type, Float64Type, UInt8Type};

/// Declared on-disk element type of a binary table column, as the CFITSIO
/// datatype code `ffgtcl` reports for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Bit,
    Byte,
    Logical,
    Text,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Complex32,
    Complex64,
    /// `P`/`Q` heap descriptor. Holds the negated code of the element type.
    VarArray(i32),
    Other(i32),
}

impl StorageType {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => StorageType::Bit,
            11 => StorageType::Byte,
            14 => StorageType::Logical,
            16 => StorageType::Text,
            21 => StorageType::Int16,
            41 => StorageType::Int32,
            81 => StorageType::Int64,
            42 => StorageType::Float32,
            82 => StorageType::Float64,
            83 => StorageType::Complex32,
            163 => StorageType::Complex64,
            code if code < 0 => StorageType::VarArray(code),
            code => StorageType::Other(code),
        }
    }

    /// CFITSIO datatype code (`TBYTE`, `TFLOAT`, ...).
    pub fn code(&self) -> i32 {
        match self {
            StorageType::Bit => 1,
            StorageType::Byte => 11,
            StorageType::Logical => 14,
            StorageType::Text => 16,
            StorageType::Int16 => 21,
            StorageType::Int32 => 41,
            StorageType::Int64 => 81,
            StorageType::Float32 => 42,
            StorageType::Float64 => 82,
            StorageType::Complex32 => 83,
            StorageType::Complex64 => 163,
            StorageType::VarArray(code) | StorageType::Other(code) => *code,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageType::Bit => "TBIT",
            StorageType::Byte => "TBYTE",
            StorageType::Logical => "TLOGICAL",
            StorageType::Text => "TSTRING",
            StorageType::Int16 => "TSHORT",
            StorageType::Int32 => "TLONG",
            StorageType::Int64 => "TLONGLONG",
            StorageType::Float32 => "TFLOAT",
            StorageType::Float64 => "TDOUBLE",
            StorageType::Complex32 => "TCOMPLEX",
            StorageType::Complex64 => "TDBLCOMPLEX",
            StorageType::VarArray(code) => {
                return write!(f, "variable-length array of type {}", -code);
            }
            StorageType::Other(code) => return write!(f, "type {code}"),
        };
        f.write_str(name)
    }
}

/// What the FITS reader reports about one column, as `ffgtcl` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// 1-based column number.
    pub position: usize,
    pub storage: StorageType,
    pub repeat: usize,
    /// Width of a single element in bytes.
    pub width: usize,
}

/// Arrow primitive types a binary table column can be read into. The
/// native type must match the C type CFITSIO writes for `STORAGE`.
pub trait FitsElement: ArrowPrimitiveType {
    const STORAGE: StorageType;
}

impl FitsElement for Float32Type {
    const STORAGE: StorageType = StorageType::Float32;
}

impl FitsElement for Float64Type {
    const STORAGE: StorageType = StorageType::Float64;
}

impl FitsElement for UInt8Type {
    const STORAGE: StorageType = StorageType::Byte;
}
