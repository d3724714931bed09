use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_long, c_void};
use std::path::Path;
use std::ptr;

use arrow::array::PrimitiveArray;
use fitsio::FitsFile;
use fitsio::errors::Error as FitsioError;
use fitsio_sys::fitsfile;
use log::debug;

use crate::core::PalistError;
use crate::table::TableSource;

use super::codes::{
    BAD_COL_NUM, BAD_ELEM_NUM, BAD_HDU_NUM, BINARY_TBL, END_OF_FILE, FILE_NOT_OPENED,
    FLEN_ERRMSG, FLEN_STATUS, FLEN_VALUE,
};
use super::column::{ColumnDescriptor, FitsElement, StorageType};

/// A FITS file positioned on a binary table HDU.
///
/// The file stays open for the lifetime of the value and is closed by
/// `fitsio` on drop.
pub struct FitsTable {
    raw: *mut fitsfile,
    num_rows: usize,
    num_columns: usize,
    _file: FitsFile,
}

impl FitsTable {
    /// Open `path` read-only and move to HDU `hdu` (1-based). Fails with
    /// `NotBinaryTable` if that HDU holds anything else.
    pub fn open(path: &Path, hdu: usize) -> Result<Self, PalistError> {
        let mut file = FitsFile::open(path).map_err(|err| open_error(err, path))?;
        // SAFETY: the handle is owned by `file`, which lives as long as the
        // returned table.
        let raw = unsafe { file.as_raw() };

        let hdunum = c_int::try_from(hdu)
            .map_err(|_| PalistError::fits(BAD_HDU_NUM, format!("HDU number {hdu}")))?;
        let mut hdutype: c_int = 0;
        let mut status: c_int = 0;
        unsafe { fitsio_sys::ffmahd(raw, hdunum, &mut hdutype, &mut status) };
        check(status, || format!("moving to HDU {hdu} of {}", path.display()))?;
        if hdutype != BINARY_TBL {
            debug!("HDU {hdu} of {} has type {hdutype}", path.display());
            return Err(PalistError::NotBinaryTable);
        }

        let mut ncols: c_int = 0;
        unsafe { fitsio_sys::ffgncl(raw, &mut ncols, &mut status) };
        check(status, || "reading the column count".to_string())?;
        let mut nrows: i64 = 0;
        unsafe { fitsio_sys::ffgnrwll(raw, &mut nrows, &mut status) };
        check(status, || "reading the row count".to_string())?;

        let num_rows = checked_row_count(raw, path, nrows)?;
        debug!(
            "{}: HDU {hdu} is a binary table of {num_rows} rows and {ncols} columns",
            path.display()
        );
        Ok(Self {
            raw,
            num_rows,
            num_columns: usize::try_from(ncols).unwrap_or(0),
            _file: file,
        })
    }
}

impl TableSource for FitsTable {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// `TTYPEn` values as `ffgkns` returns them: up to the highest index
    /// present, with missing ones left empty.
    fn column_names(&self) -> Result<Vec<String>, PalistError> {
        let mut values = vec![[0 as c_char; FLEN_VALUE]; self.num_columns];
        let mut pointers: Vec<*mut c_char> =
            values.iter_mut().map(|v| v.as_mut_ptr()).collect();
        let mut nfound: c_int = 0;
        let mut status: c_int = 0;
        unsafe {
            fitsio_sys::ffgkns(
                self.raw,
                c"TTYPE".as_ptr() as *mut c_char,
                1,
                self.num_columns as c_int,
                pointers.as_mut_ptr(),
                &mut nfound,
                &mut status,
            )
        };
        check(status, || "reading TTYPEn keywords".to_string())?;

        let found = usize::try_from(nfound).unwrap_or(0).min(values.len());
        Ok(values[..found].iter().map(|v| c_text(v)).collect())
    }

    fn descriptor(&self, position: usize) -> Result<ColumnDescriptor, PalistError> {
        let colnum = column_number(position)?;
        let mut typecode: c_int = 0;
        let mut repeat: c_long = 0;
        let mut width: c_long = 0;
        let mut status: c_int = 0;
        unsafe {
            fitsio_sys::ffgtcl(
                self.raw,
                colnum,
                &mut typecode,
                &mut repeat,
                &mut width,
                &mut status,
            )
        };
        check(status, || format!("describing column {position}"))?;

        Ok(ColumnDescriptor {
            position,
            storage: StorageType::from_code(typecode),
            repeat: usize::try_from(repeat).unwrap_or(0),
            width: usize::try_from(width).unwrap_or(0),
        })
    }

    /// Read the first element of every row in one bulk call. Elements are
    /// converted to `T` by CFITSIO, and no null substitution is done.
    fn read_column<T: FitsElement>(
        &self,
        position: usize,
    ) -> Result<PrimitiveArray<T>, PalistError> {
        let colnum = column_number(position)?;
        let repeat = self.descriptor(position)?.repeat;
        if repeat == 0 {
            return Err(PalistError::fits(
                BAD_ELEM_NUM,
                format!("column {position} has no elements"),
            ));
        }
        let total = self
            .num_rows
            .checked_mul(repeat)
            .filter(|n| i64::try_from(*n).is_ok())
            .ok_or_else(|| {
                PalistError::fits(
                    END_OF_FILE,
                    format!("{} rows of {repeat} elements", self.num_rows),
                )
            })?;

        let mut cells = vec![T::Native::default(); total];
        if total > 0 {
            let mut nulval = T::Native::default();
            let mut anynul: c_int = 0;
            let mut status: c_int = 0;
            unsafe {
                fitsio_sys::ffgcv(
                    self.raw,
                    T::STORAGE.code(),
                    colnum,
                    1,
                    1,
                    total as i64,
                    (&mut nulval as *mut T::Native).cast::<c_void>(),
                    cells.as_mut_ptr().cast::<c_void>(),
                    &mut anynul,
                    &mut status,
                )
            };
            check(status, || format!("reading column {position}"))?;
        }

        let values: Vec<T::Native> = if repeat == 1 {
            cells
        } else {
            cells.into_iter().step_by(repeat).collect()
        };
        Ok(PrimitiveArray::new(values.into(), None))
    }
}

fn column_number(position: usize) -> Result<c_int, PalistError> {
    c_int::try_from(position)
        .map_err(|_| PalistError::fits(BAD_COL_NUM, format!("column {position}")))
}

/// Return the row count once the table data is known to fit in the file.
/// CFITSIO takes `NAXIS1` and `NAXIS2` from the header as they are.
fn checked_row_count(raw: *mut fitsfile, path: &Path, nrows: i64) -> Result<usize, PalistError> {
    let mut row_len: i64 = 0;
    let mut status: c_int = 0;
    unsafe {
        fitsio_sys::ffgkyjj(
            raw,
            c"NAXIS1".as_ptr() as *mut c_char,
            &mut row_len,
            ptr::null_mut(),
            &mut status,
        )
    };
    check(status, || "reading NAXIS1".to_string())?;

    let (mut head_start, mut data_start, mut data_end) = (0i64, 0i64, 0i64);
    unsafe {
        fitsio_sys::ffghadll(
            raw,
            &mut head_start,
            &mut data_start,
            &mut data_end,
            &mut status,
        )
    };
    check(status, || "locating the table data".to_string())?;

    let file_len = std::fs::metadata(path)?.len();
    let needed = row_len
        .checked_mul(nrows)
        .and_then(|len| len.checked_add(data_start))
        .and_then(|end| u64::try_from(end).ok());
    match (needed, usize::try_from(nrows)) {
        (Some(end), Ok(rows)) if end <= file_len => Ok(rows),
        _ => Err(PalistError::fits(
            END_OF_FILE,
            format!(
                "{nrows} rows of {row_len} bytes do not fit in {} ({file_len} bytes)",
                path.display()
            ),
        )),
    }
}

/// Turn a nonzero CFITSIO status into an error carrying the status text and
/// the messages CFITSIO queued for it.
fn check(status: c_int, context: impl FnOnce() -> String) -> Result<(), PalistError> {
    if status == 0 {
        return Ok(());
    }
    let mut text = [0 as c_char; FLEN_STATUS];
    unsafe { fitsio_sys::ffgerr(status, text.as_mut_ptr()) };

    let mut lines = vec![c_text(&text), context()];
    let mut message = [0 as c_char; FLEN_ERRMSG];
    while unsafe { fitsio_sys::ffgmsg(message.as_mut_ptr()) } != 0 {
        lines.push(c_text(&message));
    }
    Err(PalistError::fits(status, lines.join("\n")))
}

fn open_error(err: FitsioError, path: &Path) -> PalistError {
    match err {
        FitsioError::Fits(err) => PalistError::fits(
            err.status,
            format!("{}\nopening {}", err.message, path.display()),
        ),
        other => PalistError::fits(
            FILE_NOT_OPENED,
            format!("opening {}: {other}", path.display()),
        ),
    }
}

fn c_text(buf: &[c_char]) -> String {
    match CStr::from_bytes_until_nul(bytemuck::cast_slice(buf)) {
        Ok(text) => text.to_string_lossy().into_owned(),
        Err(_) => String::new(),
    }
}
