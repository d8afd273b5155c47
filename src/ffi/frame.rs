use std::os::raw::c_char;

use super::types::{FrameContext, SchemaSpecContext, into_frame_ptr};
use super::utils::{deref_ptr, ptr_to_str, string_to_ptr};
use crate::adapter;
use crate::convert;
use crate::error::FrameError;
use crate::frame::NativeFrame;
use crate::rows::RowFrame;
use crate::types::{Backend, ConcatMode};

// ==========================================
// Constructors
// ==========================================

/// Zero-row frame on the named backend (`"polars"` / `"rows"`).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_create_empty(
    schema_ptr: *const SchemaSpecContext,
    backend: *const c_char,
) -> *mut FrameContext {
    ffi_try!({
        let ctx = unsafe { deref_ptr(schema_ptr, "schema")? };
        let frame = adapter::create_empty_named(&ctx.schema, unsafe { ptr_to_str(backend)? })?;
        Ok(into_frame_ptr(frame))
    })
}

/// Parse `[{...}, ...]` records and materialize them on the named backend.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_from_json_records(
    json: *const c_char,
    backend: *const c_char,
) -> *mut FrameContext {
    ffi_try!({
        let backend: Backend = unsafe { ptr_to_str(backend)? }.parse()?;
        let rows = RowFrame::from_json_records(unsafe { ptr_to_str(json)? })?;
        let frame = adapter::wrap(rows).to_backend(backend)?;
        Ok(into_frame_ptr(frame))
    })
}

/// Records JSON of any frame. Lazy frames are evaluated. Free the result
/// with `sp_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_to_json_records(ptr: *const FrameContext) -> *mut c_char {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        let rows = match adapter::to_native(ctx.frame.clone()) {
            NativeFrame::Rows(frame) => frame,
            NativeFrame::Polars(df) => convert::polars_to_rows(&df)?,
            NativeFrame::PolarsLazy(lf) => convert::polars_to_rows(&lf.collect()?)?,
        };
        string_to_ptr(rows.to_json_records()?)
    })
}

// ==========================================
// Combining / converting
// ==========================================

/// Concatenate `len` frames with the named mode (null mode = vertical).
/// The input handles stay owned by the caller.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_concat(
    frames: *const *const FrameContext,
    len: usize,
    mode: *const c_char,
) -> *mut FrameContext {
    ffi_try!({
        let how = if mode.is_null() {
            ConcatMode::default()
        } else {
            let mode = unsafe { ptr_to_str(mode)? };
            mode.parse()?
        };
        let ptrs: &[*const FrameContext] = if len == 0 {
            &[]
        } else if frames.is_null() {
            return Err(FrameError::InvalidArgument("null frame array".to_string()));
        } else {
            unsafe { std::slice::from_raw_parts(frames, len) }
        };
        // DataFrame 的 clone 只复制 Arc，开销很小
        let inputs = ptrs
            .iter()
            .map(|&p| unsafe { deref_ptr(p, "frame") }.map(|ctx| ctx.frame.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(into_frame_ptr(adapter::concat(inputs, how)?))
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_collect(ptr: *const FrameContext) -> *mut FrameContext {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        Ok(into_frame_ptr(ctx.frame.clone().collect()?))
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_to_backend(ptr: *const FrameContext, backend: *const c_char) -> *mut FrameContext {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        let backend: Backend = unsafe { ptr_to_str(backend)? }.parse()?;
        Ok(into_frame_ptr(ctx.frame.clone().to_backend(backend)?))
    })
}

// ==========================================
// Inspection
// ==========================================

/// Number of columns, or -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_width(ptr: *const FrameContext) -> i64 {
    ffi_try!(-1, {
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        Ok(ctx.frame.width()? as i64)
    })
}

/// Number of rows (lazy frames are counted), or -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_height(ptr: *const FrameContext) -> i64 {
    ffi_try!(-1, {
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        Ok(ctx.frame.resolve_height()? as i64)
    })
}

/// Name of column `index`; null (with the last error set) when out of range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_column_name(ptr: *const FrameContext, index: usize) -> *mut c_char {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        let columns = ctx.frame.columns()?;
        match columns.get(index) {
            Some(name) => string_to_ptr(name.as_str()),
            None => Err(FrameError::InvalidArgument(format!(
                "column index {index} out of range for {} columns",
                columns.len()
            ))),
        }
    })
}

/// `"polars"`, `"polars-lazy"` or `"rows"`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_backend(ptr: *const FrameContext) -> *mut c_char {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        string_to_ptr(ctx.frame.kind().as_str())
    })
}

// ==========================================
// Lifetime
// ==========================================

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_clone(ptr: *const FrameContext) -> *mut FrameContext {
    ffi_try!({
        let ctx = unsafe { deref_ptr(ptr, "frame")? };
        Ok(into_frame_ptr(ctx.frame.clone()))
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_frame_free(ptr: *mut FrameContext) {
    ffi_try_void!({
        if !ptr.is_null() {
            unsafe {
                let _ = Box::from_raw(ptr);
            }
        }
        Ok(())
    })
}
