use std::ffi::{CStr, CString, c_char};

use crate::error::{FrameError, FrameResult};

/// Borrow a C string as UTF-8. Null and invalid UTF-8 are argument errors.
///
/// # Safety
/// A non-null `ptr` must point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn ptr_to_str<'a>(ptr: *const c_char) -> FrameResult<&'a str> {
    if ptr.is_null() {
        return Err(FrameError::InvalidArgument("null string pointer".to_string()));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|e| FrameError::InvalidArgument(format!("string is not valid UTF-8: {e}")))
}

/// Hand a Rust string to the C side; it comes back through `sp_free_string`.
pub(crate) fn string_to_ptr(s: impl Into<Vec<u8>>) -> FrameResult<*mut c_char> {
    let c_string =
        CString::new(s).map_err(|e| FrameError::InvalidArgument(format!("string contains NUL: {e}")))?;
    Ok(c_string.into_raw())
}

/// Borrow a handle, rejecting null.
///
/// # Safety
/// A non-null `ptr` must come from this library and still be live.
pub(crate) unsafe fn deref_ptr<'a, T>(ptr: *const T, what: &str) -> FrameResult<&'a T> {
    if ptr.is_null() {
        return Err(FrameError::InvalidArgument(format!("null {what} handle")));
    }
    Ok(unsafe { &*ptr })
}

/// # Safety
/// Same contract as [`deref_ptr`], and no other reference to `*ptr` may exist.
pub(crate) unsafe fn deref_mut_ptr<'a, T>(ptr: *mut T, what: &str) -> FrameResult<&'a mut T> {
    if ptr.is_null() {
        return Err(FrameError::InvalidArgument(format!("null {what} handle")));
    }
    Ok(unsafe { &mut *ptr })
}

/// # Safety
/// `c_str` is null or a string returned by this library, freed once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_free_string(c_str: *mut c_char) {
    if !c_str.is_null() {
        unsafe {
            let _ = CString::from_raw(c_str);
        }
    }
}
