use std::any::Any;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub(crate) fn set_error(msg: String) {
    tracing::debug!(error = %msg, "ffi call failed");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(msg));
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: <unknown payload>".to_string()
    }
}

/// 包住一个返回 `FrameResult<T>` 的代码块:
/// 出错或 panic 时记录 last error，并返回空指针 (或给定的哨兵值)。
macro_rules! ffi_try {
    ($body:block) => {
        ffi_try!(::std::ptr::null_mut(), $body)
    };
    ($fallback:expr, $body:block) => {{
        let result = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(
            || -> $crate::error::FrameResult<_> { $body },
        ));
        match result {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => {
                $crate::ffi::error::set_error(err.to_string());
                $fallback
            }
            Err(payload) => {
                $crate::ffi::error::set_error($crate::ffi::error::panic_message(payload));
                $fallback
            }
        }
    }};
}

/// `ffi_try!` for entry points without a return value.
macro_rules! ffi_try_void {
    ($body:block) => {
        ffi_try!((), $body)
    };
}

/// Last error recorded on this thread, or null. Free with `sp_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn sp_get_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| match slot.borrow().as_deref() {
        // 错误信息里不会有 \0，万一有就替换掉
        Some(msg) => CString::new(msg.replace('\0', " "))
            .map(CString::into_raw)
            .unwrap_or(std::ptr::null_mut()),
        None => std::ptr::null_mut(),
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn sp_clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

#[cfg(test)]
pub(crate) fn last_error() -> Option<String> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}
