use std::os::raw::c_char;

use super::types::SchemaSpecContext;
use super::utils::{deref_mut_ptr, ptr_to_str};
use crate::datatypes::LogicalType;
use crate::schema::SchemaSpec;

#[unsafe(no_mangle)]
pub extern "C" fn sp_schema_new() -> *mut SchemaSpecContext {
    Box::into_raw(Box::new(SchemaSpecContext {
        schema: SchemaSpec::new(),
    }))
}

/// Append a column (or retype an existing one). Unknown type names are stored
/// as text. Returns 0, or -1 with the last error set.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_schema_add(
    ptr: *mut SchemaSpecContext,
    name: *const c_char,
    type_name: *const c_char,
) -> i32 {
    ffi_try!(-1, {
        let ctx = unsafe { deref_mut_ptr(ptr, "schema")? };
        let name = unsafe { ptr_to_str(name)? };
        let dtype = LogicalType::parse_lenient(unsafe { ptr_to_str(type_name)? });
        ctx.schema.insert(name, dtype);
        Ok(0)
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_schema_len(ptr: *const SchemaSpecContext) -> usize {
    if ptr.is_null() {
        return 0;
    }
    let ctx = unsafe { &*ptr };
    ctx.schema.len()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sp_schema_free(ptr: *mut SchemaSpecContext) {
    ffi_try_void!({
        if !ptr.is_null() {
            unsafe {
                let _ = Box::from_raw(ptr);
            }
        }
        Ok(())
    })
}
