use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use sporty_frames::ffi::error::{sp_clear_last_error, sp_get_last_error};
use sporty_frames::ffi::frame::*;
use sporty_frames::ffi::schema::*;
use sporty_frames::ffi::types::FrameContext;
use sporty_frames::ffi::utils::sp_free_string;

fn c(s: &str) -> CString {
    CString::new(s).unwrap()
}

/// Copy and free a string returned across the boundary.
fn take_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null());
    let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
    unsafe { sp_free_string(ptr) };
    s
}

fn last_error() -> Option<String> {
    let ptr = sp_get_last_error();
    if ptr.is_null() { None } else { Some(take_string(ptr)) }
}

#[test]
fn json_round_trip_through_both_backends() {
    unsafe {
        let json = r#"[{"id":1,"name":"ana","score":0.5},{"id":2,"name":null,"score":1.5}]"#;
        for backend in ["polars", "rows"] {
            let frame = sp_frame_from_json_records(c(json).as_ptr(), c(backend).as_ptr());
            assert!(!frame.is_null());
            assert_eq!(take_string(sp_frame_backend(frame)), backend);
            assert_eq!(sp_frame_width(frame), 3);
            assert_eq!(sp_frame_height(frame), 2);
            assert_eq!(take_string(sp_frame_column_name(frame, 1)), "name");
            assert_eq!(take_string(sp_frame_to_json_records(frame)), json);
            sp_frame_free(frame);
        }
    }
}

#[test]
fn create_empty_then_concat() {
    unsafe {
        let schema = sp_schema_new();
        assert_eq!(sp_schema_add(schema, c("id").as_ptr(), c("int").as_ptr()), 0);
        assert_eq!(sp_schema_add(schema, c("score").as_ptr(), c("float").as_ptr()), 0);

        let empty = sp_frame_create_empty(schema, c("polars").as_ptr());
        assert!(!empty.is_null());
        assert_eq!(sp_frame_height(empty), 0);

        let data = sp_frame_from_json_records(c(r#"[{"score":0.9,"id":7}]"#).as_ptr(), c("polars").as_ptr());
        let inputs: [*const FrameContext; 2] = [empty, data];
        let out = sp_frame_concat(inputs.as_ptr(), inputs.len(), std::ptr::null());
        assert!(!out.is_null());
        assert_eq!(sp_frame_height(out), 1);
        assert_eq!(take_string(sp_frame_column_name(out, 0)), "id");

        // 输入句柄仍归调用方所有
        assert_eq!(sp_frame_height(data), 1);

        let rows = sp_frame_to_backend(out, c("rows").as_ptr());
        assert_eq!(take_string(sp_frame_backend(rows)), "rows");
        assert_eq!(take_string(sp_frame_to_json_records(rows)), r#"[{"id":7,"score":0.9}]"#);

        for frame in [empty, data, out, rows] {
            sp_frame_free(frame);
        }
        sp_schema_free(schema);
    }
}

#[test]
fn failures_set_the_last_error() {
    unsafe {
        sp_clear_last_error();
        assert_eq!(last_error(), None);

        let frame = sp_frame_from_json_records(c("[]").as_ptr(), c("unsupported_engine").as_ptr());
        assert!(frame.is_null());
        assert!(last_error().unwrap().contains("unsupported_engine"));

        let out = sp_frame_concat(std::ptr::null(), 0, c("vertical").as_ptr());
        assert!(out.is_null());
        assert!(last_error().unwrap().contains("at least one frame"));

        let out = sp_frame_concat(std::ptr::null(), 0, c("sideways").as_ptr());
        assert!(out.is_null());
        assert!(last_error().unwrap().contains("sideways"));

        assert_eq!(sp_frame_width(std::ptr::null()), -1);
        assert!(last_error().unwrap().contains("null frame handle"));

        sp_clear_last_error();
        assert_eq!(last_error(), None);
    }
}

#[test]
fn clone_and_collect_give_independent_handles() {
    unsafe {
        let frame = sp_frame_from_json_records(c(r#"[{"a":true}]"#).as_ptr(), c("rows").as_ptr());
        let copy = sp_frame_clone(frame);
        sp_frame_free(frame);
        let collected = sp_frame_collect(copy);
        assert_eq!(sp_frame_height(collected), 1);
        assert!(sp_frame_column_name(collected, 5).is_null());
        assert!(last_error().unwrap().contains("out of range"));
        sp_frame_free(copy);
        sp_frame_free(collected);
    }
}
