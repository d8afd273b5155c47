use crate::frame::WrappedFrame;
use crate::schema::SchemaSpec;

// ==========================================
// 不透明容器
// ==========================================
// C 端只拿到指针，所有权通过 Box::into_raw / Box::from_raw 转移

/// One wrapped frame owned by the C side.
pub struct FrameContext {
    pub frame: WrappedFrame,
}

/// A schema being assembled column by column.
pub struct SchemaSpecContext {
    pub schema: SchemaSpec,
}

pub(crate) fn into_frame_ptr(frame: WrappedFrame) -> *mut FrameContext {
    Box::into_raw(Box::new(FrameContext { frame }))
}
