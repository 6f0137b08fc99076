//! Routes the driver's `KHR_debug` messages to the `log` crate.

use std::ffi::{c_void, CStr};
use std::ptr::null;

use gl;
use gl::types::*;
use log::{debug, error, info, warn, Level};

/// Installs the callback if the driver exposes `glDebugMessageCallback`. Returns whether it did.
pub fn install_message_callback() -> bool {
    if !gl::DebugMessageCallback::is_loaded() {
        return false;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::DebugMessageCallback(Some(message_callback), null());
    }
    true
}

/// How loudly to report a message of the given `GL_DEBUG_SEVERITY_*`.
pub fn severity_level(severity: GLenum) -> Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => Level::Warn,
        gl::DEBUG_SEVERITY_LOW => Level::Info,
        _ => Level::Debug,
    }
}

extern "system" fn message_callback(
    _source: GLenum,
    kind: GLenum,
    _id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    let tag = if kind == gl::DEBUG_TYPE_ERROR { "** GL ERROR ** " } else { "" };

    match severity_level(severity) {
        Level::Error => error!("GL CALLBACK: {}type = 0x{:x}: {}", tag, kind, message),
        Level::Warn => warn!("GL CALLBACK: {}type = 0x{:x}: {}", tag, kind, message),
        Level::Info => info!("GL CALLBACK: {}type = 0x{:x}: {}", tag, kind, message),
        _ => debug!("GL CALLBACK: {}type = 0x{:x}: {}", tag, kind, message),
    }
}
