use crate::device::ShaderStage;
use crate::error::Error;

#[test]
fn compile_failed_display_names_stage_and_log() {
    let err = Error::CompileFailed {
        stage: ShaderStage::Fragment,
        log: "0:3: 'foo' : undeclared identifier".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("fragment shader failed to compile"));
    assert!(text.contains("undeclared identifier"));
}

#[test]
fn link_failed_display_carries_log() {
    let err = Error::LinkFailed("varying not written by vertex shader".to_string());
    assert!(err.to_string().contains("varying not written by vertex shader"));
}

#[test]
fn invalid_resource_display_carries_message() {
    let err = Error::InvalidResource("no shader sources".to_string());
    assert!(err.to_string().contains("no shader sources"));
}

#[test]
fn backend_error_display_carries_message() {
    let err = Error::BackendError("glCreateProgram returned 0".to_string());
    assert!(err.to_string().contains("glCreateProgram returned 0"));
}

#[test]
fn error_implements_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::LinkFailed("link log".to_string()));
}
