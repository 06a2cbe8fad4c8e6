use std::io;

use fault_rail::{ClassFlags, ErrorClass};

use crate::fixtures::APPLE_ERROR;

fn plain(name: &'static str) -> ErrorClass {
    ErrorClass::new_specified(None, name, ClassFlags::empty())
}

#[test]
fn single_line_messages_follow_the_class_name() {
    let class = plain("disk");
    assert_eq!(class.new_error("full").to_string(), "disk: full");
}

#[test]
fn trailing_whitespace_is_trimmed() {
    let class = plain("disk");
    assert_eq!(class.new_error("full \n\n").to_string(), "disk: full");
}

#[test]
fn multi_line_messages_are_indented_under_the_class() {
    let class = plain("parse");
    let err = class.new_error("line one\nline two\n");
    assert_eq!(err.to_string(), "parse:\n  line one\n  line two");
}

#[test]
fn nested_errors_render_their_chain() {
    let outer = plain("outer");
    let inner = plain("inner");
    let err = outer.wrap(inner.new_error("boom"));
    assert_eq!(err.to_string(), "outer: inner: boom");
}

#[test]
fn captured_stack_is_appended_after_a_blank_line() {
    let rendered = APPLE_ERROR.new_error("worm").to_string();
    let (head, tail) = rendered.split_once("\n\n").unwrap();
    assert_eq!(head, "apple: worm");
    assert!(tail.starts_with("apple backtrace: "));
}

#[test]
fn platform_failures_render_their_own_text() {
    let class = plain("io");
    let err = class.wrap(io::Error::other("pipe closed"));
    assert_eq!(err.to_string(), "io: pipe closed");
}

#[test]
fn debug_output_names_the_class() {
    let class = plain("debugged");
    let rendered = format!("{:?}", class.new_error("x"));
    assert!(rendered.contains("debugged"));
    assert!(rendered.contains("has_stack: false"));
}
