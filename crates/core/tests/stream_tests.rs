//! Integration tests for the class stream over the dumps under `fixtures/`.

use apilint_core::{
    collect_until_matching, find_matching, Api, Class, ClassName, ClassStream, DiagnosticKind,
    RetryIter, SignatureFormat,
};
use std::path::{Path, PathBuf};

/// Locate the workspace root.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn read_fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("could not read fixture {}: {}", name, e);
    })
}

fn classes(name: &str) -> Vec<Class> {
    let text = read_fixture(name);
    ClassStream::new(text.lines(), name).collect()
}

#[test]
fn v2_dump_parses_cleanly() {
    let text = read_fixture("current-v2.txt");
    let mut stream = ClassStream::new(text.lines(), "current-v2.txt");
    let parsed: Vec<Class> = stream.by_ref().collect();
    assert_eq!(stream.format(), SignatureFormat::V2);
    assert!(stream.diagnostics().is_empty(), "{:?}", stream.diagnostics());

    let names: Vec<&str> = parsed.iter().map(|c| c.fullname.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "android.app.Notification",
            "android.app.Notification.Action",
            "android.app.SessionCallbacks",
            "android.graphics.Point",
            "java.util.Broken",
        ]
    );

    let action = &parsed[1];
    assert_eq!(action.name, "Action");
    assert!(action.modifiers.contains("static"));
    let ctor = action.constructors().next().expect("ctor");
    assert_eq!(
        ctor.arg_types(),
        vec!["int", "java.lang.CharSequence", "android.app.PendingIntent"]
    );

    let point = &parsed[3];
    assert_eq!(point.plain_methods().next().map(|m| m.arg_types()), Some(vec!["java.lang.Object"]));
}

#[test]
fn legacy_dump_parses_positionally() {
    let parsed = classes("faulty-current.txt");
    assert_eq!(parsed.len(), 2);
    let colors = &parsed[1];
    assert_eq!(colors.format, SignatureFormat::V1);
    assert_eq!(colors.implements.as_deref(), Some("android.os.Parcelable"));
    assert_eq!(colors.fields[0].typ, "android.os.Parcelable.Creator");
    assert_eq!(colors.methods.len(), 3);
}

#[test]
fn malformed_dump_reports_and_continues() {
    let text = read_fixture("malformed.txt");
    let mut stream = ClassStream::new(text.lines(), "malformed.txt");
    let parsed: Vec<Class> = stream.by_ref().collect();

    let names: Vec<&str> = parsed.iter().map(|c| c.fullname.as_str()).collect();
    assert_eq!(names, vec!["android.widget.Button", "android.widget.Toast"]);
    assert_eq!(parsed[0].methods.len(), 2);
    assert!(parsed[0].fields.is_empty());

    let kinds: Vec<(u32, DiagnosticKind)> = stream
        .diagnostics()
        .iter()
        .map(|d| (d.line, d.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (6, DiagnosticKind::Parse),
            (7, DiagnosticKind::Lex),
            (11, DiagnosticKind::Parse),
        ]
    );
}

#[test]
fn streams_align_by_name() {
    let current = classes("system-current.txt");
    let mut base = RetryIter::new(classes("ok-current.txt"));

    let found = find_matching(&mut base, Some(&current[0])).expect("counterpart");
    assert_eq!(found.fullname, "android.app.WallpaperColors");
    assert_eq!(found.methods.len(), 3);
    assert!(base.next().is_none());
}

#[test]
fn known_names_drive_collection() {
    let mut known = RetryIter::new(vec![
        ClassName::new("android.app", "Activity"),
        ClassName::new("android.app", "WallpaperColors"),
    ]);
    let current = classes("system-current.txt");
    let before: Vec<ClassName> = collect_until_matching(&mut known, Some(&current[0])).collect();
    assert_eq!(before, vec![ClassName::new("android.app", "Activity")]);
    assert!(known.next().is_none());
}

#[test]
fn api_index_over_fixture() {
    let api = Api::from_lines(read_fixture("current-v2.txt").lines(), "current-v2.txt");
    assert_eq!(api.packages.len(), 3);
    let notification = api.class("android.app.Notification").expect("class");
    assert_eq!(notification.fields.len(), 4);
    assert_eq!(
        notification.fields[1].unquoted_value(),
        Some("android.title")
    );
    assert_eq!(api.package_of(notification).map(|p| p.line), Some(2));
}
