//! Save/load cycles against a real filesystem

use std::fs;
use std::path::Path;

use geomspace::{
    parallelogram, Entity, HeaderValue, Identified, Lookup, Point, Session, SessionError, Vector,
};

fn populated() -> Session {
    let mut session = Session::new();
    let corner = Point::new(Vector::from([1.0, 2.0, 3.0]), "corner");
    let side = Vector::new(vec![4.0, 0.0, 0.0], "side");
    let up = Vector::new(vec![0.0, 5.0, 0.0], "up");
    let plate = parallelogram(&corner, &side, &up, "base plate").unwrap();

    session.append(corner).unwrap();
    session.append(side).unwrap();
    session.append(up).unwrap();
    session.append(plate).unwrap();
    session.add_to_header([("author", "tester")]);
    session
}

fn tmp_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmp"))
        .collect()
}

#[test]
fn test_save_then_load_preserves_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");

    let mut original = populated();
    let written = original.save_to_file(Some(&path), false).unwrap();
    assert_eq!(written, path);
    assert_eq!(original.header().filename(), Some(path.as_path()));
    assert!(original.header().savedate().is_some());

    let mut restored = Session::new();
    restored.load_file(Some(&path), false).unwrap();

    assert_eq!(restored.len(), original.len());
    for (a, b) in restored.workspace().iter().zip(original.workspace()) {
        assert_eq!(a.uid(), b.uid());
        assert_eq!(a.name(), b.name());
        assert_eq!(a.to_string(), b.to_string());
    }
    assert_eq!(restored.header(), original.header());
    assert_eq!(restored.header().get("author"), Some(&HeaderValue::from("tester")));
    assert_eq!(restored.common_header(), original.common_header());

    let plate = restored.search_by_name("base plat");
    assert_eq!(plate.len(), 1);
    let contour = plate[0].item.as_contour().unwrap();
    assert!(contour.is_closed());
    assert!(contour.is_coplanar());

    assert!(tmp_files(dir.path()).is_empty());
}

#[test]
fn test_save_without_filename() {
    let mut session = populated();
    let err = session.save_to_file(None, false).unwrap_err();
    assert!(matches!(err, SessionError::MissingFilename));
    assert!(session.header().savedate().is_none());
}

#[test]
fn test_save_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");
    fs::write(&path, b"keep me").unwrap();

    let mut session = populated();
    let err = session.save_to_file(Some(&path), false).unwrap_err();
    assert!(matches!(err, SessionError::FileAlreadyExists(p) if p == path));
    assert_eq!(fs::read(&path).unwrap(), b"keep me");
    assert!(session.header().filename().is_none());

    session.save_to_file(Some(&path), true).unwrap();
    assert_ne!(fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn test_resave_uses_stored_filename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");

    let mut session = populated();
    session.save_to_file(Some(&path), false).unwrap();
    let first = session.header().savedate().unwrap();

    session.append(Vector::new(vec![9.0], "extra")).unwrap();
    let err = session.save_to_file(None, false).unwrap_err();
    assert!(matches!(err, SessionError::FileAlreadyExists(_)));

    let written = session.save_to_file(None, true).unwrap();
    assert_eq!(written, path);
    assert!(session.header().savedate().unwrap() >= first);

    let mut restored = Session::new();
    restored.load_file(Some(&path), false).unwrap();
    assert_eq!(restored.len(), 5);
}

#[test]
fn test_load_into_non_empty_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");
    populated().save_to_file(Some(&path), false).unwrap();

    let mut session = Session::new();
    let stray = session.append(Vector::new(vec![0.0], "stray")).unwrap();

    let err = session.load_file(Some(&path), false).unwrap_err();
    assert!(matches!(err, SessionError::WorkspaceNotEmpty { len: 1 }));
    assert!(session.contains(stray));

    session.load_file(Some(&path), true).unwrap();
    assert!(!session.contains(stray));
    assert_eq!(session.len(), 4);
}

#[test]
fn test_load_from_header_filename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");

    let mut session = populated();
    session.save_to_file(Some(&path), false).unwrap();
    let uids: Vec<_> = session.workspace().iter().map(Entity::uid).collect();

    session.wipe_workspace();
    let source = session.load_file(None, false).unwrap();
    assert_eq!(source, path);
    let reloaded: Vec<_> = session.workspace().iter().map(Entity::uid).collect();
    assert_eq!(reloaded, uids);
}

#[test]
fn test_load_missing_filename_and_missing_file() {
    let mut session = Session::new();
    assert!(matches!(
        session.load_file(None, false),
        Err(SessionError::MissingFilename)
    ));

    let dir = tempfile::tempdir().unwrap();
    let err = session
        .load_file(Some(&dir.path().join("absent.gsw")), false)
        .unwrap_err();
    assert!(matches!(err, SessionError::Io(_)));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("part.gsw");

    let mut session = populated();
    session.save_to_file(Some(&path), false).unwrap();
    assert!(path.is_file());
    assert!(tmp_files(path.parent().unwrap()).is_empty());
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.gsw");
    fs::write(&path, b"definitely not a workspace file").unwrap();

    let mut session = Session::new();
    let err = session.load_file(Some(&path), false).unwrap_err();
    assert!(matches!(err, SessionError::Format(_)));
    assert!(session.is_empty());
    assert!(session.header().filename().is_none());
}

#[test]
fn test_truncated_file_leaves_session_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.gsw");
    populated().save_to_file(Some(&path), false).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let mut session = Session::new();
    session.add_to_header([("kept", true)]);
    let err = session.load_file(Some(&path), false).unwrap_err();
    assert!(matches!(err, SessionError::Format(_)));
    assert_eq!(session.header().get("kept"), Some(&HeaderValue::Bool(true)));
}

#[cfg(unix)]
#[test]
fn test_unencodable_path_is_not_a_format_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"part\xff.gsw"));

    let mut session = populated();
    let err = session.save_to_file(Some(&path), false).unwrap_err();
    assert!(matches!(err, SessionError::Encode(_)));
    assert!(!path.exists());
    assert!(session.header().filename().is_none());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
