#![cfg(test)]

use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::fs::hard_link;
use std::os::unix::fs::symlink;

use tempfile::TempDir;

use super::*;
use crate::fragments;
use crate::path::{Fragment, Path};

fn scratch() -> (TempDir, Path) {
    let dir = tempfile::tempdir().expect("failed to create a scratch directory");
    let root = Path::of(Fragment::try_from(dir.path()).expect("scratch path is not unicode"));
    (dir, root)
}

fn call_code(result: Result<(), FsError>) -> Option<i32> {
    result.err().and_then(|e| e.code())
}

fn path_kind<T: std::fmt::Debug>(result: Result<T, FsError>) -> Option<PathErrorKind> {
    match result {
        Err(FsError::Path(e)) => Some(e.kind()),
        _ => None,
    }
}

#[test]
fn test_clean_directory_removes_nested_content() {
    let (_guard, root) = scratch();
    let hello = root.append(["hello"]);
    hello.append(["world"]).mkdir(true).unwrap();
    hello.append(["a.bin"]).touch(false).unwrap();
    hello.append(["world", "b.bin"]).touch(false).unwrap();

    hello.clean_directory(false).unwrap();

    assert!(hello.is_dir().unwrap(), "The cleaned directory itself should remain.");
    assert!(hello.content_is_empty().unwrap());
    assert!(!hello.append(["world"]).exists().unwrap());
}

#[test]
fn test_clean_directory_on_file_is_noop() {
    let (_guard, root) = scratch();
    let file = root.append(["a.txt"]);
    file.touch(false).unwrap();

    file.clean_directory(true).unwrap();
    assert!(file.is_file().unwrap());
}

#[test]
fn test_clean_directory_link_handling() {
    let (_guard, root) = scratch();
    let target = root.append(["target"]);
    target.append(["inner"]).mkdir(true).unwrap();
    target.append(["inner", "c.txt"]).touch(false).unwrap();

    let dir = root.append(["dir"]);
    dir.mkdir(false).unwrap();
    symlink(target.as_str(), dir.append(["link"]).as_str()).unwrap();

    dir.clean_directory(false).unwrap();
    assert!(dir.content_is_empty().unwrap());
    assert!(
        target.append(["inner", "c.txt"]).is_file().unwrap(),
        "Without follow_link the link target should be left alone."
    );

    symlink(target.as_str(), dir.append(["link"]).as_str()).unwrap();
    dir.clean_directory(true).unwrap();
    assert!(dir.content_is_empty().unwrap());
    assert!(target.is_dir().unwrap());
    assert!(
        target.content_is_empty().unwrap(),
        "With follow_link the linked directory should be cleaned too."
    );
}

#[test]
fn test_rmdir() {
    let (_guard, root) = scratch();
    let dir = root.append(["d"]);

    assert_eq!(call_code(dir.rmdir()), Some(libc::ENOENT));

    dir.append(["child"]).mkdir(true).unwrap();
    assert_eq!(call_code(dir.rmdir()), Some(libc::ENOTEMPTY));

    dir.append(["child"]).rmdir().unwrap();
    dir.rmdir().unwrap();
    assert!(!dir.exists().unwrap());
}

#[test]
fn test_call_failure_display() {
    let (_guard, root) = scratch();
    let missing = root.append(["missing"]);

    let Err(FsError::Call(failure)) = missing.rmdir() else {
        panic!("rmdir on a missing directory should fail with a call failure");
    };
    assert_eq!(failure.context(), format!("Failed to execute rmdir('{missing}')"));
    assert!(failure.is_not_found());
    assert!(failure.to_string().starts_with("Failed to execute rmdir("));
    assert!(failure.to_string().contains(failure.message()));
}

#[test]
fn test_try_unlink() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);

    assert_eq!(file.try_unlink(), UnlinkOutcome::NotFound);

    file.touch(false).unwrap();
    assert_eq!(file.try_unlink(), UnlinkOutcome::Removed);
    assert!(!file.exists().unwrap());

    assert!(
        root.try_unlink().is_failed(),
        "Unlinking a directory should fail rather than report it missing."
    );
}

#[test]
fn test_temp_file_removed_on_drop() {
    let (_guard, root) = scratch();

    let temp = TempFile::create_in(&root, true).unwrap();
    let temp_path = temp.path().clone();
    assert!(temp.exists().unwrap());
    assert!(temp_path.name().starts_with("_ok_fs_"));
    assert!(temp_path.name().ends_with(".tmp"));
    assert_eq!(temp_path.name().len(), "_ok_fs_".len() + 64 + ".tmp".len());

    drop(temp);
    assert!(!temp_path.exists().unwrap());
}

#[test]
fn test_temp_file_never_created() {
    let (_guard, root) = scratch();

    let first = TempFile::create_in(&root, false).unwrap();
    let second = TempFile::create_in(&root, false).unwrap();
    assert_ne!(first.path(), second.path(), "Generated names should be unique.");
    assert!(!first.exists().unwrap());

    first.delete().unwrap();
    drop(second);
}

#[test]
fn test_temp_file_rejects_directory() {
    let (_guard, root) = scratch();
    let dir = root.append(["d"]);
    dir.mkdir(false).unwrap();

    assert_eq!(path_kind(TempFile::new(dir.clone())), Some(PathErrorKind::OccupiedByDirectory));
    assert!(dir.is_dir().unwrap());
}

#[test]
fn test_copy_content_mirrors_tree() {
    let (_guard, root) = scratch();
    let from = root.append(["from"]);
    let to = root.append(["to"]);
    from.append(["a", "b"]).mkdir(true).unwrap();
    from.append(["top.txt"]).create_file(false).unwrap().write_all(b"top").unwrap();
    from.append(["a", "b", "deep.txt"]).create_file(false).unwrap().write_all(b"deep").unwrap();
    symlink(from.append(["top.txt"]).as_str(), from.append(["link.txt"]).as_str()).unwrap();

    from.copy_content(&to).unwrap();

    assert_eq!(File::new(&to.append(["top.txt"])).read_all().unwrap(), b"top");
    assert_eq!(File::new(&to.append(["a", "b", "deep.txt"])).read_all().unwrap(), b"deep");
    assert!(
        !to.append(["link.txt"]).exists().unwrap(),
        "Symbolic links shouldn't be copied."
    );
}

#[test]
fn test_copy_content_requires_directories() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);
    file.touch(false).unwrap();

    assert_eq!(path_kind(file.copy_content(&root.append(["x"]))), Some(PathErrorKind::NotADirectory));
    assert_eq!(path_kind(root.append(["x"]).copy_content(&file)), Some(PathErrorKind::NotADirectory));
}

#[test]
fn test_copy_file() {
    let (_guard, root) = scratch();
    let source = root.append(["source"]);
    File::new(&source).write_all(b"content").unwrap();
    source.chmod(0o640).unwrap();

    let copy = source.copy_file(&root.append(["copy"])).unwrap();
    assert_eq!(File::new(&copy).read_all().unwrap(), b"content");
    assert_eq!(copy.metadata().unwrap().permissions, 0o640);
    assert!(source.is_file().unwrap());

    assert_eq!(path_kind(source.copy_file(&root)), Some(PathErrorKind::DestinationIsDirectory));
    assert_eq!(path_kind(root.copy_file(&copy)), Some(PathErrorKind::NotAFile));
}

#[test]
fn test_move_file_and_move_into() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);
    file.touch(false).unwrap();

    let moved = file.move_file(&root.append(["g"])).unwrap();
    assert!(!file.exists().unwrap());
    assert!(moved.is_file().unwrap());

    let dir = root.append(["d"]);
    dir.mkdir(false).unwrap();
    let inside = moved.move_into(&dir).unwrap();
    assert_eq!(inside, dir.append(["g"]));
    assert!(inside.is_file().unwrap());

    assert_eq!(
        path_kind(inside.move_into(&root.append(["missing"]))),
        Some(PathErrorKind::NotADirectory),
        "Moving into something that isn't a directory should fail before renaming."
    );
    assert!(inside.is_file().unwrap());
}

#[test]
fn test_touch() {
    let (_guard, root) = scratch();
    let nested = root.append(["a", "b", "c.txt"]);

    let error = nested.touch(false).unwrap_err();
    assert_eq!(
        error.to_string(),
        format!("With '{}': parent directory does not exist", root.append(["a", "b"]))
    );

    nested.touch(true).unwrap();
    assert!(nested.is_file().unwrap());
    assert_eq!(nested.filesize().unwrap(), 0);

    File::new(&nested).write_all(b"keep").unwrap();
    nested.touch(false).unwrap();
    assert_eq!(nested.filesize().unwrap(), 4, "Touching shouldn't truncate a file.");
}

#[test]
fn test_mkdir() {
    let (_guard, root) = scratch();
    let nested = root.append(["x", "y", "z"]);

    assert_eq!(call_code(nested.mkdir(false)), Some(libc::ENOENT));

    nested.mkdir(true).unwrap();
    assert!(nested.is_dir().unwrap());
    nested.mkdir(false).unwrap();
    nested.mkdir(true).unwrap();

    let file = root.append(["file"]);
    file.touch(false).unwrap();
    assert_eq!(call_code(file.mkdir(false)), Some(libc::EEXIST));
}

#[test]
fn test_delete() {
    let (_guard, root) = scratch();
    let tree = root.append(["tree"]);
    tree.append(["a", "b"]).mkdir(true).unwrap();
    tree.append(["a", "b", "f"]).touch(false).unwrap();

    assert_eq!(call_code(tree.delete(false)), Some(libc::ENOTEMPTY));
    tree.delete(true).unwrap();
    assert!(!tree.exists().unwrap());

    tree.delete(true).unwrap();
}

#[test]
fn test_delete_link_keeps_target() {
    let (_guard, root) = scratch();
    let target = root.append(["target"]);
    target.append(["kept"]).touch(true).unwrap();
    let link = root.append(["link"]);
    symlink(target.as_str(), link.as_str()).unwrap();

    link.delete(true).unwrap();
    assert!(!link.is_link().unwrap());
    assert!(target.append(["kept"]).is_file().unwrap());
}

#[test]
fn test_queries() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);
    file.touch(false).unwrap();
    let link = root.append(["l"]);
    symlink(file.as_str(), link.as_str()).unwrap();
    let dangling = root.append(["dangling"]);
    symlink(root.append(["nothing"]).as_str(), dangling.as_str()).unwrap();

    assert!(root.is_dir().unwrap());
    assert!(file.is_file().unwrap() && !file.is_dir().unwrap() && !file.is_link().unwrap());
    assert!(link.is_link().unwrap() && link.is_file().unwrap());
    assert!(dangling.is_link().unwrap());
    assert!(!dangling.exists().unwrap() && !dangling.is_file().unwrap());

    let through_file = file.append(["child"]);
    assert!(!through_file.exists().unwrap(), "ENOTDIR should count as not existing.");
    assert!(!through_file.is_dir().unwrap());
    assert!(!through_file.is_readable().unwrap());

    assert_eq!(link.link_metadata().unwrap().file_type, FileType::Symlink);
    assert_eq!(link.metadata().unwrap().file_type, FileType::Regular);
}

#[test]
fn test_filesize_and_content_is_empty() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);
    file.touch(false).unwrap();

    assert!(root.content_is_empty().is_ok_and(|empty| !empty));
    assert!(file.content_is_empty().unwrap());

    File::new(&file).write_all(&[7; 100]).unwrap();
    assert_eq!(file.filesize().unwrap(), 100);
    assert!(!file.content_is_empty().unwrap());

    assert_eq!(
        root.append(["missing"]).filesize().unwrap_err().code(),
        Some(libc::ENOENT)
    );
}

#[test]
fn test_access() {
    let (_guard, root) = scratch();
    let file = root.append(["f"]);
    file.touch(false).unwrap();
    file.chmod(0o644).unwrap();

    assert!(file.is_readable().unwrap());
    assert!(file.is_writable().unwrap());
    assert!(!file.is_executable().unwrap());

    file.chmod(0o755).unwrap();
    assert!(file.is_executable().unwrap());

    let missing = root.append(["missing"]);
    assert!(!missing.is_readable().unwrap());
    assert!(!missing.is_writable().unwrap());
    assert!(!missing.is_executable().unwrap());
}

#[test]
fn test_scandir() {
    let (_guard, root) = scratch();
    for name in ["b", "c", "a"] {
        root.append([name]).touch(false).unwrap();
    }

    assert_eq!(root.scandir(true, ScanOrder::Ascending).unwrap(), ["a", "b", "c"]);
    assert_eq!(root.scandir(true, ScanOrder::Descending).unwrap(), ["c", "b", "a"]);
    assert_eq!(root.scandir(false, ScanOrder::Ascending).unwrap(), [".", "..", "a", "b", "c"]);

    let mut unsorted = root.scandir(true, ScanOrder::Unsorted).unwrap();
    unsorted.sort();
    assert_eq!(unsorted, ["a", "b", "c"]);

    assert_eq!(
        root.append(["a"]).scandir(true, ScanOrder::default()).unwrap_err().code(),
        Some(libc::ENOTDIR)
    );
}

#[test]
fn test_path_error_display() {
    let error = PathError::new(Path::from("/etc/hosts"), PathErrorKind::NotADirectory);
    assert_eq!(error.to_string(), "With '/etc/hosts': is not a directory");
    assert_eq!(error.path().as_str(), "/etc/hosts");
    assert!(FsError::from(error).code().is_none());
}

#[test]
fn test_dir_and_file_elements() {
    let (_guard, root) = scratch();
    let dir = root.append(["d"]).create_dir(false).unwrap();
    assert!(dir.exists().unwrap() && dir.is_empty().unwrap());

    let file = dir.file("f.txt");
    assert!(!file.exists().unwrap());
    file.touch(false).unwrap();
    file.write_all(b"hello").unwrap();
    assert_eq!(file.size().unwrap(), 5);
    assert_eq!(file.parent(), dir);
    assert_eq!(Path::combine([&file]), *file.path());

    dir.dir("sub").create(false).unwrap();
    assert_eq!(dir.entries().unwrap(), [dir.path().append(["f.txt"]), dir.path().append(["sub"])]);

    let copy = file.copy_to(&root.append(["copy.txt"])).unwrap();
    let moved = copy.move_to(&dir.path().append(["moved.txt"])).unwrap();
    assert_eq!(moved.read_all().unwrap(), b"hello");

    dir.clean().unwrap();
    assert!(dir.is_empty().unwrap());
    dir.delete().unwrap();
    assert!(!dir.exists().unwrap());
}

#[test]
fn test_shorthand() {
    let (_guard, root) = scratch();

    shorthand::create(&root, &["a/b", "c"], &["a/f.txt", "d/g.txt"]).unwrap();
    assert!(shorthand::is_dir(fragments![&root, "a", "b"]).unwrap());
    assert!(shorthand::is_dir(fragments![&root, "c"]).unwrap());
    assert!(shorthand::is_file(fragments![&root, "a/f.txt"]).unwrap());
    assert!(shorthand::is_file(fragments![&root, "d", "g.txt"]).unwrap());

    shorthand::create(fragments![&root, "only"], &[], &[]).unwrap();
    assert!(shorthand::is_dir(fragments![&root, "only"]).unwrap());

    shorthand::touch_all([fragments![&root, "t1"], fragments![&root, "x", "t2"]], true).unwrap();
    assert_eq!(shorthand::filesize(fragments![&root, "x", "t2"]).unwrap(), 0);

    assert_eq!(shorthand::resolve(["/a/b", "../c"]), "/a/c");
    assert_eq!(shorthand::combine(["a//", "/b"]), "a/b");

    shorthand::delete(fragments![&root, "a"]).unwrap();
    assert!(!shorthand::exists(fragments![&root, "a"]).unwrap());

    shorthand::clean_directory([&root]).unwrap();
    assert!(shorthand::scandir(&root, true, ScanOrder::Ascending).unwrap().is_empty());
}

#[test]
fn test_copy_file_onto_itself() {
    let (_guard, root) = scratch();
    let source = root.append(["a.txt"]);
    File::new(&source).write_all(b"hello").unwrap();
    let hard = root.append(["hard.txt"]);
    hard_link(source.as_str(), hard.as_str()).unwrap();
    let soft = root.append(["soft.txt"]);
    symlink(source.as_str(), soft.as_str()).unwrap();

    for to in [&source, &hard, &soft, &root.append([".", "a.txt"])] {
        assert_eq!(
            path_kind(source.copy_file(to)),
            Some(PathErrorKind::SameFile),
            "Copying onto '{to}' should be rejected."
        );
    }
    assert_eq!(
        File::new(&source).read_all().unwrap(),
        b"hello",
        "A rejected copy shouldn't truncate the source."
    );
}

#[test]
fn test_clean_directory_non_unicode_names() {
    let (guard, root) = scratch();
    let raw_dir = guard.path().join(OsStr::from_bytes(b"dir\xfe"));
    std::fs::write(guard.path().join(OsStr::from_bytes(b"bad\xff.bin")), b"x").unwrap();
    std::fs::create_dir(&raw_dir).unwrap();
    std::fs::write(raw_dir.join(OsStr::from_bytes(b"inner\xff")), b"y").unwrap();
    std::fs::write(raw_dir.join("plain.txt"), b"z").unwrap();
    root.append(["ok.txt"]).touch(false).unwrap();

    assert!(
        root.scandir(true, ScanOrder::Unsorted).unwrap_err().is_invalid_argument(),
        "Names are reported as strings, so listing should still reject them."
    );

    root.clean_directory(false).unwrap();
    assert!(root.is_dir().unwrap());
    assert!(root.content_is_empty().unwrap());
}

#[test]
fn test_delete_tree_with_non_unicode_names() {
    let (guard, root) = scratch();
    let tree = root.append(["tree"]);
    tree.mkdir(false).unwrap();
    std::fs::write(guard.path().join("tree").join(OsStr::from_bytes(b"\x80")), b"x").unwrap();

    tree.delete(true).unwrap();
    assert!(!tree.exists().unwrap());
}

#[test]
fn test_copy_content_skips_non_unicode_names() {
    let (guard, root) = scratch();
    let from = root.append(["from"]);
    from.mkdir(false).unwrap();
    from.append(["kept.txt"]).touch(false).unwrap();
    std::fs::write(guard.path().join("from").join(OsStr::from_bytes(b"\xff")), b"x").unwrap();

    let to = root.append(["to"]);
    from.copy_content(&to).unwrap();
    assert_eq!(to.scandir(true, ScanOrder::Ascending).unwrap(), ["kept.txt"]);
}

#[test]
fn test_temp_file_rejects_special_file() {
    let (_guard, root) = scratch();
    let fifo = root.append(["fifo"]);
    let pathname = CString::new(fifo.as_str()).unwrap();
    // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
    assert_eq!(unsafe { libc::mkfifo(pathname.as_ptr(), 0o600) }, 0);

    assert_eq!(path_kind(TempFile::new(fifo.clone())), Some(PathErrorKind::NotAFile));
    assert_eq!(
        fifo.link_metadata().unwrap().file_type,
        FileType::Fifo,
        "A rejected path shouldn't be removed."
    );
}
