//! Free functions for one-off filesystem operations.
//!
//! Every function combines its fragments into a [`Path`] and forwards to the method of the same
//! name, so `shorthand::is_dir(["/tmp", "a"])` is `Path::combine(["/tmp", "a"]).is_dir()`.

use crate::fs::{Dir, File, FsError, ScanOrder};
use crate::path::{self, Fragment, Path};

/// Creates `folders` and `files` below `root`, skipping those that already exist. With neither
/// given, only `root` itself is created.
pub fn create<'a, F: Into<Fragment<'a>>>(
    root: F,
    folders: &[&str],
    files: &[&str],
) -> Result<(), FsError> {
    let root = Path::of(root);

    if folders.is_empty() && files.is_empty() {
        return root.mkdir(true);
    }

    for folder in folders {
        let folder = root.append([*folder]);
        if !folder.exists()? {
            folder.mkdir(true)?;
        }
    }

    for file in files {
        let file = root.append([*file]);
        if !file.exists()? {
            file.touch(true)?;
        }
    }
    Ok(())
}

pub fn path<'a, I, F>(fragments: I) -> Path
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    Path::combine(fragments)
}

pub fn dir<'a, F: Into<Fragment<'a>>>(dir_path: F) -> Dir {
    Dir::new(dir_path)
}

pub fn file<'a, F: Into<Fragment<'a>>>(file_path: F) -> File {
    File::new(file_path)
}

pub fn exists<'a, I, F>(fragments: I) -> Result<bool, FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).exists()
}

pub fn is_file<'a, I, F>(fragments: I) -> Result<bool, FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).is_file()
}

pub fn is_dir<'a, I, F>(fragments: I) -> Result<bool, FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).is_dir()
}

pub fn is_link<'a, I, F>(fragments: I) -> Result<bool, FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).is_link()
}

pub fn resolve<'a, I, F>(fragments: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    resolve_to_path(fragments).into_string()
}

pub fn resolve_to_path<'a, I, F>(fragments: I) -> Path
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).resolve()
}

pub fn combine<'a, I, F>(fragments: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path::combine(fragments)
}

pub fn combine_to_path<'a, I, F>(fragments: I) -> Path
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    Path::combine(fragments)
}

pub fn realpath<'a, I, F>(fragments: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path::realpath(fragments).into_string()
}

/// Recursively deletes whatever the fragments point to.
pub fn delete<'a, I, F>(fragments: I) -> Result<(), FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).delete(true)
}

pub fn unlink<'a, I, F>(fragments: I) -> Result<(), FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).unlink()
}

pub fn rmdir<'a, I, F>(fragments: I) -> Result<(), FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).rmdir()
}

pub fn mkdir<'a, F: Into<Fragment<'a>>>(dir_path: F, recursive: bool) -> Result<(), FsError> {
    Path::of(dir_path).mkdir(recursive)
}

pub fn touch<'a, F: Into<Fragment<'a>>>(file_path: F, recursive: bool) -> Result<(), FsError> {
    Path::of(file_path).touch(recursive)
}

/// Touches every path in `paths`, stopping at the first failure.
pub fn touch_all<'a, I, F>(paths: I, recursive: bool) -> Result<(), FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    paths
        .into_iter()
        .try_for_each(|file_path| touch(file_path, recursive))
}

pub fn filesize<'a, I, F>(fragments: I) -> Result<u64, FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).filesize()
}

pub fn home() -> Option<String> {
    Path::home()
}

pub fn root_path() -> Path {
    Path::root_path()
}

pub fn home_path() -> Option<Path> {
    Path::home_path()
}

pub fn clean_directory<'a, I, F>(fragments: I) -> Result<(), FsError>
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    path(fragments).clean_directory(false)
}

pub fn scandir<'a, F: Into<Fragment<'a>>>(
    dir_path: F,
    exclude_special: bool,
    order: ScanOrder,
) -> Result<Vec<String>, FsError> {
    Path::of(dir_path).scandir(exclude_special, order)
}

pub fn copy_file<'a, 'b>(
    from: impl Into<Fragment<'a>>,
    to: impl Into<Fragment<'b>>,
) -> Result<Path, FsError> {
    Path::of(from).copy_file(&Path::of(to))
}

pub fn copy_content<'a, 'b>(
    from: impl Into<Fragment<'a>>,
    to: impl Into<Fragment<'b>>,
) -> Result<(), FsError> {
    Path::of(from).copy_content(&Path::of(to))
}
