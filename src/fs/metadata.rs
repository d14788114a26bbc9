use libc::stat;

use super::FileType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub size: u64,                 // st_size
    pub file_type: FileType,       // st_mode
    pub permissions: u32,          // st_mode
    pub uid: u32,                  // st_uid
    pub gid: u32,                  // st_gid
    pub time_modified: (i64, i64), // st_mtime, st_mtime_nsec
    pub links: u64,                // st_nlink
    pub inode_num: u64,            // st_ino
    pub device: u64,               // st_dev
}

impl Metadata {
    #[allow(clippy::unnecessary_cast)]
    pub(crate) const fn from_stat(raw: stat) -> Metadata {
        Metadata {
            size: if raw.st_size < 0 { 0 } else { raw.st_size as u64 },
            file_type: FileType::from_stat_mode(raw.st_mode),
            permissions: raw.st_mode & 0o7777,
            uid: raw.st_uid,
            gid: raw.st_gid,
            time_modified: (raw.st_mtime as i64, raw.st_mtime_nsec as i64),
            links: raw.st_nlink as u64,
            inode_num: raw.st_ino as u64,
            device: raw.st_dev as u64,
        }
    }

    /// Whether both describe the same file, as seen through any of its names.
    pub const fn is_same_file(&self, other: &Metadata) -> bool {
        self.device == other.device && self.inode_num == other.inode_num
    }
}
