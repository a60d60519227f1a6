/*!
 * Permission bit interpretation
 *
 * Decodes a raw `st_mode` bitmask into structured read/write/execute flags
 * per subject and surfaces the mode bits worth flagging during an audit.
 */

use crate::types::{PermissionSet, SubjectPerms};

// Standard POSIX mode bits. Defined here rather than pulled from libc so the
// decode works on any u32, including modes read from foreign filesystems.
pub const S_ISUID: u32 = 0o4000;
pub const S_ISGID: u32 = 0o2000;
pub const S_ISVTX: u32 = 0o1000;
pub const S_IRUSR: u32 = 0o400;
pub const S_IWUSR: u32 = 0o200;
pub const S_IXUSR: u32 = 0o100;
pub const S_IRGRP: u32 = 0o040;
pub const S_IWGRP: u32 = 0o020;
pub const S_IXGRP: u32 = 0o010;
pub const S_IROTH: u32 = 0o004;
pub const S_IWOTH: u32 = 0o002;
pub const S_IXOTH: u32 = 0o001;

/// Unusual-permission checks in their fixed reporting order. The order is
/// part of the output contract and must not change.
const UNUSUAL_CHECKS: [(u32, &str); 7] = [
    (S_IWOTH, "world-writable"),
    (S_IWGRP, "group-writable"),
    (S_IXOTH, "world-executable"),
    (S_IXGRP, "group-executable"),
    (S_ISUID, "set-uid"),
    (S_ISGID, "set-gid"),
    (S_ISVTX, "sticky-bit"),
];

/// Decode a raw mode bitmask into per-subject read/write/execute flags.
///
/// Total over all `u32` inputs; bits outside the nine permission bits are
/// ignored.
pub fn interpret(mode: u32) -> PermissionSet {
    PermissionSet {
        usr: SubjectPerms {
            read: mode & S_IRUSR != 0,
            write: mode & S_IWUSR != 0,
            execute: mode & S_IXUSR != 0,
        },
        grp: SubjectPerms {
            read: mode & S_IRGRP != 0,
            write: mode & S_IWGRP != 0,
            execute: mode & S_IXGRP != 0,
        },
        oth: SubjectPerms {
            read: mode & S_IROTH != 0,
            write: mode & S_IWOTH != 0,
            execute: mode & S_IXOTH != 0,
        },
    }
}

/// Return the names of the unusual mode bits set in `mode`, in the fixed
/// declared order. Empty for an ordinary mode.
///
/// World/group write and execute bits are the common tamper vectors during
/// an ad-hoc audit; set-uid/set-gid and the sticky bit change execution
/// semantics rather than plain access.
pub fn find_unusual_permissions(mode: u32) -> Vec<&'static str> {
    UNUSUAL_CHECKS
        .iter()
        .filter(|(bit, _)| mode & bit != 0)
        .map(|&(_, name)| name)
        .collect()
}
